// Redemption code entity
// Single-use numeric codes issued by cashiers

use serde::{Deserialize, Serialize};

use crate::value_objects::CodeStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionCode {
    pub code: String,
    pub status: CodeStatus,
    pub issued_by: String,
    pub issued_at: i64,
    pub redeemed_by: Option<String>,
    pub redeemed_at: Option<i64>,
}

impl RedemptionCode {
    pub fn issue(code: String, issued_by: String, now: i64) -> Self {
        Self {
            code,
            status: CodeStatus::Active,
            issued_by,
            issued_at: now,
            redeemed_by: None,
            redeemed_at: None,
        }
    }
}
