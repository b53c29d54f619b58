// Feedback entity
// One rewarded submission per rolling campus day

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub id_number: String,
    pub rating: u8,
    pub comment: String,
    pub awarded_points: u32,
    pub submitted_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReceipt {
    pub balance: u64,
    pub awarded_points: u32,
}
