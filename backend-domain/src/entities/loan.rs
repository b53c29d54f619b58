// Loan entity
// A borrowed-items record with an in-place {borrowed -> returned} transition

use serde::{Deserialize, Serialize};

use crate::value_objects::{LoanStatus, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanItem {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: String,
    pub owner_id_number: String,
    pub items: Vec<LoanItem>,
    pub borrowed_at: i64,
    pub status: LoanStatus,
    pub returned_at: Option<i64>,
}

impl LoanRecord {
    pub fn is_open(&self) -> bool {
        self.status == LoanStatus::Borrowed
    }
}

/// Filter for loan listings and exports.
#[derive(Debug, Clone, Default)]
pub struct LoanQuery {
    pub status: Option<LoanStatus>,
    pub owner_role: Option<Role>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BorrowRequest {
    pub items: Vec<LoanItem>,
    pub borrowed_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnRequest {
    pub loan_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManualReturnRequest {
    pub owner_id_number: String,
    pub borrowed_at: i64,
}

/// One scanner event in a concierge batch upload.
#[derive(Debug, Clone, Deserialize)]
pub struct BorrowScanEvent {
    pub owner_id_number: String,
    pub items: Vec<LoanItem>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BorrowScanEnvelope {
    pub schema_version: String,
    pub events: Vec<BorrowScanEvent>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub accepted: usize,
    pub duplicates: usize,
    pub dropped: usize,
}
