// Reporting aggregates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub records: u64,
    pub total_points_spent: u64,
    pub by_store: HashMap<String, u64>,
    pub by_meal: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub open_loans: u64,
    pub returned_loans: u64,
    pub outstanding_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: i64,
    pub users: u64,
    pub usage: UsageSummary,
    pub loans: LoanSummary,
}

/// Capped export envelope; `limited` flags truncation at the row cap.
#[derive(Debug, Clone, Serialize)]
pub struct BoundedResult<T> {
    pub rows: Vec<T>,
    pub limited: bool,
}
