use tracing::warn;
use uuid::Uuid;

use backend_domain::ports::ReturnOutcome;
use backend_domain::utils::current_millis;
use backend_domain::{
    BorrowRequest, BorrowScanEvent, LoanItem, LoanRecord, LoanStatus, ManualReturnRequest,
    ScanSummary,
};

use crate::{AppError, AppState};

pub async fn borrow(
    state: &AppState,
    owner_id_number: &str,
    payload: BorrowRequest,
) -> Result<LoanRecord, AppError> {
    let items = normalize_items(payload.items)?;
    if state.users.fetch_user(owner_id_number).await?.is_none() {
        return Err(AppError::NotFound("owner not found".to_string()));
    }
    let borrowed_at = payload.borrowed_at.unwrap_or_else(current_millis);
    let loan = new_loan(owner_id_number, items, borrowed_at);
    if !state.loans.insert_loan_if_new(&loan).await? {
        return Err(AppError::BadRequest(
            "duplicate borrow for this owner and timestamp".to_string(),
        ));
    }
    state.metrics.record_borrow(1);
    state.dashboard.invalidate_prefix("dashboard");
    Ok(loan)
}

/// Scanner batch upload. Invalid entries are dropped with a warning and
/// duplicate scans are counted, not treated as errors; the scanner
/// re-sends whole batches on flaky uplinks.
pub async fn scan_borrow(
    state: &AppState,
    events: Vec<BorrowScanEvent>,
) -> Result<ScanSummary, AppError> {
    let mut summary = ScanSummary::default();
    for event in events {
        let Ok(items) = normalize_items(event.items) else {
            summary.dropped += 1;
            continue;
        };
        let owner = event.owner_id_number.trim();
        if owner.is_empty() || state.users.fetch_user(owner).await?.is_none() {
            warn!("dropping scan event for unknown owner '{}'", owner);
            summary.dropped += 1;
            continue;
        }
        let loan = new_loan(owner, items, event.timestamp);
        if state.loans.insert_loan_if_new(&loan).await? {
            summary.accepted += 1;
        } else {
            summary.duplicates += 1;
        }
    }
    if summary.accepted > 0 {
        state.metrics.record_borrow(summary.accepted);
        state.dashboard.invalidate_prefix("dashboard");
    }
    Ok(summary)
}

pub async fn return_loan(state: &AppState, loan_id: &str) -> Result<LoanRecord, AppError> {
    let outcome = state.loans.mark_returned(loan_id.trim(), current_millis()).await?;
    finish_return(state, outcome)
}

pub async fn manual_return(
    state: &AppState,
    payload: ManualReturnRequest,
) -> Result<LoanRecord, AppError> {
    let owner = payload.owner_id_number.trim();
    if owner.is_empty() {
        return Err(AppError::BadRequest(
            "owner_id_number must not be empty".to_string(),
        ));
    }
    let outcome = state
        .loans
        .mark_returned_by_borrow(owner, payload.borrowed_at, current_millis())
        .await?;
    finish_return(state, outcome)
}

fn finish_return(state: &AppState, outcome: ReturnOutcome) -> Result<LoanRecord, AppError> {
    match outcome {
        ReturnOutcome::Returned(loan) => {
            state.metrics.record_return();
            state.dashboard.invalidate_prefix("dashboard");
            Ok(loan)
        }
        ReturnOutcome::AlreadyReturned => Err(AppError::BadRequest(
            "loan already returned".to_string(),
        )),
        ReturnOutcome::NotFound => Err(AppError::NotFound("loan not found".to_string())),
    }
}

fn new_loan(owner_id_number: &str, items: Vec<LoanItem>, borrowed_at: i64) -> LoanRecord {
    LoanRecord {
        id: Uuid::new_v4().to_string(),
        owner_id_number: owner_id_number.to_string(),
        items,
        borrowed_at,
        status: LoanStatus::Borrowed,
        returned_at: None,
    }
}

fn normalize_items(items: Vec<LoanItem>) -> Result<Vec<LoanItem>, AppError> {
    if items.is_empty() {
        return Err(AppError::BadRequest("items must not be empty".to_string()));
    }
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let name = item.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("item name must not be empty".to_string()));
        }
        if item.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "quantity must be positive for '{}'",
                name
            )));
        }
        out.push(LoanItem {
            name,
            quantity: item.quantity,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_items_trims_names() {
        let items = normalize_items(vec![LoanItem {
            name: " Spoon ".to_string(),
            quantity: 1,
        }])
        .expect("normalize");
        assert_eq!(items[0].name, "Spoon");
    }

    #[test]
    fn normalize_items_rejects_empty_list() {
        let err = normalize_items(Vec::new()).expect_err("reject empty");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn normalize_items_rejects_zero_quantity() {
        let err = normalize_items(vec![LoanItem {
            name: "Tray".to_string(),
            quantity: 0,
        }])
        .expect_err("reject zero");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("Tray")),
            _ => panic!("unexpected error type"),
        }
    }
}
