use backend_domain::{LoanQuery, LoanRecord, LoanStatus, Role};

use crate::{AppError, AppState};

/// Open loans, newest borrow first. Filters: owner role and borrow-time
/// range.
pub async fn active_loans(
    state: &AppState,
    role: Option<String>,
    from: Option<i64>,
    to: Option<i64>,
    limit: Option<usize>,
) -> Result<Vec<LoanRecord>, AppError> {
    let owner_role = match role {
        Some(value) => Some(
            Role::parse(&value)
                .ok_or_else(|| AppError::BadRequest(format!("invalid role '{}'", value.trim())))?,
        ),
        None => None,
    };
    let limit = limit.unwrap_or(200).clamp(1, 2000);
    Ok(state
        .loans
        .list_loans(LoanQuery {
            status: Some(LoanStatus::Borrowed),
            owner_role,
            from,
            to,
            limit,
        })
        .await?)
}
