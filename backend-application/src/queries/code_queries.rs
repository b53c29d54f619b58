use backend_domain::RedemptionCode;

use crate::{AppError, AppState};

pub async fn list_codes(
    state: &AppState,
    issued_by: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<RedemptionCode>, AppError> {
    let limit = limit.unwrap_or(100).clamp(1, 500);
    Ok(state.codes.list_codes(issued_by, limit).await?)
}
