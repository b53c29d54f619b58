use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::error;

use backend_application::commands::loan_commands;
use backend_application::queries::loan_queries;
use backend_application::AppState;
use backend_domain::{LoanRecord, ManualReturnRequest, ReturnRequest, Role, ScanSummary};

use crate::error::HttpError;
use crate::middleware::{authenticate, parse_scan_events, require_role};

#[derive(serde::Deserialize)]
pub struct LoanFilterQuery {
    pub role: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub limit: Option<usize>,
}

pub async fn scan_borrow(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ScanSummary>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Concierge])?;

    let events = parse_scan_events(&headers, &body).map_err(|err| {
        error!("failed to parse scan batch: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let summary = loan_commands::scan_borrow(&state, events).await?;
    Ok(Json(summary))
}

pub async fn return_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReturnRequest>,
) -> Result<Json<LoanRecord>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Concierge])?;
    let loan = loan_commands::return_loan(&state, &payload.loan_id).await?;
    Ok(Json(loan))
}

pub async fn manual_return(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ManualReturnRequest>,
) -> Result<Json<LoanRecord>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Concierge])?;
    let loan = loan_commands::manual_return(&state, payload).await?;
    Ok(Json(loan))
}

pub async fn list_loans(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoanFilterQuery>,
) -> Result<Json<Vec<LoanRecord>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Concierge, Role::Admin])?;
    let loans =
        loan_queries::active_loans(&state, query.role, query.from, query.to, query.limit).await?;
    Ok(Json(loans))
}
