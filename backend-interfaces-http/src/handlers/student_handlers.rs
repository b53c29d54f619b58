use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::{code_commands, ledger_commands, loan_commands};
use backend_application::queries::{reward_queries, user_queries};
use backend_application::AppState;
use backend_domain::{
    BorrowRequest, ClaimReceipt, ClaimedReward, FeedbackReceipt, FeedbackRequest, LoanRecord,
    PointsUsage, RedemptionCode, Reward, Role, UsageReceipt, UsageRequest, UserProfile,
};

use crate::error::HttpError;
use crate::middleware::{authenticate, require_role};

const PATRONS: &[Role] = &[Role::Student, Role::Guest];

#[derive(serde::Deserialize)]
pub struct ClaimCodePayload {
    pub code: String,
}

#[derive(serde::Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    let profile = user_queries::profile(&state, &claims.id_number).await?;
    Ok(Json(profile))
}

pub async fn list_rewards(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Reward>>, HttpError> {
    authenticate(&state.config, &headers)?;
    let rewards = reward_queries::list_rewards(&state).await?;
    Ok(Json(rewards))
}

pub async fn claim_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reward_id): Path<String>,
) -> Result<Json<ClaimReceipt>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let receipt = ledger_commands::claim_reward(&state, &claims.id_number, &reward_id).await?;
    Ok(Json(receipt))
}

pub async fn claim_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ClaimCodePayload>,
) -> Result<Json<RedemptionCode>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let code = code_commands::claim_code(&state, &claims.id_number, &payload.code).await?;
    Ok(Json(code))
}

pub async fn points_usage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UsageRequest>,
) -> Result<Json<UsageReceipt>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let receipt = ledger_commands::record_points_usage(&state, &claims.id_number, payload).await?;
    Ok(Json(receipt))
}

pub async fn borrow_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BorrowRequest>,
) -> Result<Json<LoanRecord>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let loan = loan_commands::borrow(&state, &claims.id_number, payload).await?;
    Ok(Json(loan))
}

pub async fn feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackReceipt>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let receipt = ledger_commands::submit_feedback(&state, &claims.id_number, payload).await?;
    Ok(Json(receipt))
}

pub async fn claim_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ClaimedReward>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let rows = reward_queries::claim_history(&state, &claims.id_number, query.limit).await?;
    Ok(Json(rows))
}

pub async fn usage_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<PointsUsage>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, PATRONS)?;
    let rows = reward_queries::usage_history(&state, &claims.id_number, query.limit).await?;
    Ok(Json(rows))
}
