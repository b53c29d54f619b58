use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::{auth_commands, reward_commands, store_commands};
use backend_application::queries::{report_queries, user_queries};
use backend_application::AppState;
use backend_domain::{
    BoundedResult, DashboardSnapshot, LoanRecord, PointsUsage, RegisterRequest, Reward,
    RewardUpsert, Role, UserProfile,
};

use crate::error::HttpError;
use crate::middleware::{authenticate, require_role};

#[derive(serde::Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct DashboardQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(serde::Deserialize)]
pub struct StoreListPayload {
    pub stores: Vec<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserProfile>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let users = user_queries::list_users(&state, query.role).await?;
    Ok(Json(users))
}

/// Staff accounts (cashier/concierge/admin) are created here, not via
/// public registration.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let profile = auth_commands::create_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn create_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RewardUpsert>,
) -> Result<(StatusCode, Json<Reward>), HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let reward = reward_commands::create_reward(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(reward)))
}

pub async fn update_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reward_id): Path<String>,
    Json(payload): Json<RewardUpsert>,
) -> Result<Json<Reward>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let reward = reward_commands::update_reward(&state, &reward_id, payload).await?;
    Ok(Json(reward))
}

pub async fn delete_reward(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reward_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    reward_commands::delete_reward(&state, &reward_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stores(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let stores = state.stores.read().await.clone();
    Ok(Json(stores))
}

pub async fn update_stores(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StoreListPayload>,
) -> Result<Json<Vec<String>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let stores = store_commands::update_stores(&state, payload.stores).await?;
    Ok(Json(stores))
}

pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let snapshot = report_queries::dashboard(&state, query.from, query.to).await?;
    Ok(Json(snapshot))
}

pub async fn export_usage(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BoundedResult<PointsUsage>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let export = report_queries::export_usage(&state).await?;
    Ok(Json(export))
}

pub async fn export_loans(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BoundedResult<LoanRecord>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Admin])?;
    let export = report_queries::export_loans(&state).await?;
    Ok(Json(export))
}
