use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use backend_application::commands::auth_commands;
use backend_application::AppState;
use backend_domain::{AuthResponse, LoginRequest, RegisterRequest};

use crate::error::HttpError;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), HttpError> {
    let response = auth_commands::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, HttpError> {
    let response = auth_commands::login(&state, payload).await?;
    Ok(Json(response))
}
