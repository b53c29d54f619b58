use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::code_commands;
use backend_application::queries::code_queries;
use backend_application::AppState;
use backend_domain::{RedemptionCode, Role};

use crate::error::HttpError;
use crate::middleware::{authenticate, require_role};

#[derive(serde::Deserialize)]
pub struct CodeListQuery {
    pub limit: Option<usize>,
}

pub async fn generate_code(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<RedemptionCode>), HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Cashier])?;
    let code = code_commands::generate_code(&state, &claims.id_number).await?;
    Ok((StatusCode::CREATED, Json(code)))
}

/// Codes issued by the calling cashier, newest first.
pub async fn list_codes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CodeListQuery>,
) -> Result<Json<Vec<RedemptionCode>>, HttpError> {
    let claims = authenticate(&state.config, &headers)?;
    require_role(&claims, &[Role::Cashier])?;
    let codes = code_queries::list_codes(&state, Some(&claims.id_number), query.limit).await?;
    Ok(Json(codes))
}
