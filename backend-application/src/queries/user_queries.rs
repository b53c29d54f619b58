use backend_domain::utils::current_millis;
use backend_domain::{Role, UserProfile};

use crate::{AppError, AppState};

/// Profile read; applies the lazy catering reset before answering.
pub async fn profile(state: &AppState, id_number: &str) -> Result<UserProfile, AppError> {
    let user = state
        .ledger
        .refresh_catering(id_number, &state.config.catering_defaults, current_millis())
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
    Ok(UserProfile::from(&user))
}

pub async fn list_users(
    state: &AppState,
    role: Option<String>,
) -> Result<Vec<UserProfile>, AppError> {
    let role = match role {
        Some(value) => Some(
            Role::parse(&value)
                .ok_or_else(|| AppError::BadRequest(format!("invalid role '{}'", value.trim())))?,
        ),
        None => None,
    };
    let mut users = state.users.list_users(role).await?;
    users.sort_by(|a, b| a.id_number.cmp(&b.id_number));
    Ok(users.iter().map(UserProfile::from).collect())
}
