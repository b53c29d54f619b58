use anyhow::anyhow;
use tracing::{info, warn};

use backend_domain::utils::current_millis;
use backend_domain::{
    AuthResponse, CateringAllowance, LoginRequest, RegisterRequest, Role, User, UserProfile,
};

use crate::token::issue_token;
use crate::{AppError, AppState};

const MIN_PASSWORD_LENGTH: usize = 8;

pub async fn register(state: &AppState, payload: RegisterRequest) -> Result<AuthResponse, AppError> {
    let role = registrable_role(&payload.role)?;
    let user = build_user(state, payload, role)?;
    if !state.users.insert_user(&user).await? {
        return Err(AppError::BadRequest(
            "id number or email already registered".to_string(),
        ));
    }
    state.dashboard.invalidate_prefix("dashboard");
    let token = token_for(state, &user)?;
    Ok(AuthResponse {
        user: UserProfile::from(&user),
        token,
    })
}

/// Admin-side account creation; any role is allowed here.
pub async fn create_user(state: &AppState, payload: RegisterRequest) -> Result<UserProfile, AppError> {
    let role = Role::parse(&payload.role)
        .ok_or_else(|| AppError::BadRequest(format!("invalid role '{}'", payload.role.trim())))?;
    let user = build_user(state, payload, role)?;
    if !state.users.insert_user(&user).await? {
        return Err(AppError::BadRequest(
            "id number or email already registered".to_string(),
        ));
    }
    state.dashboard.invalidate_prefix("dashboard");
    Ok(UserProfile::from(&user))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> Result<AuthResponse, AppError> {
    let now = current_millis();
    let id_number = normalize_required_text(payload.id_number, "id_number")?;

    {
        let mut throttle = state.throttle.lock().await;
        throttle.sweep(now);
        if throttle.remaining(&id_number, now) == 0 {
            state.metrics.record_login_failure();
            return Err(AppError::LoginRejected {
                attempts_remaining: 0,
            });
        }
    }

    let user = state.users.fetch_user(&id_number).await?;
    let verified = user
        .as_ref()
        .map(|user| bcrypt::verify(&payload.password, &user.password_hash).unwrap_or(false))
        .unwrap_or(false);
    let Some(user) = user.filter(|_| verified) else {
        let attempts_remaining = {
            let mut throttle = state.throttle.lock().await;
            throttle.record_failure(&id_number, now)
        };
        state.metrics.record_login_failure();
        return Err(AppError::LoginRejected { attempts_remaining });
    };

    state.throttle.lock().await.clear(&id_number);
    state.metrics.record_login();
    let token = token_for(state, &user)?;
    Ok(AuthResponse {
        user: UserProfile::from(&user),
        token,
    })
}

/// First-run convenience: creates the configured admin account when no
/// user with that id number exists yet.
pub async fn seed_admin(state: &AppState) -> anyhow::Result<()> {
    let (Some(id_number), Some(password)) = (
        state.config.admin_id_number.clone(),
        state.config.admin_password.clone(),
    ) else {
        return Ok(());
    };
    if state.users.fetch_user(&id_number).await?.is_some() {
        return Ok(());
    }
    let now = current_millis();
    let user = User {
        id_number: id_number.clone(),
        name: "Administrator".to_string(),
        email: format!("{}@mensa.local", id_number),
        university: String::new(),
        role: Role::Admin,
        password_hash: bcrypt::hash(&password, bcrypt::DEFAULT_COST)?,
        points: 0,
        points_used: 0,
        catering: CateringAllowance::fresh(&state.config.catering_defaults, now),
        last_feedback_at: None,
        created_at: now,
    };
    if state.users.insert_user(&user).await? {
        info!("seeded admin account '{}'", id_number);
    } else {
        warn!("admin seed skipped: id number or email already taken");
    }
    Ok(())
}

fn build_user(state: &AppState, payload: RegisterRequest, role: Role) -> Result<User, AppError> {
    let id_number = normalize_required_text(payload.id_number, "id_number")?;
    let name = normalize_required_text(payload.name, "name")?;
    let email = normalize_required_text(payload.email, "email")?.to_lowercase();
    if !email.contains('@') {
        return Err(AppError::BadRequest("email is invalid".to_string()));
    }
    let university = normalize_required_text(payload.university, "university")?;
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|err| AppError::Internal(anyhow!("password hash failed: {err}")))?;
    let now = current_millis();
    Ok(User {
        id_number,
        name,
        email,
        university,
        role,
        password_hash,
        points: 0,
        points_used: 0,
        catering: CateringAllowance::fresh(&state.config.catering_defaults, now),
        last_feedback_at: None,
        created_at: now,
    })
}

fn token_for(state: &AppState, user: &User) -> Result<String, AppError> {
    let ttl_millis = (state.config.token_ttl_hours as i64) * 3_600_000;
    issue_token(
        &state.config.auth_token_secret,
        &user.id_number,
        user.role,
        ttl_millis,
        current_millis(),
    )
}

fn registrable_role(value: &str) -> Result<Role, AppError> {
    let role = Role::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("invalid role '{}'", value.trim())))?;
    if !role.is_patron() {
        return Err(AppError::BadRequest(
            "staff accounts are created by an administrator".to_string(),
        ));
    }
    Ok(role)
}

fn normalize_required_text(value: String, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registrable_role_accepts_patrons_only() {
        assert_eq!(registrable_role("student").expect("student"), Role::Student);
        assert_eq!(registrable_role("guest").expect("guest"), Role::Guest);
        let err = registrable_role("admin").expect_err("reject admin");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("administrator")),
            _ => panic!("unexpected error type"),
        }
    }

    #[test]
    fn registrable_role_rejects_unknown_values() {
        let err = registrable_role("wizard").expect_err("reject unknown");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("wizard")),
            _ => panic!("unexpected error type"),
        }
    }

    #[test]
    fn normalize_required_text_trims_and_rejects_empty() {
        let value = normalize_required_text("  2021001 ".to_string(), "id_number").expect("trim");
        assert_eq!(value, "2021001");
        let err = normalize_required_text("   ".to_string(), "name").expect_err("reject empty");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("name")),
            _ => panic!("unexpected error type"),
        }
    }
}
