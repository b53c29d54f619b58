use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid credentials")]
    LoginRejected { attempts_remaining: u32 },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
