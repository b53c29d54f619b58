use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    Forbidden,
    BadRequest(String),
    NotFound(String),
    LoginRejected { attempts_remaining: u32 },
    Internal(String),
}

impl From<backend_application::AppError> for HttpError {
    fn from(value: backend_application::AppError) -> Self {
        match value {
            backend_application::AppError::Unauthorized => HttpError::Unauthorized,
            backend_application::AppError::Forbidden => HttpError::Forbidden,
            backend_application::AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            backend_application::AppError::NotFound(msg) => HttpError::NotFound(msg),
            backend_application::AppError::LoginRejected { attempts_remaining } => {
                HttpError::LoginRejected { attempts_remaining }
            }
            backend_application::AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts_remaining: Option<u32>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, attempts_remaining) = match self {
            HttpError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), None)
            }
            HttpError::Forbidden => (StatusCode::FORBIDDEN, "forbidden".to_string(), None),
            HttpError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, format!("bad request: {}", msg), None)
            }
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::LoginRejected { attempts_remaining } => (
                StatusCode::BAD_REQUEST,
                "invalid credentials".to_string(),
                Some(attempts_remaining),
            ),
            HttpError::Internal(msg) => {
                error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };
        (
            status,
            Json(ErrorBody {
                error: message,
                attempts_remaining,
            }),
        )
            .into_response()
    }
}
