use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Errors surfaced to API callers as `{ok: false, error, code}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid passcode")]
    Passcode,
    #[error("Unknown leaderboard: {0}")]
    UnknownBoard(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    code: &'static str,
}

impl ApiError {
    /// Unique or primary key violations become `BadRequest` with `message`;
    /// any other storage error stays internal.
    pub fn on_conflict(error: anyhow::Error, message: impl Into<String>) -> Self {
        let conflict = matches!(
            error.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        );
        if conflict {
            ApiError::BadRequest(message.into())
        } else {
            ApiError::Internal(error)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::UnknownBoard(_) | ApiError::UnknownResource(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Passcode => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Passcode => "PASSCODE",
            ApiError::UnknownBoard(_) => "BOARD",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UnknownResource(_) => "RESOURCE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            log::error!("Request failed: {:?}", e);
        }

        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type ApiResult<T = Response> = Result<T, ApiError>;
