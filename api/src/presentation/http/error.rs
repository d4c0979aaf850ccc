use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AccountError;

/// Envelope for plain acknowledgements and every error reply.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub status: u16,
    pub msg: String,
}

impl MessageResponse {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            msg: msg.into(),
        }
    }

    pub fn ok() -> Json<Self> {
        Json(Self::new(StatusCode::OK, "OK"))
    }
}

#[derive(Debug)]
pub enum ApiError {
    Account(AccountError),
    BadRequest(String),
    Unauthorized,
    Internal(anyhow::Error),
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        ApiError::Account(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Account(AccountError::BadCredentials) => StatusCode::FORBIDDEN,
            ApiError::Account(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Account(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::Account(AccountError::Internal(err)) | ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request_failed");
                "internal server error".to_string()
            }
            ApiError::Account(AccountError::BadCredentials) => "Forbidden".to_string(),
            ApiError::Account(e @ AccountError::UserSetup(_)) => {
                tracing::error!(error = ?e, "user_setup_failed");
                e.to_string()
            }
            ApiError::Account(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized => "Unauthorized".to_string(),
        };
        (status, Json(MessageResponse::new(status, msg))).into_response()
    }
}
