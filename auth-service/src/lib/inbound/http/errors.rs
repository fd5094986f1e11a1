use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::account::errors::AuthError;
use crate::account::errors::FacebookError;

/// Failure raised while serving one auth request.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Request body was not valid JSON for the expected form.
    #[error(transparent)]
    Decode(#[from] JsonRejection),

    /// The auth service refused or failed the operation.
    #[error(transparent)]
    Service(#[from] AuthError),
}

/// Turns a [`HandlerError`] into the complete HTTP response.
///
/// Handlers never classify errors themselves; they hand every failure to the
/// translator exactly once and return what it produces.
pub trait ErrorTranslator: Send + Sync + 'static {
    fn translate(&self, error: HandlerError) -> Response;
}

/// Default translator rendering [`ApiError`] JSON bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorTranslator;

impl ErrorTranslator for JsonErrorTranslator {
    fn translate(&self, error: HandlerError) -> Response {
        ApiError::from(error).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadGateway(String),
    UnprocessableEntity(String),
    BadRequest(String),
    PayloadTooLarge(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "Upstream provider failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Identity provider unavailable".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<HandlerError> for ApiError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Decode(rejection) => ApiError::from(rejection),
            HandlerError::Service(err) => ApiError::from(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(rejection.body_text()),
            JsonRejection::BytesRejection(_)
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                ApiError::PayloadTooLarge(rejection.body_text())
            }
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_)
            | AuthError::InvalidName(_)
            | AuthError::InvalidLink(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidResetToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::EmailAlreadyExists(_) | AuthError::FacebookAccountAlreadyLinked(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::EmailNotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::Facebook(FacebookError::InvalidToken(_)) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Facebook(FacebookError::MissingEmail) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::Facebook(FacebookError::Upstream(_)) => ApiError::BadGateway(err.to_string()),
            AuthError::Mailer(_)
            | AuthError::Token(_)
            | AuthError::Password(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// JSON error envelope: `{"status_code": 401, "data": {"message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    data: ApiErrorData,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
