use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::AuthHandler;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::errors::ErrorTranslator;

/// POST /v1/password/reset
pub async fn reset_password<AS, ET>(
    State(handler): State<AuthHandler<AS, ET>>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Response
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => return handler.fail(rejection),
    };

    match handler
        .service
        .reset_password(&form.token, &form.password)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handler.fail(e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}
