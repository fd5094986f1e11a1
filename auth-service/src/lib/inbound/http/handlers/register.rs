use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::ApiSuccess;
use super::AuthHandler;
use super::TokenResponse;
use crate::account::models::RegisterForm;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::errors::ErrorTranslator;

/// POST /v1/auth/register
///
/// The body is the service's [`RegisterForm`], passed through whole.
pub async fn register<AS, ET>(
    State(handler): State<AuthHandler<AS, ET>>,
    body: Result<Json<RegisterForm>, JsonRejection>,
) -> Response
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => return handler.fail(rejection),
    };

    match handler.service.register(form).await {
        Ok(token) => {
            ApiSuccess::new(StatusCode::CREATED, TokenResponse::new(token)).into_response()
        }
        Err(e) => handler.fail(e),
    }
}
