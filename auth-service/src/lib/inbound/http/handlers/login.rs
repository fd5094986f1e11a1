use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::AuthHandler;
use super::TokenResponse;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::errors::ErrorTranslator;

/// POST /v1/auth/login
pub async fn login<AS, ET>(
    State(handler): State<AuthHandler<AS, ET>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => return handler.fail(rejection),
    };

    match handler.service.login(&form.email, &form.password).await {
        Ok(token) => ApiSuccess::new(StatusCode::OK, TokenResponse::new(token)).into_response(),
        Err(e) => handler.fail(e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
