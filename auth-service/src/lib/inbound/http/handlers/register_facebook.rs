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

/// POST /v1/auth/register-fb
pub async fn register_facebook<AS, ET>(
    State(handler): State<AuthHandler<AS, ET>>,
    body: Result<Json<FacebookRegisterRequest>, JsonRejection>,
) -> Response
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => return handler.fail(rejection),
    };

    match handler.service.register_facebook(&form.access_token).await {
        Ok(token) => {
            ApiSuccess::new(StatusCode::CREATED, TokenResponse::new(token)).into_response()
        }
        Err(e) => handler.fail(e),
    }
}

/// Facebook user access token obtained by the client-side login dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookRegisterRequest {
    pub access_token: String,
}
