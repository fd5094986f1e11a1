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

/// POST /v1/password/forgot
///
/// Responds 204 with an empty body once the reset mail is handed off.
pub async fn forgot_password<AS, ET>(
    State(handler): State<AuthHandler<AS, ET>>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
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
        .send_password_reset_link(&form.email, &form.link)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handler.fail(e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    /// URL template for the reset page, e.g. `https://app.example.com/reset/{token}`
    pub link: String,
}
