use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use serde::Serialize;

use super::errors::ErrorTranslator;
use super::errors::HandlerError;
use crate::account::ports::AuthServicePort;

pub mod forgot_password;
pub mod login;
pub mod register;
pub mod register_facebook;
pub mod reset_password;

pub const LOGIN_PATH: &str = "/v1/auth/login";
pub const REGISTER_PATH: &str = "/v1/auth/register";
pub const REGISTER_FACEBOOK_PATH: &str = "/v1/auth/register-fb";
pub const FORGOT_PASSWORD_PATH: &str = "/v1/password/forgot";
pub const RESET_PASSWORD_PATH: &str = "/v1/password/reset";

/// HTTP boundary of the auth service.
///
/// Holds the service and the error translator; cloning only bumps two
/// reference counts, so one instance serves every request.
pub struct AuthHandler<AS, ET>
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    service: Arc<AS>,
    errors: Arc<ET>,
}

impl<AS, ET> Clone for AuthHandler<AS, ET>
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            errors: Arc::clone(&self.errors),
        }
    }
}

impl<AS, ET> AuthHandler<AS, ET>
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    pub fn new(service: Arc<AS>, errors: Arc<ET>) -> Self {
        Self { service, errors }
    }

    /// Attach the five auth routes to `router`.
    ///
    /// The routes carry their own state, so the host router may use any
    /// state type.
    pub fn set_routes<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let routes: Router<S> = Router::new()
            .route(LOGIN_PATH, post(login::login::<AS, ET>))
            .route(REGISTER_PATH, post(register::register::<AS, ET>))
            .route(
                REGISTER_FACEBOOK_PATH,
                post(register_facebook::register_facebook::<AS, ET>),
            )
            .route(
                FORGOT_PASSWORD_PATH,
                post(forgot_password::forgot_password::<AS, ET>),
            )
            .route(
                RESET_PASSWORD_PATH,
                post(reset_password::reset_password::<AS, ET>),
            )
            .with_state(self);

        router.merge(routes)
    }

    fn fail(&self, error: impl Into<HandlerError>) -> Response {
        self.errors.translate(error.into())
    }
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Success payload of login and both registration routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}
