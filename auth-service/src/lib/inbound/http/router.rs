use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::errors::ErrorTranslator;
use super::handlers::AuthHandler;
use crate::account::ports::AuthServicePort;

/// Build the application router with request tracing and CORS.
pub fn create_router<AS, ET>(auth_handler: AuthHandler<AS, ET>) -> Router
where
    AS: AuthServicePort,
    ET: ErrorTranslator,
{
    // Request headers may carry credentials and are not recorded
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    auth_handler
        .set_routes(Router::new())
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
}
