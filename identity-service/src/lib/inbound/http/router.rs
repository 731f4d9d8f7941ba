use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::health::health;
use super::handlers::health::root;
use super::handlers::issue_token::issue_token;
use super::handlers::register::register;
use super::middleware::authenticate;
use crate::domain::identity::ports::IdentityResolverPort;
use crate::domain::user::ports::CredentialServicePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub identity_resolver: Arc<dyn IdentityResolverPort>,
    pub token_ttl: chrono::Duration,
}

pub fn create_router(
    credential_service: Arc<dyn CredentialServicePort>,
    identity_resolver: Arc<dyn IdentityResolverPort>,
    token_ttl: chrono::Duration,
) -> Router {
    let state = AppState {
        credential_service,
        identity_resolver,
        token_ttl,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/token", post(issue_token));

    let protected_routes = Router::new()
        .route("/users/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers are left out of the span so bearer tokens never reach the logs
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

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
