use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED_MESSAGE;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "bearer";

/// Resolves the bearer token to an `ActiveUser` and stores it in the request
/// extensions. Every rejection is a generic 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let user = state
        .identity_resolver
        .resolve(token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let unauthorized = || ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string());

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            unauthorized()
        })?
        .to_str()
        .map_err(|_| unauthorized())?;

    // Auth schemes are case-insensitive
    match value.trim().split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => {
            tracing::debug!("Authorization header is not a bearer credential");
            Err(unauthorized())
        }
    }
}
