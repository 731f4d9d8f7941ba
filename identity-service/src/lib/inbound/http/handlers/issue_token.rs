use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use secrecy::SecretString;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

/// OAuth2 password-flow token endpoint.
///
/// Unknown usernames and wrong passwords produce the same 401 response.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(body): Form<TokenRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let command = LoginCommand::new(body.username, SecretString::from(body.password));

    state
        .credential_service
        .login(command, state.token_ttl)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

/// Form-encoded request body (`application/x-www-form-urlencoded`)
#[derive(Deserialize)]
pub struct TokenRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<auth::AuthenticationResult> for TokenResponseData {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
        }
    }
}
