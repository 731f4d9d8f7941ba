use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::ActiveUser;

/// Returns the profile of the user the bearer token resolved to.
pub async fn current_user(
    Extension(user): Extension<ActiveUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ActiveUser> for CurrentUserResponseData {
    fn from(user: &ActiveUser) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_str().to_string(),
            email: user.email().as_str().to_string(),
            is_active: user.is_active(),
            created_at: user.created_at(),
        }
    }
}
