use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub name: String,
    pub version: String,
}

pub async fn root() -> ApiSuccess<RootResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        RootResponseData {
            message: format!("{} is running", SERVICE_NAME),
        },
    )
}

/// Liveness probe. Does not touch the database.
pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "healthy".to_string(),
            name: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        },
    )
}
