use thiserror::Error;

use crate::user::errors::UserError;

/// Reasons a bearer token does not resolve to an active user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject does not exist")]
    UnknownSubject,

    #[error("User account is inactive")]
    Inactive,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<auth::JwtError> for IdentityError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::BadSignature => IdentityError::BadSignature,
            auth::JwtError::Expired => IdentityError::Expired,
            auth::JwtError::Malformed(_)
            | auth::JwtError::EncodingFailed(_)
            | auth::JwtError::InvalidKey { .. } => IdentityError::Malformed,
        }
    }
}

impl From<UserError> for IdentityError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::StorageUnavailable(msg) => IdentityError::StorageUnavailable(msg),
            // A stored row that no longer validates is not a usable account
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                IdentityError::UnknownSubject
            }
            other => IdentityError::Internal(other.to_string()),
        }
    }
}
