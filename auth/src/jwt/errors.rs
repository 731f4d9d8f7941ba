use thiserror::Error;

/// Error type for JWT operations.
///
/// `Malformed`, `BadSignature` and `Expired` are the verification
/// rejections; the other variants only occur when building a handler or
/// signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    InvalidKey { min: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
