use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token type reported alongside every issued access token.
pub const TOKEN_TYPE: &str = "bearer";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Built once from the process-wide secret and shared read-only between
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: &'static str,

    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Default lifetime of issued tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `JwtError` - Secret key is unusable
    /// * `PasswordError` - Decoy hash could not be computed
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash("decoy-password-never-matches")?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret)?,
            token_ttl,
            decoy_hash,
        })
    }

    /// Accept tokens up to `seconds` past their expiry.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.jwt_handler = self.jwt_handler.with_leeway(seconds);
        self
    }

    /// Default lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password rejected by policy or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// When `stored_hash` is `None` (no such account) the password is still
    /// checked against a decoy hash, so an unknown subject costs the same as
    /// a wrong password and both fail with `InvalidCredentials`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, if the account exists
    /// * `subject` - Identity to embed in the token
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                let _ = self.password_hasher.verify(password, &self.decoy_hash);
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, ttl)?)
    }

    /// Generate JWT token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, JwtError> {
        let issued_at = Utc::now();
        let access_token = self.jwt_handler.issue_at(subject, ttl, issued_at)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: TOKEN_TYPE,
            expires_at: issued_at.timestamp().saturating_add(ttl.num_seconds()),
        })
    }

    /// Validate a JWT token and return its subject.
    ///
    /// # Errors
    /// * `Malformed`, `BadSignature` or `Expired`
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::minutes(30)).expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "s3cr3t!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, Some(&hash), "alice", authenticator.token_ttl())
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.token_type, "bearer");

        let subject = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("s3cr3t!")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong", Some(&hash), "alice", Duration::minutes(5));
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_unknown_account() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("s3cr3t!", None, "ghost", Duration::minutes(5));
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_does_not_match_decoy() {
        let authenticator = authenticator();

        let result = authenticator.authenticate(
            "decoy-password-never-matches",
            None,
            "ghost",
            Duration::minutes(5),
        );
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_new_rejects_short_secret() {
        let result = Authenticator::new(b"short", Duration::minutes(30));
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::InvalidKey { .. }))
        ));
    }

    #[test]
    fn test_issue_token_expiry() {
        let authenticator = authenticator();

        let before = Utc::now().timestamp();
        let result = authenticator
            .issue_token("alice", Duration::minutes(30))
            .expect("Failed to issue token");
        let after = Utc::now().timestamp();

        assert!(result.expires_at >= before + 30 * 60);
        assert!(result.expires_at <= after + 30 * 60);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
