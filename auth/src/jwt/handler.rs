use std::collections::HashSet;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler: issues and verifies access tokens.
///
/// Tokens use the compact `header.payload.signature` form, signed with HS256
/// (HMAC with SHA-256) over a process-wide secret. Verification is a pure
/// function of the token, the key and the current time.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    leeway: i64,
}

impl JwtHandler {
    /// Minimum secret length accepted for HS256.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm and no leeway
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is shorter than 256 bits (32 bytes)
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_BYTES {
            return Err(JwtError::InvalidKey {
                min: Self::MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            leeway: 0,
        })
    }

    /// Accept tokens up to `seconds` past their expiry.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = i64::try_from(seconds).unwrap_or(i64::MAX);
        self
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token for `subject` valid for `ttl` from `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(subject, issued_at, ttl))
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token could not be decoded
    /// * `BadSignature` - Signature does not match the payload
    /// * `Expired` - Token is past its expiry
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token at `now` (Unix timestamp) and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token could not be decoded
    /// * `BadSignature` - Signature does not match the payload
    /// * `Expired` - Token is past its expiry
    pub fn verify_at(&self, token: &str, now: i64) -> Result<String, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(now, self.leeway) {
            return Err(JwtError::Expired);
        }

        Ok(claims.sub)
    }

    /// Decode a token and check its signature, without checking expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token could not be decoded
    /// * `BadSignature` - Signature does not match the payload
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::BadSignature
                    }
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
