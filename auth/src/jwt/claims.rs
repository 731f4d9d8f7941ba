use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// Field order is fixed so the serialized payload is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username the token was issued to)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject`, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token resolves to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.num_seconds()),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid over `[iat, exp)`: at `exp` itself it is already
    /// expired, so a zero ttl produces a token that never verifies. `leeway`
    /// extends validity by that many seconds.
    pub fn is_expired(&self, current_timestamp: i64, leeway: i64) -> bool {
        current_timestamp >= self.exp.saturating_add(leeway)
    }
}
