use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::ActiveUser;

/// Port for resolving bearer tokens to authenticated users.
#[async_trait]
pub trait IdentityResolverPort: Send + Sync + 'static {
    /// Resolve a bearer token to the active user it was issued to.
    ///
    /// Read-only and idempotent: safe to call once per request.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token
    ///
    /// # Returns
    /// The authenticated, active user
    ///
    /// # Errors
    /// * `Malformed` / `BadSignature` / `Expired` - Token verification failed
    /// * `UnknownSubject` - No user with the token's subject exists
    /// * `Inactive` - The user exists but is deactivated
    /// * `StorageUnavailable` - Storage operation failed
    async fn resolve(&self, token: &str) -> Result<ActiveUser, IdentityError>;
}
