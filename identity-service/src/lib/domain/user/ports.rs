use async_trait::async_trait;
use chrono::Duration;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for credential issuance operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// Email uniqueness is checked before username uniqueness.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `UsernameTaken` - Username is already taken
    /// * `InvalidPassword` - Password rejected by hashing policy
    /// * `StorageUnavailable` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Arguments
    /// * `command` - Username and password
    /// * `ttl` - Lifetime of the issued token
    ///
    /// # Returns
    /// Access token with its type and expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `StorageUnavailable` - Storage operation failed
    async fn login(
        &self,
        command: LoginCommand,
        ttl: Duration,
    ) -> Result<auth::AuthenticationResult, UserError>;
}

/// Persistence operations for user credentials.
///
/// Implementations must enforce uniqueness of username and email and report a
/// violation as `UsernameTaken` / `EmailTaken`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already taken
    /// * `EmailTaken` - Email is already registered
    /// * `StorageUnavailable` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageUnavailable` - Storage operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageUnavailable` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
