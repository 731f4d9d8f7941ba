use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Duration;
use secrecy::ExposeSecret;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Password hashing and verification are memory-hard, so they run on the
/// blocking pool instead of the async workers.
pub struct CredentialService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> CredentialService<UR>
where
    UR: UserRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> CredentialServicePort for CredentialService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let RegisterCommand {
            username,
            email,
            password,
        } = command;

        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(username = %username, "Registration rejected: email already registered");
            return Err(UserError::EmailTaken);
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            tracing::warn!(username = %username, "Registration rejected: username already taken");
            return Err(UserError::UsernameTaken);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash = tokio::task::spawn_blocking(move || {
            authenticator.hash_password(password.expose_secret())
        })
        .await??;

        // The storage constraints settle concurrent registrations of the same identity
        let created_user = self
            .repository
            .create(User::new(username, email, password_hash))
            .await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(
        &self,
        command: LoginCommand,
        ttl: Duration,
    ) -> Result<AuthenticationResult, UserError> {
        let LoginCommand { username, password } = command;

        let user = match Username::new(username.clone()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let (subject, stored_hash) = match user {
            Some(user) => (user.username.as_str().to_string(), Some(user.password_hash)),
            None => (username.clone(), None),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                password.expose_secret(),
                stored_hash.as_deref(),
                &subject,
                ttl,
            )
        })
        .await?;

        match result {
            Ok(token) => {
                tracing::info!(username = %username, expires_at = token.expires_at, "Access token issued");
                Ok(token)
            }
            Err(e) => {
                let err = UserError::from(e);
                if err == UserError::InvalidCredentials {
                    tracing::warn!(username = %username, "Login rejected: invalid credentials");
                }
                Err(err)
            }
        }
    }
}
