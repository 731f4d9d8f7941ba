use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::ActiveUser;
use crate::domain::identity::ports::IdentityResolverPort;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Request guard: verifies a bearer token and loads the active user behind it.
pub struct IdentityResolver<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> IdentityResolver<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> IdentityResolverPort for IdentityResolver<UR>
where
    UR: UserRepository,
{
    async fn resolve(&self, token: &str) -> Result<ActiveUser, IdentityError> {
        let subject = self.authenticator.validate_token(token)?;

        // Subjects are always issued from stored usernames
        let username = Username::new(subject).map_err(|_| IdentityError::UnknownSubject)?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(IdentityError::UnknownSubject)?;

        ActiveUser::try_from(user)
    }
}
