use chrono::DateTime;
use chrono::Utc;

use crate::domain::identity::errors::IdentityError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Authenticated identity attached to a request.
///
/// Read-only projection of a stored user. Only obtainable from an active
/// user, so holding one proves the account was active when resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUser {
    id: UserId,
    username: Username,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl ActiveUser {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// An `ActiveUser` is active by construction.
    pub fn is_active(&self) -> bool {
        true
    }
}

impl TryFrom<User> for ActiveUser {
    type Error = IdentityError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        if !user.is_active {
            return Err(IdentityError::Inactive);
        }

        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        })
    }
}
