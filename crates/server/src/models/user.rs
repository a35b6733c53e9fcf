//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use std::fmt;

use chrono::{DateTime, Utc};

use stockroom_core::{Email, UserId, UserRole, Username};

/// A registered account.
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: Username,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Optional contact address.
    pub email: Option<Email>,
    /// Access role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// A user that has not been persisted yet.
#[derive(Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub email: Option<Email>,
    pub role: UserRole,
}

impl NewUser {
    /// Attach the store-assigned id and creation time.
    #[must_use]
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            email: self.email,
            role: self.role,
            created_at,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}
