//! Authentication service.
//!
//! Provides password registration and login, and issues session tokens.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TOKEN_TTL_SECONDS, TokenError, TokenIssuer};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use stockroom_core::api::{LoginRequest, SignupRequest};
use stockroom_core::{Email, UserRole, Username};

use crate::db::{RepositoryError, UserStore};
use crate::models::user::{NewUser, User};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, tokens: &'a TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// Register a new user with role `user` and return a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername`, `AuthError::InvalidEmail` or
    /// `AuthError::WeakPassword` for bad input.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    pub async fn register(&self, request: &SignupRequest) -> Result<String, AuthError> {
        let user = create_account(
            self.users,
            &request.username,
            &request.password,
            request.email.as_deref(),
            UserRole::User,
        )
        .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(self.tokens.issue(user.id, user.username.as_str())?)
    }

    /// Login with username and password and return a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_username(request.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if let Err(e) = verify_password(&request.password, &user.password_hash) {
            tracing::warn!(username = %user.username, "Login failed: wrong password");
            return Err(e);
        }

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(self.tokens.issue(user.id, user.username.as_str())?)
    }
}

/// Validate, hash and persist a user with an explicit role.
///
/// Shared by signup and the operator tooling, which does not issue tokens.
///
/// # Errors
///
/// Returns `AuthError::InvalidUsername`, `AuthError::InvalidEmail` or
/// `AuthError::WeakPassword` for bad input.
/// Returns `AuthError::UsernameTaken` if the username is already registered.
pub async fn create_account(
    users: &dyn UserStore,
    username: &str,
    password: &str,
    email: Option<&str>,
    role: UserRole,
) -> Result<User, AuthError> {
    let username = Username::parse(username)?;
    let email = Email::parse_optional(email)?;
    validate_password(password)?;

    let password_hash = hash_password(password)?;

    users
        .create(NewUser {
            username,
            password_hash,
            email,
            role,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UsernameTaken,
            other => AuthError::Repository(other),
        })
}

// =============================================================================
// Password Helpers
// =============================================================================

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::WeakPassword("password is required".to_owned()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC string.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db::MemoryStore;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&SecretString::from("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6"))
    }

    fn signup(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_owned(),
            password: password.to_owned(),
            email: None,
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &a).is_ok());
        assert!(verify_password("hunter23", &a).is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("").is_err());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[tokio::test]
    async fn test_register_issues_verifiable_token() {
        let store = MemoryStore::new();
        let tokens = issuer();
        let auth = AuthService::new(&store, &tokens);

        let token = auth.register(&signup("alice", "wonderland")).await.unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, claims.id);
        assert_eq!(stored.role, UserRole::User);
        assert_ne!(stored.password_hash, "wonderland");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        let tokens = issuer();
        let auth = AuthService::new(&store, &tokens);

        auth.register(&signup("bob", "builder1")).await.unwrap();
        let err = auth.register(&signup("bob", "builder2")).await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let store = MemoryStore::new();
        let tokens = issuer();
        let auth = AuthService::new(&store, &tokens);
        auth.register(&signup("carol", "correct-horse")).await.unwrap();

        let wrong_password = auth.authenticate(&login("carol", "battery")).await;
        let unknown_user = auth.authenticate(&login("mallory", "battery")).await;
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));

        let token = auth
            .authenticate(&login("carol", "correct-horse"))
            .await
            .unwrap();
        assert_eq!(tokens.verify(&token).unwrap().username, "carol");
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let store = MemoryStore::new();
        let tokens = issuer();
        let auth = AuthService::new(&store, &tokens);

        let mut request = signup("dave", "secret-ish");
        request.email = Some("not-an-email".to_owned());
        assert!(matches!(
            auth.register(&request).await,
            Err(AuthError::InvalidEmail(_))
        ));

        request.email = Some("   ".to_owned());
        assert!(auth.register(&request).await.is_ok());
    }
}
