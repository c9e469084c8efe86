//! Account use cases: user registration.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use nile_core::{Email, EmailError, UserId};

use crate::models::User;
use crate::repository::{RepositoryError, UserRepository};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A user with this email is already registered.
    #[error("a user with this email address already exists")]
    EmailTaken,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Fields for a new user registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub shipping_address: Option<String>,
}

/// Account service.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Create an account service over the given repository.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// The password is digested with Argon2id before it reaches the
    /// repository; plaintext is never stored.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email format is invalid.
    /// Returns `AccountError::WeakPassword` if the password is too short.
    /// Returns `AccountError::EmailTaken` if the email is already registered.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AccountError> {
        let email = Email::parse(&new_user.email)?;
        validate_password(&new_user.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let hashed_password = hash_password(&new_user.password)?;

        let user = User {
            id: UserId::generate(),
            email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            hashed_password,
            shipping_address: new_user.shipping_address,
            cart_items: Vec::new(),
        };

        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        Ok(user)
    }
}

fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

/// Verify a password against a stored digest.
#[cfg(test)]
fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
