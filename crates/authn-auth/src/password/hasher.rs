//! Password hashes for locally stored accounts.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) stored in
//! `users.password_hash`. The parameters travel inside the string, so
//! accounts created under older defaults still verify.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use authn_core::error::AppError;

/// Argon2id with the crate's default cost parameters and a fresh salt per
/// account.
///
/// Used on registration, on every login attempt against a known user, and
/// once against a throwaway hash when the username is unknown.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Produces the PHC string to store for a new account.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Could not hash account password: {e}")))
    }

    /// Checks a login password against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)` and becomes `invalid_credentials`
    /// upstream. A stored value that is not a PHC string means the users
    /// table is corrupt and is reported as an internal error.
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let stored = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("Stored password hash is unreadable: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password check could not complete: {e}"
            ))),
        }
    }
}
