//! Credential store backed by the local `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use authn_core::result::AppResult;
use authn_core::traits::Clock;
use authn_database::repositories::UserRepository;
use authn_entity::user::{CreateUser, User};

use super::store::CredentialStore;
use crate::password::PasswordHasher;

/// Plaintext account details for registration.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub is_admin: bool,
}

/// Argon2-verified credentials stored in SQLite.
#[derive(Debug, Clone)]
pub struct LocalCredentialStore {
    users: UserRepository,
    hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
    /// Hash of a throwaway password, verified against when a username is unknown.
    dummy_hash: String,
}

impl LocalCredentialStore {
    /// Creates the store. Hashes one throwaway password up front.
    pub fn new(users: UserRepository, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.hash_password("authn-timing-equalizer")?;
        Ok(Self {
            users,
            hasher,
            clock,
            dummy_hash,
        })
    }

    /// Hashes the password and inserts a new user.
    ///
    /// A taken username or email is a `Conflict`.
    pub async fn register(&self, account: NewAccount) -> AppResult<User> {
        let password_hash = self.hasher.hash_password(&account.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: account.username,
                password_hash,
                email: account.email,
                given_name: account.given_name,
                family_name: account.family_name,
                is_admin: account.is_admin,
                password_changed_at: self.clock.now(),
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// The underlying repository.
    pub fn users(&self) -> &UserRepository {
        &self.users
    }
}

#[async_trait]
impl CredentialStore for LocalCredentialStore {
    async fn lookup(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_by_username(username).await
    }

    async fn lookup_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    async fn verify(&self, user: &User, password: &str) -> AppResult<bool> {
        self.hasher.verify_password(password, &user.password_hash)
    }

    async fn verify_unknown(&self, password: &str) {
        if let Err(e) = self.hasher.verify_password(password, &self.dummy_hash) {
            debug!(error = %e, "Dummy verification failed");
        }
    }
}
