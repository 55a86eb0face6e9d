//! # authn-auth
//!
//! Credential verification and the session lifecycle engine.
//!
//! ## Modules
//!
//! - `token`: random session identifiers, CSRF tokens and expiry policy
//! - `password`: Argon2id password hashing
//! - `credential`: user lookup and password verification
//! - `csrf`: CSRF token comparison
//! - `session`: session persistence, lifecycle engine and maintenance

pub mod credential;
pub mod csrf;
pub mod password;
pub mod session;
pub mod token;

pub use credential::{CredentialStore, LocalCredentialStore, NewAccount};
pub use password::PasswordHasher;
pub use session::{LoginResult, SessionCleanup, SessionManager, SessionStore, ValidatedSession};
pub use token::TokenGenerator;
