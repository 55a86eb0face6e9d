//! User lookup and password verification.

pub mod local;
pub mod store;

pub use local::{LocalCredentialStore, NewAccount};
pub use store::CredentialStore;
