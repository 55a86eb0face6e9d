//! Session lifecycle management: persistence, validation, revocation
//! and maintenance.

pub mod cleanup;
pub mod manager;
pub mod store;

pub use cleanup::SessionCleanup;
pub use manager::{LoginResult, SessionManager, ValidatedSession};
pub use store::SessionStore;
