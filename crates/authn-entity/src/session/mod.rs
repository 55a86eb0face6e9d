//! Session domain entities.

pub mod model;
pub mod scope;

pub use model::{CreateSession, Session, SessionState};
pub use scope::RevokeScope;
