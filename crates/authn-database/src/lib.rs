//! # authn-database
//!
//! SQLite connection management, embedded migrations, and the concrete
//! session and user repositories.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{SessionRepository, UserRepository};
