//! # authn-core
//!
//! Core crate for the authn service. Contains configuration schemas,
//! the unified error system, and the traits that the session lifecycle
//! engine is wired through (clock, login-attempt hook).
//!
//! This crate has **no** internal dependencies on other authn crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
