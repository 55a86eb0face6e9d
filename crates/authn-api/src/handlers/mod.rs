//! Route handlers organized by domain.

pub mod auth;
pub mod dev;
pub mod health;
pub mod session;
