//! Custom Axum extractors.

pub mod auth;
pub mod client;

pub use auth::{AuthSession, CsrfHeader};
pub use client::ClientMeta;
