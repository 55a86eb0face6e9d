//! # authn-api
//!
//! HTTP boundary for the authn service built on Axum.
//!
//! Maps requests onto the session lifecycle engine, and engine results
//! onto JSON bodies, status codes and `Set-Cookie` headers.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
