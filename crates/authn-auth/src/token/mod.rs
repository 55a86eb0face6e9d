//! Session identifier and CSRF token generation.

pub mod generator;

pub use generator::TokenGenerator;
