//! # authn-entity
//!
//! Domain entity models for the authn service. Every struct in this crate
//! represents a database row or a domain value object. Row types derive
//! `sqlx::FromRow`; nothing crosses the store boundary as an untyped map.

pub mod session;
pub mod user;
