//! Repository implementations for authn entities.

pub mod session;
pub mod user;

pub use session::SessionRepository;
pub use user::UserRepository;
