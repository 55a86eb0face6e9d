//! Core traits defined in `authn-core` and implemented or consumed by other crates.

pub mod clock;
pub mod login_hook;

pub use clock::{Clock, ManualClock, SystemClock};
pub use login_hook::{LoginAttemptHook, NoopLoginHook};
