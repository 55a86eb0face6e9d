//! Revocation scope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which sessions a revocation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeScope {
    /// Only the named session.
    Single,
    /// Every session belonging to the named session's user.
    AllForUser,
}

impl RevokeScope {
    /// Scope requested by a logout call.
    pub fn for_logout(all_devices: bool) -> Self {
        if all_devices {
            Self::AllForUser
        } else {
            Self::Single
        }
    }
}

impl fmt::Display for RevokeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::AllForUser => write!(f, "all_for_user"),
        }
    }
}
