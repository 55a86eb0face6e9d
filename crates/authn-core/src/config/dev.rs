//! Development-only switches.

use serde::{Deserialize, Serialize};

/// Development mode configuration.
///
/// With both flags on, the service keeps its own `users` table and
/// exposes `POST /dev/create-user` for seeding accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Master switch for development endpoints.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether users are stored locally rather than in a directory service.
    #[serde(default = "default_true")]
    pub local_users: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            local_users: true,
        }
    }
}

impl DevConfig {
    /// Whether the dev user-creation endpoint may be used.
    pub fn user_seeding_allowed(&self) -> bool {
        self.enabled && self.local_users
    }
}

fn default_true() -> bool {
    true
}
