//! Removal of dead session rows.
//!
//! The engine never deletes sessions; revoked and expired rows stay in
//! the table until an operator purges them.

use std::sync::Arc;

use tracing::info;

use authn_core::result::AppResult;
use authn_core::traits::Clock;
use authn_database::repositories::SessionRepository;

const SECONDS_PER_DAY: i64 = 86_400;

/// Deletes sessions that have been dead for a while.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    repo: SessionRepository,
    clock: Arc<dyn Clock>,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(repo: SessionRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Deletes sessions expired, or revoked and idle, for more than
    /// `days` days. Returns the number of rows deleted.
    pub async fn purge_older_than(&self, days: u32) -> AppResult<u64> {
        let cutoff = self.clock.now() - i64::from(days) * SECONDS_PER_DAY;
        let purged = self.repo.purge_dead(cutoff).await?;

        if purged > 0 {
            info!(count = purged, cutoff, "Purged dead sessions");
        }
        Ok(purged)
    }
}
