//! Session maintenance CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use authn_auth::session::{SessionCleanup, SessionStore};
use authn_core::error::AppError;
use authn_core::traits::{Clock, SystemClock};
use authn_database::repositories::SessionRepository;
use authn_entity::session::SessionState;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List a user's sessions
    List {
        /// User ID
        #[arg(long)]
        user_id: i64,
    },
    /// Revoke every session of a user
    RevokeUser {
        /// User ID
        #[arg(long)]
        user_id: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Delete revoked and expired sessions older than a cutoff
    Purge {
        /// Age in days past death before a row is deleted
        #[arg(long, default_value_t = 30)]
        older_than_days: u32,
    },
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Session ID prefix
    id: String,
    /// State
    state: String,
    /// IP Address
    ip: String,
    /// Last seen
    last_seen: String,
    /// Idle expiry
    expires: String,
    /// Absolute expiry
    absolute: String,
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let db = super::connect(&config).await?;
    let repo = SessionRepository::new(db.pool().clone());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = SessionStore::new(repo.clone(), &config.session, Arc::clone(&clock));

    match &args.command {
        SessionCommand::List { user_id } => {
            let now = clock.now();
            let rows: Vec<SessionRow> = store
                .list_for_user(*user_id)
                .await?
                .iter()
                .map(|s| SessionRow {
                    id: s.log_id().to_string(),
                    state: match s.state_at(now) {
                        SessionState::Active => "active",
                        SessionState::Expired => "expired",
                        SessionState::Revoked => "revoked",
                    }
                    .to_string(),
                    ip: s.ip.clone().unwrap_or_else(|| "-".to_string()),
                    last_seen: output::timestamp(s.last_seen),
                    expires: output::timestamp(s.expires_at),
                    absolute: output::timestamp(s.absolute_expires_at),
                })
                .collect();

            output::print_list(&rows, format);
        }
        SessionCommand::RevokeUser { user_id, force } => {
            let prompt = format!("Revoke every session of user {user_id}?");
            if !super::confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            let revoked = store.revoke_user(*user_id).await?;
            output::print_success(&format!("Revoked {revoked} session(s) of user {user_id}"));
        }
        SessionCommand::Purge { older_than_days } => {
            let purged = SessionCleanup::new(repo, clock)
                .purge_older_than(*older_than_days)
                .await?;
            output::print_success(&format!("Purged {purged} dead session(s)"));
        }
    }

    db.close().await;
    Ok(())
}
