//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use authn_auth::credential::{LocalCredentialStore, NewAccount};
use authn_core::error::AppError;
use authn_core::traits::SystemClock;
use authn_database::repositories::UserRepository;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a local user; prompts for the password
    Create {
        /// Username
        username: String,
        /// Email
        #[arg(long)]
        email: Option<String>,
        /// Given name
        #[arg(long)]
        given_name: Option<String>,
        /// Family name
        #[arg(long)]
        family_name: Option<String>,
        /// Grant the admin flag
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: i64,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Admin
    admin: String,
    /// Password changed
    password_changed: String,
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let db = super::connect(&config).await?;
    let users = UserRepository::new(db.pool().clone());

    match &args.command {
        UserCommand::Create {
            username,
            email,
            given_name,
            family_name,
            admin,
        } => {
            let password = dialoguer::Password::new()
                .with_prompt(format!("Password for '{username}'"))
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            if password.is_empty() {
                return Err(AppError::validation("username/password required"));
            }

            let store = LocalCredentialStore::new(users, Arc::new(SystemClock))?;
            let user = store
                .register(NewAccount {
                    username: username.clone(),
                    password,
                    email: email.clone(),
                    given_name: given_name.clone(),
                    family_name: family_name.clone(),
                    is_admin: *admin,
                })
                .await?;

            output::print_success(&format!("User '{}' created (id {})", user.username, user.id));
        }
        UserCommand::List => {
            let rows: Vec<UserRow> = users
                .find_all()
                .await?
                .into_iter()
                .map(|u| UserRow {
                    id: u.id,
                    username: u.username,
                    email: u.email.unwrap_or_default(),
                    admin: if u.is_admin { "yes" } else { "no" }.to_string(),
                    password_changed: output::timestamp(u.password_changed_at),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    db.close().await;
    Ok(())
}
