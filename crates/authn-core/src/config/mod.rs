//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered TOML files and `AUTHN__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section. The loaded
//! [`AppConfig`] is built once at startup and handed to constructors;
//! nothing reads configuration from a global.

pub mod app;
pub mod database;
pub mod dev;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::dev::DevConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{CookieConfig, SameSitePolicy, SessionConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session lifetime policy.
    #[serde(default)]
    pub session: SessionConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub cookie: CookieConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Development-only switches.
    #[serde(default)]
    pub dev: DevConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default` with the `config/{env}` overlay and
    /// environment variables prefixed with `AUTHN__` (sections separated
    /// by `__`, e.g. `AUTHN__COOKIE__SECURE=true`). The result is
    /// validated before it is returned.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTHN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that clients or the engine cannot honour.
    pub fn validate(&self) -> Result<(), AppError> {
        self.cookie.validate()?;
        self.session.validate()?;
        Ok(())
    }
}
