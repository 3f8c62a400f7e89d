//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so a partial file
//! (or no file at all) still produces a usable configuration.

pub mod app;
pub mod auth;
pub mod console;
pub mod database;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::console::ConsoleConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
///
/// `TENDER__AUTH__API_KEY=...` overrides `auth.api_key`.
pub const ENV_PREFIX: &str = "TENDER";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (file + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Identity provider, allow-list, and session settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Live feed and WebSocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Vessel and operator console settings.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with an optional `config/{TENDER_ENV}` overlay
    /// and environment variables prefixed with `TENDER__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("TENDER_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .with_list_parse_key("console.tender_labels")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject combinations the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.provider == database::PROVIDER_POSTGRES && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.auth.session_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.session_secret must not be empty"));
        }
        if self.auth.provider == auth::PROVIDER_IDENTITY_TOOLKIT && self.auth.api_key.is_empty() {
            return Err(AppError::configuration(
                "auth.api_key is required when auth.provider = \"identity_toolkit\"",
            ));
        }
        if !self.auth.allowed_federated_email.contains('@') {
            return Err(AppError::configuration(
                "auth.allowed_federated_email must be an email address",
            ));
        }
        if self.auth.allowed_email_domain.trim().is_empty() {
            return Err(AppError::configuration("auth.allowed_email_domain must not be empty"));
        }
        if self.realtime.feed_limit == 0 {
            return Err(AppError::configuration("realtime.feed_limit must be at least 1"));
        }
        if self.console.max_display_image_bytes == 0 {
            return Err(AppError::configuration(
                "console.max_display_image_bytes must be at least 1",
            ));
        }
        if self.console.vessel_name.trim().is_empty() {
            return Err(AppError::configuration("console.vessel_name must not be empty"));
        }
        Ok(())
    }
}
