use std::time::Duration;

use anyhow::Result;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_TIMEZONE};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub ical_url: Option<String>,
    pub timezone: String,
    pub fetch_timeout_secs: u64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            ical_url: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl CalendarConfig {
    /// ## Summary
    /// Returns the configured feed URL, treating a blank value as absent.
    #[must_use]
    pub fn ical_url(&self) -> Option<&str> {
        self.ical_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// ## Summary
    /// Resolves the configured IANA identifier.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the identifier is not a
    /// known IANA zone.
    pub fn timezone(&self) -> CoreResult<Tz> {
        self.timezone.trim().parse::<Tz>().map_err(|_err| {
            CoreError::InvalidConfiguration(format!("unknown timezone '{}'", self.timezone))
        })
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// environment variables into a `Settings`.
    /// Environment variables take precedence over file values. Nested keys use
    /// a double underscore, e.g. `CALENDAR__ICAL_URL`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::with_defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Starts a configuration builder carrying the built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be recorded.
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("calendar.timezone", DEFAULT_TIMEZONE)?
            .set_default("calendar.fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests;
