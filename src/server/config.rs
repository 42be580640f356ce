//! Environment-based server configuration.

use chrono::FixedOffset;

use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Credentials for the admin account created at startup when missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    /// Offset used to decide what "today" and "now" are for bookings and events
    pub utc_offset: FixedOffset,
    pub admin: Option<AdminCredentials>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `VALKEY_URL` is not set, or only
    ///   one of `ADMIN_USERNAME`/`ADMIN_PASSWORD` is set
    /// - `Err(ConfigError::InvalidEnvValue)` - `UTC_OFFSET_HOURS` is not an integer in -12..=14
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let database_url = required("DATABASE_URL")?;
        let valkey_url = required("VALKEY_URL")?;
        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let offset_hours = match lookup("UTC_OFFSET_HOURS") {
            None => DEFAULT_UTC_OFFSET_HOURS,
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|hours| (-12..=14).contains(hours))
                .ok_or_else(|| ConfigError::InvalidEnvValue {
                    var: "UTC_OFFSET_HOURS".to_string(),
                    reason: format!("expected an integer between -12 and 14, got {:?}", raw),
                })?,
        };

        let utc_offset = FixedOffset::east_opt(offset_hours * 3600).ok_or_else(|| {
            ConfigError::InvalidEnvValue {
                var: "UTC_OFFSET_HOURS".to_string(),
                reason: format!("{} hours is not a valid offset", offset_hours),
            }
        })?;

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar("ADMIN_USERNAME".to_string())),
        };

        Ok(Self {
            database_url,
            valkey_url,
            bind_address,
            utc_offset,
            admin,
        })
    }
}
