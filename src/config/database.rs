//! Database configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use std::time::Duration;

use super::error::ValidationError;

/// MySQL connection configuration.
///
/// Either `url` is set, or the connection is assembled from the individual
/// host, port, user, password, and database fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full `mysql://` URL; takes precedence over the discrete fields
    pub url: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_user")]
    pub user: String,

    pub password: Option<Secret<String>>,

    #[serde(default = "default_database")]
    pub database: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Builds sqlx connect options from the URL or the discrete fields.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, ValidationError> {
        if let Some(url) = &self.url {
            return url
                .parse::<MySqlConnectOptions>()
                .map_err(|_| ValidationError::InvalidDatabaseUrl);
        }

        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);
        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }
        Ok(options)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.url {
            Some(url) if !url.starts_with("mysql://") && !url.starts_with("mariadb://") => {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
            Some(_) => {}
            None => {
                if self.host.is_empty() {
                    return Err(ValidationError::MissingRequired("DATABASE__HOST"));
                }
                if self.database.is_empty() {
                    return Err(ValidationError::MissingRequired("DATABASE__DATABASE"));
                }
            }
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: None,
            database: default_database(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "cricket".to_string()
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_connect_options_from_fields() {
        let config = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 3307,
            password: Some(Secret::new("hunter2".to_string())),
            ..Default::default()
        };
        assert!(config.connect_options().is_ok());
    }

    #[test]
    fn test_connect_options_from_url() {
        let config = DatabaseConfig {
            url: Some("mysql://user:pw@example.com:3310/stats".to_string()),
            ..Default::default()
        };
        assert!(config.connect_options().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = DatabaseConfig {
            url: Some("postgresql://localhost/test".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn test_validation_invalid_pool_size() {
        let config = DatabaseConfig {
            min_connections: 10,
            max_connections: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));
    }

    #[test]
    fn test_password_is_redacted() {
        let config = DatabaseConfig {
            password: Some(Secret::new("hunter2".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
