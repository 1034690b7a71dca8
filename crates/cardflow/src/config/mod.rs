use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::screening::ScreeningConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CARDFLOW_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("CARDFLOW_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("CARDFLOW_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("CARDFLOW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ScreeningConfig::default();
        let screening = ScreeningConfig {
            auto_accept_income: env_u32("CARDFLOW_AUTO_ACCEPT_INCOME", defaults.auto_accept_income)?,
            auto_decline_income: env_u32(
                "CARDFLOW_AUTO_DECLINE_INCOME",
                defaults.auto_decline_income,
            )?,
            minimum_age: env_u8("CARDFLOW_MINIMUM_AGE", defaults.minimum_age)?,
            detailed_review_age: env_u8(
                "CARDFLOW_DETAILED_REVIEW_AGE",
                defaults.detailed_review_age,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            screening,
        })
    }
}

fn env_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidThreshold { key }),
    }
}

fn env_u8(key: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidThreshold { key }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "CARDFLOW_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "CARDFLOW_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { key } => {
                write!(f, "{key} must be a non-negative whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("CARDFLOW_ENV");
        env::remove_var("CARDFLOW_HOST");
        env::remove_var("CARDFLOW_PORT");
        env::remove_var("CARDFLOW_LOG_LEVEL");
        env::remove_var("CARDFLOW_AUTO_ACCEPT_INCOME");
        env::remove_var("CARDFLOW_AUTO_DECLINE_INCOME");
        env::remove_var("CARDFLOW_MINIMUM_AGE");
        env::remove_var("CARDFLOW_DETAILED_REVIEW_AGE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.screening, ScreeningConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CARDFLOW_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn screening_thresholds_can_be_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CARDFLOW_AUTO_ACCEPT_INCOME", "250000");
        env::set_var("CARDFLOW_MINIMUM_AGE", "21");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.screening.auto_accept_income, 250_000);
        assert_eq!(config.screening.minimum_age, 21);
        assert_eq!(
            config.screening.auto_decline_income,
            ScreeningConfig::default().auto_decline_income
        );
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CARDFLOW_AUTO_DECLINE_INCOME", "plenty");
        match AppConfig::load() {
            Err(ConfigError::InvalidThreshold { key }) => {
                assert_eq!(key, "CARDFLOW_AUTO_DECLINE_INCOME");
            }
            other => panic!("expected invalid threshold error, got {other:?}"),
        }
        reset_env();
    }
}
