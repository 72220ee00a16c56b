/// Configuration management for Social Service
///
/// Loads configuration from environment variables. Unset variables fall back to
/// defaults; set-but-unparseable values are errors.
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Realtime push configuration
    pub realtime: RealtimeConfig,
    /// Feed paging
    pub feed: FeedConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections in pool
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeBackend {
    /// WebSocket sessions held by this process
    Local,
    /// Redis pub/sub, for gateways running elsewhere
    Redis,
}

impl FromStr for RealtimeBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(RealtimeBackend::Local),
            "redis" => Ok(RealtimeBackend::Redis),
            other => Err(anyhow!("unknown realtime backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    pub backend: RealtimeBackend,
    /// Redis URL (redis://host:port)
    pub redis_url: String,
    /// Upper bound for a single push attempt
    pub push_timeout_ms: u64,
}

impl RealtimeConfig {
    pub fn push_timeout(&self) -> Duration {
        Duration::from_millis(self.push_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Read `key`, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env_or("PORT", 8080)?,
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20)?,
            min_connections: env_or("DB_MIN_CONNECTIONS", 2)?,
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        };
        if database.min_connections > database.max_connections {
            bail!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                database.min_connections,
                database.max_connections
            );
        }

        let realtime = RealtimeConfig {
            backend: env_or("REALTIME_BACKEND", RealtimeBackend::Local)?,
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            push_timeout_ms: env_or("PUSH_TIMEOUT_MS", 250)?,
        };

        let feed = FeedConfig {
            default_page_size: env_or("FEED_DEFAULT_PAGE_SIZE", 10)?,
            max_page_size: env_or("FEED_MAX_PAGE_SIZE", 100)?,
        };
        if feed.default_page_size == 0 || feed.default_page_size > feed.max_page_size {
            bail!(
                "FEED_DEFAULT_PAGE_SIZE must be between 1 and FEED_MAX_PAGE_SIZE ({})",
                feed.max_page_size
            );
        }

        let logging = LoggingConfig {
            format: env_or("LOG_FORMAT", LogFormat::Text)?,
        };

        Ok(Config {
            app,
            database,
            realtime,
            feed,
            logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "APP_HOST",
        "PORT",
        "DATABASE_URL",
        "DB_MAX_CONNECTIONS",
        "DB_MIN_CONNECTIONS",
        "DB_ACQUIRE_TIMEOUT_SECS",
        "REALTIME_BACKEND",
        "REDIS_URL",
        "PUSH_TIMEOUT_MS",
        "FEED_DEFAULT_PAGE_SIZE",
        "FEED_MAX_PAGE_SIZE",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/chirp");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.http_port, 8080);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.realtime.backend, RealtimeBackend::Local);
        assert_eq!(config.realtime.push_timeout(), Duration::from_millis(250));
        assert_eq!(config.feed.default_page_size, 10);
        assert_eq!(config.feed.max_page_size, 100);
        assert_eq!(config.logging.format, LogFormat::Text);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_database_url() {
        clear_env();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_rejected() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/chirp");
        std::env::set_var("PUSH_TIMEOUT_MS", "soon");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PUSH_TIMEOUT_MS"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_redis_backend_and_json_logs() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/chirp");
        std::env::set_var("REALTIME_BACKEND", "redis");
        std::env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        assert_eq!(config.realtime.backend, RealtimeBackend::Redis);
        assert_eq!(config.logging.format, LogFormat::Json);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_default_page_size_above_max_is_rejected() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/chirp");
        std::env::set_var("FEED_DEFAULT_PAGE_SIZE", "50");
        std::env::set_var("FEED_MAX_PAGE_SIZE", "20");

        assert!(Config::from_env().is_err());
        clear_env();
    }
}
