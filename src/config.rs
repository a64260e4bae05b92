use std::env;
use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Configuration problems detected at startup, before the server binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY must be set")]
    MissingApiKey,

    #[error("Invalid HOST value: {0}")]
    InvalidHost(String),
}

pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Reads configuration from the environment. The API key has no default:
    /// its absence is a startup error, never a per-request failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let host = match env::var("HOST") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?,
            Err(_) => IpAddr::from([0, 0, 0, 0]),
        };

        Ok(Self {
            host,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            api_key,
            base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "OPENWEATHER_API_KEY",
            "HOST",
            "PORT",
            "OPENWEATHER_BASE_URL",
            "UPSTREAM_TIMEOUT_SECONDS",
        ] {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    fn missing_api_key_is_a_startup_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        // An empty key is as unusable as an absent one.
        unsafe { env::set_var("OPENWEATHER_API_KEY", "") };
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe { env::set_var("OPENWEATHER_API_KEY", "test-key") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 4000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides_are_applied() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe {
            env::set_var("OPENWEATHER_API_KEY", "test-key");
            env::set_var("HOST", "127.0.0.1");
            env::set_var("PORT", "8080");
            env::set_var("OPENWEATHER_BASE_URL", "http://localhost:9100");
            env::set_var("UPSTREAM_TIMEOUT_SECONDS", "3");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url, "http://localhost:9100");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe {
            env::set_var("OPENWEATHER_API_KEY", "test-key");
            env::set_var("HOST", "not-an-address");
        }

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidHost(_))
        ));
    }
}
