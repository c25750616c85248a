use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use tracing::Level;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Service configuration. Built once in `main` and handed to the server as
/// app data; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub server_addr: String,
    pub database_url: String,
    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: Level,

    // Rate limiting
    pub rate_per_min: u32,

    pub default_page_size: u32,
}

fn parse<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let password = var("DB_PASSWORD", "");
                let credentials = if password.is_empty() {
                    var("DB_USERNAME", "root")
                } else {
                    format!("{}:{}", var("DB_USERNAME", "root"), password)
                };
                format!(
                    "mysql://{}@{}:{}/{}",
                    credentials,
                    var("DB_HOST", "localhost"),
                    parse::<u16>("DB_PORT", lookup("DB_PORT"), 3306)?,
                    var("DB_NAME", "employee_service"),
                )
            }
        };

        let default_page_size = parse::<u32>("DEFAULT_PAGE_SIZE", lookup("DEFAULT_PAGE_SIZE"), 20)?;
        if default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_PAGE_SIZE",
                value: default_page_size.to_string(),
            });
        }

        Ok(Self {
            app_name: var("APP_NAME", "employee-service"),
            server_addr: var("SERVER_ADDR", "0.0.0.0:8080"),
            database_url,
            api_prefix: var("API_PREFIX", "/api"),
            log_dir: var("LOG_DIR", "logs"),
            log_level: parse("LOG_LEVEL", lookup("LOG_LEVEL"), Level::DEBUG)?,
            rate_per_min: parse("RATE_PER_MIN", lookup("RATE_PER_MIN"), 1000)?,
            default_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.app_name, "employee-service");
        assert_eq!(cfg.server_addr, "0.0.0.0:8080");
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.database_url, "mysql://root@localhost:3306/employee_service");
        assert_eq!(cfg.log_level, Level::DEBUG);
        assert_eq!(cfg.rate_per_min, 1000);
        assert_eq!(cfg.default_page_size, 20);
    }

    #[test]
    fn database_url_is_composed_from_parts() {
        let cfg = config(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "3307"),
            ("DB_NAME", "hr"),
            ("DB_USERNAME", "app"),
            ("DB_PASSWORD", "secret"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "mysql://app:secret@db:3307/hr");
    }

    #[test]
    fn explicit_database_url_wins() {
        let cfg = config(&[("DATABASE_URL", "mysql://u@h/d"), ("DB_HOST", "ignored")]).unwrap();
        assert_eq!(cfg.database_url, "mysql://u@h/d");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("LOG_LEVEL", "warn"),
            ("RATE_PER_MIN", "60"),
            ("DEFAULT_PAGE_SIZE", "50"),
            ("API_PREFIX", "/v1"),
        ])
        .unwrap();
        assert_eq!(cfg.log_level, Level::WARN);
        assert_eq!(cfg.rate_per_min, 60);
        assert_eq!(cfg.default_page_size, 50);
        assert_eq!(cfg.api_prefix, "/v1");
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config(&[("RATE_PER_MIN", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RATE_PER_MIN", .. }));

        let err = config(&[("DB_PORT", "99999")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_PORT", .. }));

        let err = config(&[("DEFAULT_PAGE_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DEFAULT_PAGE_SIZE", .. }));
    }
}
