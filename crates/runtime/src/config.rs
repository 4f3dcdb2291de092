use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use coinfolio_core::constants::{DEFAULT_COLLECTION, DEFAULT_POLL_INTERVAL, DEFAULT_STORAGE_KEY};
use coinfolio_core::{Error, Result};
use rust_decimal::Decimal;

pub const ENV_BACKEND: &str = "COINFOLIO_BACKEND";
pub const ENV_DATA_DIR: &str = "COINFOLIO_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "COINFOLIO_STORAGE_KEY";
pub const ENV_POLL_INTERVAL_MS: &str = "COINFOLIO_POLL_INTERVAL_MS";
pub const ENV_COLLECTION: &str = "COINFOLIO_COLLECTION";
pub const ENV_CASH_RESERVE: &str = "COINFOLIO_CASH_RESERVE";
pub const ENV_LOG_FORMAT: &str = "COINFOLIO_LOG_FORMAT";

/// Persistence backend selected at start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "remote" => Ok(Backend::Remote),
            other => Err(invalid(ENV_BACKEND, other, "expected 'local' or 'remote'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(invalid(ENV_LOG_FORMAT, other, "expected 'text' or 'json'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    /// Directory of the file-backed key-value store. `None` keeps the local
    /// collection in memory.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub poll_interval: Duration,
    pub collection: String,
    pub cash_reserve: Decimal,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            collection: DEFAULT_COLLECTION.to_string(),
            cash_reserve: Decimal::ZERO,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file first when one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Unset and
    /// blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let backend = var(ENV_BACKEND)
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(defaults.backend);
        let log_format = var(ENV_LOG_FORMAT)
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(defaults.log_format);

        let poll_interval = match var(ENV_POLL_INTERVAL_MS) {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(invalid(
                        ENV_POLL_INTERVAL_MS,
                        &value,
                        "expected a positive number of milliseconds",
                    ))
                }
            },
            None => defaults.poll_interval,
        };

        let cash_reserve = match var(ENV_CASH_RESERVE) {
            Some(value) => match Decimal::from_str(&value) {
                Ok(amount) if amount >= Decimal::ZERO => amount,
                _ => {
                    return Err(invalid(
                        ENV_CASH_RESERVE,
                        &value,
                        "expected a non-negative decimal",
                    ))
                }
            },
            None => defaults.cash_reserve,
        };

        Ok(Self {
            backend,
            data_dir: var(ENV_DATA_DIR).map(PathBuf::from),
            storage_key: var(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            poll_interval,
            collection: var(ENV_COLLECTION).unwrap_or(defaults.collection),
            cash_reserve,
            log_format,
        })
    }
}

fn invalid(name: &str, value: &str, expected: &str) -> Error {
    Error::InvalidConfigValue(format!("{}='{}': {}", name, value, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.storage_key, "coins");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config_from(&[
            (ENV_BACKEND, "Remote"),
            (ENV_DATA_DIR, "/var/lib/coinfolio"),
            (ENV_STORAGE_KEY, "vault"),
            (ENV_POLL_INTERVAL_MS, "250"),
            (ENV_COLLECTION, "users/alex/coins"),
            (ENV_CASH_RESERVE, "1000.50"),
            (ENV_LOG_FORMAT, "JSON"),
        ])
        .unwrap();

        assert_eq!(config.backend, Backend::Remote);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/coinfolio")));
        assert_eq!(config.storage_key, "vault");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.collection, "users/alex/coins");
        assert_eq!(config.cash_reserve, dec!(1000.50));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[(ENV_STORAGE_KEY, "  "), (ENV_BACKEND, "")]).unwrap();
        assert_eq!(config.storage_key, "coins");
        assert_eq!(config.backend, Backend::Local);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            (ENV_BACKEND, "cloud"),
            (ENV_POLL_INTERVAL_MS, "0"),
            (ENV_POLL_INTERVAL_MS, "soon"),
            (ENV_CASH_RESERVE, "-5"),
            (ENV_CASH_RESERVE, "lots"),
            (ENV_LOG_FORMAT, "xml"),
        ];
        for (name, value) in cases {
            let err = config_from(&[(name, value)]).unwrap_err();
            match err {
                Error::InvalidConfigValue(message) => assert!(message.contains(name)),
                other => panic!("unexpected error for {}={}: {:?}", name, value, other),
            }
        }
    }
}
