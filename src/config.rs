use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::DEFAULT_PAGE_SIZE;

pub const STORAGE_DIR_VAR: &str = "STOREFRONT_STORAGE_DIR";
pub const PAGE_SIZE_VAR: &str = "STOREFRONT_PAGE_SIZE";
pub const SEED_DEMO_VAR: &str = "STOREFRONT_SEED_DEMO";
pub const LOGIN_LATENCY_VAR: &str = "STOREFRONT_LOGIN_LATENCY_MS";
pub const CHANNEL_BUFFER_VAR: &str = "STOREFRONT_CHANNEL_BUFFER";

const DEFAULT_CHANNEL_BUFFER: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store; `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
    pub page_size: NonZeroUsize,
    /// Write the demo catalog when no usable catalog is stored.
    pub seed_demo_catalog: bool,
    pub login_latency: Duration,
    pub channel_buffer: NonZeroUsize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            seed_demo_catalog: true,
            login_latency: Duration::ZERO,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl StorefrontConfig {
    /// Loads `.env` if present, then reads the `STOREFRONT_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source. Unset or empty variables
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = read(STORAGE_DIR_VAR) {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(PAGE_SIZE_VAR) {
            config.page_size = parse_positive(PAGE_SIZE_VAR, &raw)?;
        }
        if let Some(raw) = read(SEED_DEMO_VAR) {
            config.seed_demo_catalog = parse_flag(SEED_DEMO_VAR, &raw)?;
        }
        if let Some(raw) = read(LOGIN_LATENCY_VAR) {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: LOGIN_LATENCY_VAR,
                value: raw.clone(),
                reason: "expected milliseconds",
            })?;
            config.login_latency = Duration::from_millis(millis);
        }
        if let Some(raw) = read(CHANNEL_BUFFER_VAR) {
            config.channel_buffer = parse_positive(CHANNEL_BUFFER_VAR, &raw)?;
        }
        Ok(config)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim().parse::<NonZeroUsize>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "expected a positive integer",
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.page_size.get(), 8);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (STORAGE_DIR_VAR, "/tmp/storefront"),
            (PAGE_SIZE_VAR, "12"),
            (SEED_DEMO_VAR, "off"),
            (LOGIN_LATENCY_VAR, "1000"),
            (CHANNEL_BUFFER_VAR, "4"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/storefront")));
        assert_eq!(config.page_size.get(), 12);
        assert!(!config.seed_demo_catalog);
        assert_eq!(config.login_latency, Duration::from_secs(1));
        assert_eq!(config.channel_buffer.get(), 4);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = StorefrontConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains(PAGE_SIZE_VAR));
        assert!(StorefrontConfig::from_lookup(lookup(&[(SEED_DEMO_VAR, "maybe")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[(LOGIN_LATENCY_VAR, "-5")])).is_err());
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[(STORAGE_DIR_VAR, "  ")])).unwrap();
        assert!(config.storage_dir.is_none());
    }
}
