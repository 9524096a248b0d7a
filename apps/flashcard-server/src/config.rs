//! Configuration management for the Flashcard Server

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 4000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Body ceiling for `/process`, matching axum's stock limit
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest JSON body accepted by `/process`
    pub max_body_bytes: usize,
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Bearer credential. Requests fail upstream while this is unset.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    /// Cap on generated tokens per request
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            model: ModelConfig {
                api_key: None,
                api_url: DEFAULT_API_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                max_tokens: DEFAULT_MAX_TOKENS,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(value) => parse_value("SERVER_PORT", value)?,
            None => defaults.server.port,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(value) => parse_value("MAX_BODY_BYTES", value)?,
            None => defaults.server.max_body_bytes,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
                max_body_bytes,
            },
            model: ModelConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
                api_url: lookup("OPENAI_API_URL").unwrap_or(defaults.model.api_url),
                model: lookup("OPENAI_MODEL").unwrap_or(defaults.model.model),
                max_tokens: match lookup("OPENAI_MAX_TOKENS") {
                    Some(value) => parse_value("OPENAI_MAX_TOKENS", value)?,
                    None => defaults.model.max_tokens,
                },
                timeout_secs: match lookup("OPENAI_TIMEOUT_SECS") {
                    Some(value) => parse_seconds("OPENAI_TIMEOUT_SECS", value)?,
                    None => defaults.model.timeout_secs,
                },
            },
        })
    }
}

fn parse_value<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}

/// Whole seconds, zero rejected (a zero timeout fails every request)
fn parse_seconds(var: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.max_tokens, 4000);
        assert!(config.model.api_key.is_none());
        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_body_limit_override() {
        let config = Config::from_lookup(lookup_from(&[("MAX_BODY_BYTES", "65536")])).unwrap();
        assert_eq!(config.server.max_body_bytes, 65536);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "OPENAI_TIMEOUT_SECS", .. }
        ));

        let config = Config::from_lookup(lookup_from(&[("OPENAI_TIMEOUT_SECS", "15")])).unwrap();
        assert_eq!(config.model.timeout_secs, 15);
    }

    #[test]
    fn test_port_falls_back_to_platform_port() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.model.api_key.is_none());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "OPENAI_MAX_TOKENS", .. }
        ));
    }
}
