//! Configuration management for the PDF Server

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::keepalive::KeepAliveConfig;
use crate::pdf::EmptyTextPolicy;

/// Upload ceiling enforced on `/api/parse-pdf`
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "https://*.vercel.app",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
    pub keep_alive: KeepAliveConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
    pub empty_text_policy: EmptyTextPolicy,
}

/// Browser origins allowed to call the API.
///
/// Entries are exact origins or `scheme://*.domain` wildcards.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                empty_text_policy: EmptyTextPolicy::default(),
            },
            cors: CorsConfig {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|origin| origin.to_string())
                    .collect(),
            },
            keep_alive: KeepAliveConfig::default(),
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

        let managed = match lookup("RENDER") {
            Some(value) => parse_flag("RENDER", value)?,
            None => false,
        };

        // Managed platforms route external traffic to all interfaces
        let default_host = if managed {
            "0.0.0.0".to_string()
        } else {
            defaults.server.host
        };

        let port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(value) => parse_value("SERVER_PORT", value)?,
            None => defaults.server.port,
        };

        let max_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => parse_value("MAX_UPLOAD_BYTES", value)?,
            None => defaults.upload.max_bytes,
        };

        let empty_text_policy = match lookup("EMPTY_TEXT_POLICY") {
            Some(value) => parse_value("EMPTY_TEXT_POLICY", value)?,
            None => defaults.upload.empty_text_policy,
        };

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors.allowed_origins,
        };

        let interval = match lookup("KEEP_ALIVE_INTERVAL_SECS") {
            Some(value) => parse_seconds("KEEP_ALIVE_INTERVAL_SECS", value)?,
            None => defaults.keep_alive.interval,
        };

        let timeout = match lookup("KEEP_ALIVE_TIMEOUT_SECS") {
            Some(value) => parse_seconds("KEEP_ALIVE_TIMEOUT_SECS", value)?,
            None => defaults.keep_alive.timeout,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(default_host),
                port,
            },
            upload: UploadConfig {
                max_bytes,
                empty_text_policy,
            },
            cors: CorsConfig { allowed_origins },
            keep_alive: KeepAliveConfig {
                enabled: managed,
                external_url: lookup("RENDER_EXTERNAL_URL"),
                interval,
                timeout,
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

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue { var, value }),
    }
}

/// Whole seconds, zero rejected (a zero tokio interval panics)
fn parse_seconds(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
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
    fn test_development_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.upload.max_bytes, 20 * 1024 * 1024);
        assert_eq!(config.upload.empty_text_policy, EmptyTextPolicy::Verbatim);
        assert!(!config.keep_alive.enabled);
        assert_eq!(config.keep_alive.interval, Duration::from_secs(840));
        assert_eq!(config.keep_alive.timeout, Duration::from_secs(10));
        assert_eq!(config.cors.allowed_origins.len(), 3);
    }

    #[test]
    fn test_managed_hosting() {
        let config = Config::from_lookup(lookup_from(&[
            ("RENDER", "true"),
            ("RENDER_EXTERNAL_URL", "https://pdf-parser.onrender.com"),
            ("PORT", "10000"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 10000);
        assert_eq!(
            config.keep_alive.target_url().as_deref(),
            Some("https://pdf-parser.onrender.com/api/health")
        );
    }

    #[test]
    fn test_managed_without_url_disables_keep_alive() {
        let config = Config::from_lookup(lookup_from(&[("RENDER", "1")])).unwrap();

        assert!(config.keep_alive.enabled);
        assert!(config.keep_alive.target_url().is_none());
    }

    #[test]
    fn test_origin_list_parsing() {
        let config = Config::from_lookup(lookup_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://study.example.com, ,https://*.example.org",
        )]))
        .unwrap();

        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://study.example.com", "https://*.example.org"]
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("RENDER", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("KEEP_ALIVE_INTERVAL_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("EMPTY_TEXT_POLICY", "blank")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MAX_UPLOAD_BYTES", "-1")])).is_err());
    }

    #[test]
    fn test_placeholder_policy() {
        let config =
            Config::from_lookup(lookup_from(&[("EMPTY_TEXT_POLICY", "placeholder")])).unwrap();
        assert_eq!(config.upload.empty_text_policy, EmptyTextPolicy::Placeholder);
    }
}
