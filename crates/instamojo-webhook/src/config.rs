use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_LOG_PATH: &str = "/tmp/webhook_data.txt";
pub const DEFAULT_MAX_BODY_BYTES: usize = 65_536;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Address to bind
    pub bind_addr: String,
    /// TCP port
    pub port: u16,
    /// Append-only log file receiving one record per POST
    pub log_path: PathBuf,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl WebhookConfig {
    /// Read overrides from the environment. Unset variables keep the defaults;
    /// set-but-unparseable numbers are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port_var = lookup("WEBHOOK_PORT")
            .map(|raw| ("WEBHOOK_PORT", raw))
            .or_else(|| lookup("PORT").map(|raw| ("PORT", raw)));
        let port = match port_var {
            Some((name, raw)) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber(name, raw))?,
            None => defaults.port,
        };

        let max_body_bytes = match lookup("WEBHOOK_MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("WEBHOOK_MAX_BODY_BYTES", raw))?,
            None => defaults.max_body_bytes,
        };

        let bind_addr = lookup("WEBHOOK_BIND_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let log_path = lookup("WEBHOOK_LOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        Ok(Self {
            bind_addr,
            port,
            log_path,
            max_body_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid number in {0}: {1:?}")]
    InvalidNumber(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WebhookConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, WebhookConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.log_path, PathBuf::from("/tmp/webhook_data.txt"));
    }

    #[test]
    fn test_overrides() {
        let config = WebhookConfig::from_lookup(lookup_from(&[
            ("WEBHOOK_PORT", "9100"),
            ("WEBHOOK_LOG_PATH", "/var/log/mojo.txt"),
            ("WEBHOOK_BIND_ADDR", "127.0.0.1"),
            ("WEBHOOK_MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.log_path, PathBuf::from("/var/log/mojo.txt"));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_port_falls_back_to_generic_var() {
        let config = WebhookConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let err = WebhookConfig::from_lookup(lookup_from(&[("WEBHOOK_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_PORT"));
    }

    #[test]
    fn test_invalid_generic_port_names_port() {
        let err = WebhookConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber("PORT", ref raw) if raw == "eighty"));
        assert!(!err.to_string().contains("WEBHOOK_PORT"));
    }
}
