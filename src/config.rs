use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub status_reset_delay: Duration,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url: String = load(&lookup, "BACKEND_URL", DEFAULT_BACKEND_URL.to_string());
        Self {
            port: load(&lookup, "PORT", 3000),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            status_reset_delay: Duration::from_millis(load(&lookup, "STATUS_RESET_MS", 3000)),
            backend_timeout: Duration::from_secs(load(&lookup, "BACKEND_TIMEOUT_SECS", 10)),
        }
    }
}

fn load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|err| {
        warn!("invalid {key} value {raw:?}: {err}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.status_reset_delay, Duration::from_secs(3));
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides_and_trims_backend_slash() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("BACKEND_URL", "https://api.example.org/"),
            ("STATUS_RESET_MS", "250"),
            ("BACKEND_TIMEOUT_SECS", "2"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.backend_url, "https://api.example.org");
        assert_eq!(config.status_reset_delay, Duration::from_millis(250));
        assert_eq!(config.backend_timeout, Duration::from_secs(2));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("STATUS_RESET_MS", "-5")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.status_reset_delay, Duration::from_secs(3));
    }
}
