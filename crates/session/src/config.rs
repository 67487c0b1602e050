//! Client configuration from environment variables.

use std::time::Duration;

use crate::types::{DEFAULT_HOST, DEFAULT_PORT};

/// How the inbound byte stream is cut into decode units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framing {
    /// One receive call is one message. Outbound records carry no delimiter.
    #[default]
    Raw,
    /// Newline-delimited messages in both directions.
    Line,
}

impl Framing {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("raw") {
            Some(Framing::Raw)
        } else if s.eq_ignore_ascii_case("line") {
            Some(Framing::Line)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub framing: Framing,
    /// `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            framing: Framing::Raw,
            connect_timeout: None,
            log_path: None,
        }
    }
}

impl ClientConfig {
    /// Read `GAMEMNG_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let host = non_empty("GAMEMNG_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = non_empty("GAMEMNG_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let framing = non_empty("GAMEMNG_FRAMING")
            .and_then(|s| Framing::parse(&s))
            .unwrap_or_default();
        let connect_timeout = non_empty("GAMEMNG_CONNECT_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        let log_path = non_empty("GAMEMNG_LOG_PATH");

        Self {
            host,
            port,
            framing,
            connect_timeout,
            log_path,
        }
    }

    /// `host:port` for diagnostics.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_default_endpoint() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint(), "192.168.10.64:50000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("GAMEMNG_HOST", "game.local"),
            ("GAMEMNG_PORT", "6000"),
            ("GAMEMNG_FRAMING", "LINE"),
            ("GAMEMNG_CONNECT_TIMEOUT_MS", "1500"),
            ("GAMEMNG_LOG_PATH", " /tmp/gamemng.log "),
        ]));
        assert_eq!(config.host, "game.local");
        assert_eq!(config.port, 6000);
        assert_eq!(config.framing, Framing::Line);
        assert_eq!(config.connect_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/gamemng.log"));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("GAMEMNG_HOST", "   "),
            ("GAMEMNG_PORT", "70000"),
            ("GAMEMNG_FRAMING", "length-prefix"),
            ("GAMEMNG_CONNECT_TIMEOUT_MS", "0"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = ClientConfig::from_env();
    }
}
