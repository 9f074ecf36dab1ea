//! Central module for application-wide configuration settings.
//!
//! This module loads the backend address, the location of the persisted
//! session, its validity window, and the optional request timeout from the
//! environment, falling back to defaults.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::errors::ConsoleError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub session_ttl: chrono::Duration,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn load() -> Result<Self, ConsoleError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SIGEP_API_URL").unwrap_or_else(|| {
            info!("SIGEP_API_URL not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        let session_file = match lookup("SIGEP_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file(lookup("HOME")),
        };

        let ttl_minutes: i64 = try_load(&lookup, "SIGEP_SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            return Err(ConsoleError::Config(format!(
                "SIGEP_SESSION_TTL_MINUTES must be positive, got {ttl_minutes}"
            )));
        }
        let session_ttl = chrono::Duration::try_minutes(ttl_minutes).ok_or_else(|| {
            ConsoleError::Config(format!(
                "SIGEP_SESSION_TTL_MINUTES is out of range, got {ttl_minutes}"
            ))
        })?;

        let timeout = match lookup("SIGEP_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = parse("SIGEP_TIMEOUT_SECS", &raw)?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            api_url,
            session_file,
            session_ttl,
            timeout,
        })
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join(".sigep").join("session.json"),
        None => {
            warn!("HOME not set, keeping the session in the working directory");
            PathBuf::from(".sigep-session.json")
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConsoleError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConsoleError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConsoleError::Config(format!("Invalid {key} value {raw:?}: {e}"))
    })
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
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[("HOME", "/home/ana")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.session_file, PathBuf::from("/home/ana/.sigep/session.json"));
        assert_eq!(config.session_ttl, chrono::Duration::minutes(480));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SIGEP_API_URL", "https://rrhh.empresa.com"),
            ("SIGEP_SESSION_FILE", "/tmp/s.json"),
            ("SIGEP_SESSION_TTL_MINUTES", "30"),
            ("SIGEP_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://rrhh.empresa.com");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.session_ttl, chrono::Duration::minutes(30));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGEP_TIMEOUT_SECS", "pronto")])),
            Err(ConsoleError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGEP_SESSION_TTL_MINUTES", "0")])),
            Err(ConsoleError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGEP_SESSION_TTL_MINUTES", "9223372036854775807")])),
            Err(ConsoleError::Config(_))
        ));
    }
}
