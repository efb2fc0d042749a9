//! Configuration for the pokemon-info binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unlike a missing variable, a value that does not parse is an error.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default lookup service
pub const DEFAULT_API_URL: &str = "https://graphql-pokemon2.vercel.app/";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set to something unusable
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Value found
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Which app the binary runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Bare lookup; a failed lookup ends the program
    Minimal,
    /// Lookup with stale-response guard and error boundary
    #[default]
    Extended,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "extended" => Ok(Self::Extended),
            other => Err(format!("expected `minimal` or `extended`, got `{other}`")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => f.write_str("minimal"),
            Self::Extended => f.write_str("extended"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint of the lookup service (`POKEMON_API_URL`)
    pub api_url: String,
    /// Artificial server-side delay requested per lookup (`POKEMON_FETCH_DELAY_MS`)
    pub fetch_delay: Duration,
    /// Client-side timeout per lookup (`POKEMON_REQUEST_TIMEOUT_SECS`)
    pub request_timeout: Duration,
    /// App to run (`POKEMON_VARIANT`)
    pub variant: Variant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_delay: Duration::from_millis(1500),
            request_timeout: Duration::from_secs(10),
            variant: Variant::Extended,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from `lookup`, which maps variable names to values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("POKEMON_API_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    key: "POKEMON_API_URL",
                    value: url,
                    reason: "must not be empty".to_string(),
                });
            },
            Some(url) => url,
            None => defaults.api_url,
        };

        let fetch_delay = parse(&lookup, "POKEMON_FETCH_DELAY_MS")?
            .map_or(defaults.fetch_delay, Duration::from_millis);
        let request_timeout = parse(&lookup, "POKEMON_REQUEST_TIMEOUT_SECS")?
            .map_or(defaults.request_timeout, Duration::from_secs);
        let variant = parse(&lookup, "POKEMON_VARIANT")?.unwrap_or(defaults.variant);

        Ok(Self {
            api_url,
            fetch_delay,
            request_timeout,
            variant,
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
                key,
                reason: err.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap_or_default();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.variant, Variant::Extended);
    }

    #[test]
    fn test_overrides() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup(&[
            ("POKEMON_API_URL", "http://localhost:4000/graphql"),
            ("POKEMON_FETCH_DELAY_MS", "0"),
            ("POKEMON_REQUEST_TIMEOUT_SECS", " 3 "),
            ("POKEMON_VARIANT", "Minimal"),
        ]))?;

        assert_eq!(config.api_url, "http://localhost:4000/graphql");
        assert_eq!(config.fetch_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.variant, Variant::Minimal);
        Ok(())
    }

    #[test]
    fn test_invalid_number() {
        let result = Config::from_lookup(lookup(&[("POKEMON_FETCH_DELAY_MS", "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "POKEMON_FETCH_DELAY_MS", .. })
        ));
    }

    #[test]
    fn test_invalid_variant() {
        let result = Config::from_lookup(lookup(&[("POKEMON_VARIANT", "maximal")]));
        assert!(result.is_err_and(|error| error.to_string().contains("POKEMON_VARIANT")));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = Config::from_lookup(lookup(&[("POKEMON_API_URL", "  ")]));
        assert!(result.is_err());
    }
}
