use std::{str::FromStr, time::Duration};

use crate::{errors::AppError, feed::DisplayPolicy};

pub const PLACE_ID_VAR: &str = "GOOGLE_PLACE_ID";
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 120;
const DEFAULT_DISPLAY_LIMIT: usize = 6;

/// Process-wide settings, read once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub place_id: Option<String>,
    pub api_key: Option<String>,
    pub places_base_url: String,
    pub reviews_language: Option<String>,
    pub upstream_timeout: Duration,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
    pub display_policy: DisplayPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            place_id: None,
            api_key: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            reviews_language: None,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            display_policy: DisplayPolicy::Chronological {
                limit: Some(DEFAULT_DISPLAY_LIMIT),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let display_policy = match non_empty("REVIEWS_DISPLAY_POLICY") {
            Some(name) => DisplayPolicy::from_str(&name)?,
            None => defaults.display_policy,
        };
        let display_limit = parse_or("REVIEWS_DISPLAY_LIMIT", &non_empty, DEFAULT_DISPLAY_LIMIT)?;

        let allowed_origins = non_empty("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            place_id: non_empty(PLACE_ID_VAR),
            api_key: non_empty(API_KEY_VAR),
            places_base_url: non_empty("GOOGLE_PLACES_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.places_base_url),
            reviews_language: non_empty("GOOGLE_REVIEWS_LANGUAGE"),
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                &non_empty,
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
            port: parse_or("PORT", &non_empty, DEFAULT_PORT)?,
            allowed_origins,
            rate_limit_per_minute: parse_or(
                "RATE_LIMIT_PER_MINUTE",
                &non_empty,
                DEFAULT_RATE_LIMIT_PER_MINUTE,
            )?,
            display_policy: display_policy.with_limit(display_limit),
        })
    }

    /// Place id and API key, or the names of whichever are missing.
    pub fn credentials(&self) -> Result<(&str, &str), AppError> {
        match (self.place_id.as_deref(), self.api_key.as_deref()) {
            (Some(place_id), Some(api_key)) => Ok((place_id, api_key)),
            (place_id, api_key) => {
                let mut missing = Vec::new();
                if place_id.is_none() {
                    missing.push(PLACE_ID_VAR);
                }
                if api_key.is_none() {
                    missing.push(API_KEY_VAR);
                }
                Err(AppError::ConfigurationMissing { missing })
            }
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::EnvError(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.places_base_url, "https://maps.googleapis.com");
        assert_eq!(
            config.display_policy,
            DisplayPolicy::Chronological { limit: Some(6) }
        );
    }

    #[test]
    fn empty_credentials_count_as_missing() {
        let config = config_from(&[(PLACE_ID_VAR, ""), (API_KEY_VAR, "  ")]).unwrap();
        match config.credentials() {
            Err(AppError::ConfigurationMissing { missing }) => {
                assert_eq!(missing, vec![PLACE_ID_VAR, API_KEY_VAR]);
            }
            other => panic!("expected ConfigurationMissing, got {other:?}"),
        }
    }

    #[test]
    fn only_the_absent_credential_is_reported() {
        let config = config_from(&[(PLACE_ID_VAR, "place")]).unwrap();
        match config.credentials() {
            Err(AppError::ConfigurationMissing { missing }) => {
                assert_eq!(missing, vec![API_KEY_VAR]);
            }
            other => panic!("expected ConfigurationMissing, got {other:?}"),
        }
    }

    #[test]
    fn invalid_numbers_fail_startup() {
        let err = config_from(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, AppError::EnvError(msg) if msg.contains("UPSTREAM_TIMEOUT_SECS")));
    }

    #[test]
    fn policy_and_limit_are_read_together() {
        let config = config_from(&[
            ("REVIEWS_DISPLAY_POLICY", "chronological"),
            ("REVIEWS_DISPLAY_LIMIT", "0"),
            ("ALLOWED_ORIGINS", "https://salon.example, http://localhost:3000"),
        ])
        .unwrap();
        assert_eq!(
            config.display_policy,
            DisplayPolicy::Chronological { limit: None }
        );
        assert_eq!(
            config.allowed_origins,
            vec!["https://salon.example", "http://localhost:3000"]
        );
    }
}
