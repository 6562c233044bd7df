//! Gateway settings loaded from environment variables.

use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_RECORD_LIMIT: usize = 3;
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:5174",
    "http://localhost:5174",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value in {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// What `/ask` does when the record source is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Answer with an empty record list.
    #[default]
    Degrade,
    /// Fail the request with a 500.
    Surface,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "surface" => Ok(Self::Surface),
            other => Err(ConfigError::Invalid {
                var: "CRM_FAILURE_POLICY",
                reason: format!("expected `degrade` or `surface`, got `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `host:port` to bind.
    pub address: String,
    pub cors_origins: Vec<String>,
    /// Records fetched per `/ask`.
    pub record_limit: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            record_limit: DEFAULT_RECORD_LIMIT,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Reads `API_ADDRESS`, `CORS_ORIGINS`, `CRM_RECORD_LIMIT` and
    /// `CRM_FAILURE_POLICY`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(addr) = env_opt("API_ADDRESS") {
            cfg.address = addr.trim().to_string();
        }
        if let Some(origins) = env_opt("CORS_ORIGINS") {
            cfg.cors_origins = parse_origins(&origins);
        }
        if let Some(limit) = env_opt("CRM_RECORD_LIMIT") {
            cfg.record_limit = limit.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "CRM_RECORD_LIMIT",
                reason: "expected a non-negative integer".into(),
            })?;
        }
        if let Some(policy) = env_opt("CRM_FAILURE_POLICY") {
            cfg.failure_policy = policy.parse()?;
        }

        Ok(cfg)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_opt(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://a:1 , ,http://b:2,"),
            vec!["http://a:1".to_string(), "http://b:2".to_string()]
        );
    }

    #[test]
    fn failure_policy_parsing() {
        assert_eq!("DEGRADE".parse::<FailurePolicy>().unwrap(), FailurePolicy::Degrade);
        assert_eq!("surface".parse::<FailurePolicy>().unwrap(), FailurePolicy::Surface);
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn defaults_match_dev_setup() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.record_limit, 3);
        assert_eq!(cfg.cors_origins.len(), 4);
        assert_eq!(cfg.failure_policy, FailurePolicy::Degrade);
    }
}
