use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, MAX_BODY_SIZE_BYTES, RATE_LIMIT_BURST, RATE_LIMIT_PER_MINUTE,
    REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS,
};

/// Parses a positive number from `value`, falling back to `default` when
/// the variable is missing, malformed or zero.
fn parse_or<T>(env_var: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + PartialEq + Default + Copy,
{
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => parsed,
        _ => {
            tracing::warn!(env_var = env_var, value = %raw, "ignoring invalid value in configuration");
            default
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, the environment in production.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let request_timeout_secs = parse_or(
            REQUEST_TIMEOUT_SECS,
            lookup(REQUEST_TIMEOUT_SECS),
            default.request_timeout.as_secs(),
        );
        let shutdown_timeout_secs = parse_or(
            SHUTDOWN_TIMEOUT_SECS,
            lookup(SHUTDOWN_TIMEOUT_SECS),
            default.shutdown_timeout.as_secs(),
        );

        let cors_allowed_origins = lookup(CORS_ALLOWED_ORIGINS)
            .map(|v| parse_origins(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute: parse_or(
                RATE_LIMIT_PER_MINUTE,
                lookup(RATE_LIMIT_PER_MINUTE),
                default.rate_limit_per_minute,
            ),
            rate_limit_burst: parse_or(RATE_LIMIT_BURST, lookup(RATE_LIMIT_BURST), default.rate_limit_burst),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_body_size: parse_or(MAX_BODY_SIZE_BYTES, lookup(MAX_BODY_SIZE_BYTES), default.max_body_size),
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}
