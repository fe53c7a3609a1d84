use crate::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REGION: &str = "euw1";
const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_REQUEST_DELAY_MS: u64 = 600;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 10_000;
const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delays and retry budget applied around every call to the match source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause between two successful requests.
    pub request_delay: Duration,
    /// Pause after a failed request before trying the same one again.
    pub retry_backoff: Duration,
    /// Total attempts per request, first try included.
    pub max_attempts: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    /// Replaces the routing host derived from `region` when set.
    pub base_url: Option<String>,
    pub page_size: usize,
    pub first_page_only: bool,
    /// Epoch seconds, inclusive lower bound of the match listing.
    pub start_time: Option<i64>,
    /// Epoch seconds, upper bound of the match listing.
    pub end_time: Option<i64>,
    pub request_timeout: Duration,
    pub pacing: Pacing,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RIOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in .env file".to_string())
            })?;

        let region = lookup("RIOT_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let base_url = lookup("RIOT_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let page_size = parse_or(&lookup, "MATCH_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let request_delay = parse_or(&lookup, "REQUEST_DELAY_MS", DEFAULT_REQUEST_DELAY_MS)?;
        let retry_backoff = parse_or(&lookup, "RETRY_BACKOFF_MS", DEFAULT_RETRY_BACKOFF_MS)?;
        let max_attempts = parse_or(&lookup, "MAX_FETCH_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let config = Config {
            api_key,
            region,
            base_url,
            page_size,
            first_page_only: false,
            start_time: None,
            end_time: None,
            request_timeout: Duration::from_secs(timeout_secs),
            pacing: Pacing {
                request_delay: Duration::from_millis(request_delay),
                retry_backoff: Duration::from_millis(retry_backoff),
                max_attempts,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants that CLI overrides can also break.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::ConfigError(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.pacing.max_attempts == 0 {
            return Err(AppError::ConfigError(
                "at least one fetch attempt is required".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err(AppError::ConfigError(
                    "--since must be earlier than --until".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{} is invalid: {}", key, e))),
        None => Ok(default),
    }
}
