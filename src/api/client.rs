use crate::config::Config;
use crate::error::AppError;
use governor::{clock::DefaultClock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;
use super::MatchSource;

// Development keys allow 20 req/s and 100 req/2min
const BURST_REQUESTS: u32 = 20;
const REPLENISH_PERIOD: Duration = Duration::from_millis(1200);
const RATE_LIMIT_POLL: Duration = Duration::from_millis(50);
const MAX_429_RETRIES: u32 = 3;

pub struct RiotApiClient {
    config: Config,
    base_url: String,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Self {
        let burst = NonZeroU32::new(BURST_REQUESTS).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(REPLENISH_PERIOD)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .user_agent(concat!("match_stats/", env!("CARGO_PKG_VERSION")))
            .build();

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| endpoints::routing_base_url(&config.region));

        RiotApiClient {
            config,
            base_url,
            agent,
            rate_limiter: RateLimiter::direct(quota),
        }
    }

    fn wait_for_quota(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(RATE_LIMIT_POLL);
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_quota();
            debug!(url, "GET");

            let response = self
                .agent
                .get(url)
                .set("X-Riot-Token", &self.config.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, resp)) => {
                    if retry_count >= MAX_429_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait = resp
                        .header("Retry-After")
                        .and_then(|secs| secs.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Duration::from_millis(2000 * (retry_count + 1) as u64));
                    warn!(url, wait_ms = wait.as_millis() as u64, "rate limited by the API");
                    thread::sleep(wait);
                    retry_count += 1;
                }
                Err(ureq::Error::Status(status, resp)) => {
                    let body = resp.into_string().unwrap_or_default();
                    return Err(AppError::HttpStatus {
                        status,
                        url: url.to_string(),
                        body: body.trim().to_string(),
                    });
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

impl MatchSource for RiotApiClient {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_url(&self.base_url, game_name, tag_line);

        let body = self
            .execute_request(&url)
            .map_err(|e| account_error(game_name, tag_line, e))?;
        serde_json::from_str(&body).map_err(|_| {
            AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
        })
    }

    fn get_match_ids(
        &self,
        puuid: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_url(
            &self.base_url,
            puuid,
            start,
            count,
            self.config.start_time,
            self.config.end_time,
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(e.to_string())
        })
    }

    fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_url(&self.base_url, match_id);

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(format!("match {}: {}", match_id, e))
        })
    }
}

// Only a 404 means the Riot ID does not exist; outages keep their own error.
fn account_error(game_name: &str, tag_line: &str, err: AppError) -> AppError {
    match err {
        AppError::HttpStatus { status: 404, .. } => {
            AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
        }
        other => other,
    }
}
