use crate::config::Config;
use crate::error::{AppError, TransportError};
use governor::clock::{Clock, DefaultClock};
use governor::{
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;

const USER_AGENT: &str = "league_predictions/0.1.0";
const MAX_RETRIES: u32 = 3;
const RETRY_BASE_MS: u64 = 1000;

/// One read against the predictions table: optional league filter, rows
/// always ordered by match date ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionQuery {
    pub table: String,
    pub league: Option<League>,
}

impl PredictionQuery {
    pub fn new(table: impl Into<String>, league: Option<League>) -> Self {
        PredictionQuery {
            table: table.into(),
            league,
        }
    }
}

/// Read capability of the remote store.
pub trait PredictionStore: Send + Sync {
    fn query(&self, query: &PredictionQuery) -> Result<Vec<RawPredictionRecord>, TransportError>;
}

impl<S: PredictionStore + ?Sized> PredictionStore for Box<S> {
    fn query(&self, query: &PredictionQuery) -> Result<Vec<RawPredictionRecord>, TransportError> {
        (**self).query(query)
    }
}

pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    retry_base: Duration,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let (base_url, api_key) = config.store_credentials()?;
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build();
        let rate_limiter = RateLimiter::direct(Quota::per_second(config.max_requests_per_second));

        Ok(SupabaseClient {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            agent,
            rate_limiter,
            retry_base: Duration::from_millis(RETRY_BASE_MS),
        })
    }

    /// Base wait between retries after a 429; the n-th retry waits n times this.
    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    fn throttle(&self) {
        let clock = DefaultClock::default();
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(clock.now()));
        }
    }

    fn execute_request(&self, query: &PredictionQuery) -> Result<String, TransportError> {
        let url = endpoints::table_url(&self.base_url, &query.table);
        let params = endpoints::query_params(query);
        let bearer = format!("Bearer {}", self.api_key);

        let mut retry_count = 0;

        loop {
            self.throttle();

            let mut request = self
                .agent
                .get(&url)
                .set("apikey", &self.api_key)
                .set("Authorization", &bearer)
                .set("Accept", "application/json");
            for (key, value) in &params {
                request = request.query(key, value);
            }

            match request.call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| TransportError::Network(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(TransportError::RateLimited);
                    }
                    let wait = self.retry_base * (retry_count + 1);
                    warn!(wait_ms = wait.as_millis() as u64, "store rate limited the request, retrying");
                    thread::sleep(wait);
                    retry_count += 1;
                }
                Err(ureq::Error::Status(status @ (401 | 403), _)) => {
                    return Err(TransportError::Unauthorized(status));
                }
                Err(ureq::Error::Status(status, resp)) => {
                    let body = resp.into_string().unwrap_or_default();
                    return Err(TransportError::Status { status, body });
                }
                Err(ureq::Error::Transport(e)) => {
                    return Err(TransportError::Network(e.to_string()));
                }
            }
        }
    }
}

impl PredictionStore for SupabaseClient {
    fn query(&self, query: &PredictionQuery) -> Result<Vec<RawPredictionRecord>, TransportError> {
        debug!(table = %query.table, league = ?query.league, "querying prediction store");
        let body = self.execute_request(query)?;
        parse_records(&body)
    }
}

pub fn parse_records(body: &str) -> Result<Vec<RawPredictionRecord>, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}
