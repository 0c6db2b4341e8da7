use crate::api::client::{PredictionQuery, PredictionStore};
use crate::api::models::{League, RawPredictionRecord};
use crate::config::{FilterMode, DEFAULT_TABLE};
use crate::error::TransportError;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// A store failure the repository absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub operation: &'static str,
    pub league: League,
    pub error: TransportError,
}

/// Side channel for failures that do not propagate to the caller.
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &StoreFailure);
}

impl<R: FailureReporter + ?Sized> FailureReporter for Arc<R> {
    fn report(&self, failure: &StoreFailure) {
        (**self).report(failure)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &StoreFailure) {
        error!(
            operation = failure.operation,
            league = %failure.league,
            error = %failure.error,
            "prediction store query failed; serving empty result"
        );
    }
}

/// Logs like [`TracingReporter`] and keeps every report, so a caller can tell
/// "the fetch failed" apart from "the league has no predictions".
#[derive(Debug, Default)]
pub struct RecordingReporter {
    failures: Mutex<Vec<StoreFailure>>,
}

impl RecordingReporter {
    pub fn failures(&self) -> Vec<StoreFailure> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn failed_for(&self, league: League) -> bool {
        self.failures().iter().any(|f| f.league == league)
    }
}

impl FailureReporter for RecordingReporter {
    fn report(&self, failure: &StoreFailure) {
        TracingReporter.report(failure);
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(failure.clone());
    }
}

pub struct PredictionRepository<S, R> {
    store: S,
    reporter: R,
    table: String,
    filter_mode: FilterMode,
}

impl<S: PredictionStore, R: FailureReporter> PredictionRepository<S, R> {
    pub fn new(store: S, reporter: R) -> Self {
        PredictionRepository {
            store,
            reporter,
            table: DEFAULT_TABLE.to_string(),
            filter_mode: FilterMode::Server,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    /// All predictions for `league`, ascending by date. A failed query is
    /// reported and yields an empty list; empty therefore means "nothing
    /// available right now", not necessarily "no predictions".
    pub fn fetch_all(&self, league: League) -> Vec<RawPredictionRecord> {
        let league_filter = match self.filter_mode {
            FilterMode::Server => Some(league),
            FilterMode::Client => None,
        };
        let query = PredictionQuery::new(self.table.clone(), league_filter);

        match self.store.query(&query) {
            Ok(records) => {
                let records: Vec<_> = match self.filter_mode {
                    FilterMode::Server => records,
                    FilterMode::Client => records
                        .into_iter()
                        .filter(|r| r.league == league.name())
                        .collect(),
                };
                debug!(league = %league, count = records.len(), "fetched predictions");
                records
            }
            Err(error) => {
                self.reporter.report(&StoreFailure {
                    operation: "fetch_all",
                    league,
                    error,
                });
                Vec::new()
            }
        }
    }
}
