use crate::api::client::PredictionStore;
use crate::api::models::League;
use crate::error::MalformedRecordError;
use chrono::NaiveDate;
use tracing::{debug, info};

use super::mapper::RecordMapper;
use super::partition::{partition, LeaguePredictions};
use super::repository::{FailureReporter, PredictionRepository};

pub use crate::analysis::stats::{compute_stats, PredictionStats};

/// Fetch → map → partition for one league. Holds no state between calls, so
/// a shared service can serve concurrent callers.
pub struct PredictionService<S, R> {
    repository: PredictionRepository<S, R>,
    mapper: RecordMapper,
}

impl<S: PredictionStore, R: FailureReporter> PredictionService<S, R> {
    pub fn new(repository: PredictionRepository<S, R>, mapper: RecordMapper) -> Self {
        PredictionService { repository, mapper }
    }

    /// Upcoming and history predictions for `league` as of `today`.
    ///
    /// A failed fetch looks like an empty league here; see the repository's
    /// reporter to tell them apart. Records with unparseable dates fail the
    /// call.
    pub fn get_predictions(
        &self,
        league: League,
        today: NaiveDate,
    ) -> Result<LeaguePredictions, MalformedRecordError> {
        let raw = self.repository.fetch_all(league);
        if raw.is_empty() {
            debug!(league = %league, "no predictions available");
            return Ok(LeaguePredictions::default());
        }

        let mapped = self.mapper.map_all(raw);
        let split = partition(mapped, today)?;

        info!(
            league = %league,
            today = %today,
            upcoming = split.upcoming.len(),
            history = split.history.len(),
            "predictions partitioned"
        );
        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures::FixtureStore;
    use crate::pipeline::repository::TracingReporter;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn demo_service() -> PredictionService<FixtureStore, TracingReporter> {
        PredictionService::new(
            PredictionRepository::new(FixtureStore::demo(), TracingReporter),
            RecordMapper::default(),
        )
    }

    #[test]
    fn demo_league_splits_around_today() {
        let result = demo_service()
            .get_predictions(League::PremierLeague, day("2025-04-01"))
            .unwrap();

        assert_eq!(result.upcoming.len(), 3);
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.upcoming[0].home_team, "Manchester City");
        assert_eq!(result.upcoming[0].away_team, "Arsenal");
        assert_eq!(result.history[1].away_team, "Brighton");
        assert_eq!(result.history[0].date_display, "22/03/2025");
    }

    #[test]
    fn moving_today_moves_records() {
        let service = demo_service();
        let early = service
            .get_predictions(League::PremierLeague, day("2025-03-01"))
            .unwrap();
        assert_eq!(early.upcoming.len(), 5);

        let late = service
            .get_predictions(League::PremierLeague, day("2025-05-01"))
            .unwrap();
        assert_eq!(late.history.len(), 5);
        assert_eq!(compute_stats(&late.history).settled(), 2);
    }

    #[test]
    fn empty_league_is_empty() {
        let result = demo_service()
            .get_predictions(League::Bundesliga, day("2025-04-01"))
            .unwrap();
        assert_eq!(result, LeaguePredictions::default());
    }
}
