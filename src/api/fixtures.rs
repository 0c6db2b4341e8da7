// In-memory prediction store: the built-in demo data behind `--fixtures`, and
// the store the tests drive the pipeline with.

use crate::error::TransportError;

use super::client::{PredictionQuery, PredictionStore};
use super::models::*;

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    records: Vec<RawPredictionRecord>,
}

impl FixtureStore {
    pub fn new(records: Vec<RawPredictionRecord>) -> Self {
        FixtureStore { records }
    }

    /// A Premier League snapshot: three open predictions, two settled ones.
    /// Team names are in the store's long form.
    pub fn demo() -> Self {
        let league = League::PremierLeague;
        FixtureStore::new(vec![
            upcoming(1, league, "Manchester City FC", "Arsenal FC", "2025-04-05", "Draw", 62, "2-2"),
            upcoming(2, league, "Liverpool FC", "Chelsea FC", "2025-04-06", "Home Win", 70, "2-1"),
            upcoming(
                3,
                league,
                "Tottenham Hotspur FC",
                "Manchester United FC",
                "2025-04-07",
                "Away Win",
                58,
                "1-2",
            ),
            settled(
                101,
                league,
                "Aston Villa FC",
                "Fulham FC",
                "2025-03-22",
                ("Home Win", "2-1"),
                ("Home Win", "2-1"),
            ),
            settled(
                102,
                league,
                "Newcastle United FC",
                "Brighton & Hove Albion FC",
                "2025-03-23",
                ("Draw", "1-1"),
                ("Away Win", "1-2"),
            ),
        ])
    }
}

impl PredictionStore for FixtureStore {
    fn query(&self, query: &PredictionQuery) -> Result<Vec<RawPredictionRecord>, TransportError> {
        let mut rows: Vec<RawPredictionRecord> = self
            .records
            .iter()
            .filter(|r| query.league.map_or(true, |league| r.league == league.name()))
            .cloned()
            .collect();
        // Stable, so rows sharing a date keep insertion order.
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }
}

#[allow(clippy::too_many_arguments)]
fn upcoming(
    id: i64,
    league: League,
    home: &str,
    away: &str,
    date: &str,
    prediction: &str,
    confidence: i64,
    score_pred: &str,
) -> RawPredictionRecord {
    RawPredictionRecord {
        id: RecordId::from(id),
        league: league.name().to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        date: date.to_string(),
        prediction: prediction.to_string(),
        score_pred: score_pred.to_string(),
        confidence: Some(confidence),
        actual_result: None,
        score_actual: None,
        correct: None,
    }
}

fn settled(
    id: i64,
    league: League,
    home: &str,
    away: &str,
    date: &str,
    (prediction, score_pred): (&str, &str),
    (actual, score_actual): (&str, &str),
) -> RawPredictionRecord {
    RawPredictionRecord {
        id: RecordId::from(id),
        league: league.name().to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        date: date.to_string(),
        prediction: prediction.to_string(),
        score_pred: score_pred.to_string(),
        confidence: None,
        actual_result: Some(actual.to_string()),
        score_actual: Some(score_actual.to_string()),
        correct: Some(prediction == actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_filters_by_league() {
        let store = FixtureStore::demo();
        let pl = store
            .query(&PredictionQuery::new("predictions", Some(League::PremierLeague)))
            .unwrap();
        assert_eq!(pl.len(), 5);

        let liga = store
            .query(&PredictionQuery::new("predictions", Some(League::LaLiga)))
            .unwrap();
        assert!(liga.is_empty());
    }

    #[test]
    fn rows_come_back_in_date_order() {
        let store = FixtureStore::demo();
        let rows = store.query(&PredictionQuery::new("predictions", None)).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "102", "1", "2", "3"]);
    }

    #[test]
    fn settled_fixture_marks_correctness() {
        let rows = FixtureStore::demo()
            .query(&PredictionQuery::new("predictions", None))
            .unwrap();
        assert_eq!(rows[0].correct, Some(true));
        assert_eq!(rows[1].correct, Some(false));
    }
}
