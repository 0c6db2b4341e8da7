use crate::api::models::{DisplayPredictionRecord, RawPredictionRecord};
use crate::config::DEFAULT_DATE_FORMAT;
use std::fmt::Write;

use super::normalize::normalize_team_name;
use super::partition::parse_match_date;

/// Turns stored rows into display rows. Never fails: a date that does not
/// parse is shown as-is and left for the partitioner to reject.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    date_format: String,
}

impl Default for RecordMapper {
    fn default() -> Self {
        RecordMapper::new(DEFAULT_DATE_FORMAT)
    }
}

impl RecordMapper {
    pub fn new(date_format: impl Into<String>) -> Self {
        RecordMapper {
            date_format: date_format.into(),
        }
    }

    pub fn map(&self, raw: RawPredictionRecord) -> DisplayPredictionRecord {
        let date_display = self.format_date(&raw.date);

        DisplayPredictionRecord {
            id: raw.id,
            league: raw.league,
            home_team: normalize_team_name(&raw.home_team).to_string(),
            away_team: normalize_team_name(&raw.away_team).to_string(),
            date_iso: raw.date,
            date_display,
            prediction: raw.prediction,
            score_pred: raw.score_pred,
            confidence: raw.confidence.unwrap_or(0).clamp(0, 100) as u8,
            actual_result: raw.actual_result,
            score_actual: raw.score_actual,
            correct: raw.correct,
        }
    }

    pub fn map_all(&self, raw: Vec<RawPredictionRecord>) -> Vec<DisplayPredictionRecord> {
        raw.into_iter().map(|r| self.map(r)).collect()
    }

    fn format_date(&self, raw: &str) -> String {
        let Some(date) = parse_match_date(raw) else {
            return raw.to_string();
        };

        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => raw.to_string(),
        }
    }
}
