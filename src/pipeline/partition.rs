use crate::api::models::DisplayPredictionRecord;
use crate::error::{MalformedDate, MalformedRecordError};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use tracing::warn;

/// The two buckets a league's predictions are shown in. Each keeps the
/// relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaguePredictions {
    pub upcoming: Vec<DisplayPredictionRecord>,
    pub history: Vec<DisplayPredictionRecord>,
}

impl LeaguePredictions {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.history.len()
    }
}

/// Calendar date of a stored match date: `YYYY-MM-DD`, or the date part of
/// an RFC 3339 timestamp as written.
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Splits records into upcoming (`date >= today`) and history
/// (`date < today`). Any record whose date does not parse fails the whole
/// batch; the error names all of them and carries the rest of the split.
pub fn partition(
    records: Vec<DisplayPredictionRecord>,
    today: NaiveDate,
) -> Result<LeaguePredictions, MalformedRecordError> {
    let mut split = LeaguePredictions::default();
    let mut malformed = Vec::new();

    for mut record in records {
        match parse_match_date(&record.date_iso) {
            None => malformed.push(MalformedDate {
                id: record.id.clone(),
                date: record.date_iso.clone(),
            }),
            Some(date) if date >= today => {
                // Upcoming matches have no result yet.
                if record.has_outcome() {
                    warn!(id = %record.id, date = %date, "dropping result fields from upcoming prediction");
                    record.clear_outcome();
                }
                split.upcoming.push(record);
            }
            Some(_) => split.history.push(record),
        }
    }

    if malformed.is_empty() {
        Ok(split)
    } else {
        Err(MalformedRecordError {
            records: malformed,
            well_formed: split,
        })
    }
}
