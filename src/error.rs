use crate::api::models::RecordId;
use crate::pipeline::partition::LeaguePredictions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Failures talking to the remote store. The repository absorbs these into an
/// empty result and reports them; they never reach the service's caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Network(String),

    #[error("Store rejected credentials (status {0})")]
    Unauthorized(u16),

    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("JSON parsing error: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDate {
    pub id: RecordId,
    pub date: String,
}

/// Raised when one or more records in a batch carry a date that cannot be
/// parsed. Every offending record is listed; the well-formed siblings are kept
/// in `well_formed` so the batch can still be inspected.
#[derive(Error, Debug, Clone)]
#[error("Malformed date on record(s): {}", describe(.records))]
pub struct MalformedRecordError {
    pub records: Vec<MalformedDate>,
    pub well_formed: LeaguePredictions,
}

impl MalformedRecordError {
    pub fn ids(&self) -> Vec<&RecordId> {
        self.records.iter().map(|r| &r.id).collect()
    }
}

fn describe(records: &[MalformedDate]) -> String {
    records
        .iter()
        .map(|r| format!("{} ({:?})", r.id, r.date))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_error_lists_every_record() {
        let err = MalformedRecordError {
            records: vec![
                MalformedDate {
                    id: RecordId::from("7"),
                    date: "not-a-date".to_string(),
                },
                MalformedDate {
                    id: RecordId::from("9"),
                    date: "".to_string(),
                },
            ],
            well_formed: LeaguePredictions::default(),
        };

        let msg = err.to_string();
        assert!(msg.contains("7 (\"not-a-date\")"));
        assert!(msg.contains("9 (\"\")"));
        assert_eq!(err.ids(), vec![&RecordId::from("7"), &RecordId::from("9")]);
    }
}
