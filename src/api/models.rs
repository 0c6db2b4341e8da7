use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// Store-assigned identifier. Supabase hands out int8 ids, older rows and the
// demo fixtures may use strings, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "IdRepr")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl From<IdRepr> for RecordId {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Number(n) => RecordId(n.to_string()),
            IdRepr::Text(s) => RecordId(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId(n.to_string())
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum League {
    #[default]
    #[serde(rename = "Premier League")]
    PremierLeague,
    #[serde(rename = "La Liga")]
    LaLiga,
    #[serde(rename = "Serie A")]
    SerieA,
    #[serde(rename = "Bundesliga")]
    Bundesliga,
}

impl League {
    pub const ALL: [League; 4] = [
        League::PremierLeague,
        League::LaLiga,
        League::SerieA,
        League::Bundesliga,
    ];

    /// Name as stored in the `league` column.
    pub fn name(&self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::LaLiga => "La Liga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
        }
    }

    pub fn slug(&self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for League {
    type Err = String;

    // Accepts "Premier League", "premier-league", "premier_league", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        League::ALL
            .iter()
            .copied()
            .find(|league| league.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = League::ALL.iter().map(|l| l.name()).collect();
                format!("unknown league '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

// One row of the `predictions` table. Column names are snake_case in the
// store; the camelCase spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPredictionRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub league: String,
    #[serde(alias = "homeTeam", default, deserialize_with = "nullable_string")]
    pub home_team: String,
    #[serde(alias = "awayTeam", default, deserialize_with = "nullable_string")]
    pub away_team: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub prediction: String,
    #[serde(alias = "scorePred", default, deserialize_with = "nullable_string")]
    pub score_pred: String,
    #[serde(default)]
    pub confidence: Option<i64>,
    #[serde(alias = "actualResult", default)]
    pub actual_result: Option<String>,
    #[serde(alias = "scoreActual", default)]
    pub score_actual: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record ready for presentation: canonical team names, formatted date,
/// confidence defaulted. The ISO date is kept alongside the formatted one
/// because only the former is safe to compare.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPredictionRecord {
    pub id: RecordId,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub date_iso: String,
    pub date_display: String,
    pub prediction: String,
    pub score_pred: String,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl DisplayPredictionRecord {
    pub fn has_outcome(&self) -> bool {
        self.correct.is_some() || self.actual_result.is_some() || self.score_actual.is_some()
    }

    pub fn clear_outcome(&mut self) {
        self.correct = None;
        self.actual_result = None;
        self.score_actual = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_row_with_numeric_id_and_nulls() {
        let json = r#"{
            "id": 42,
            "league": "Premier League",
            "home_team": "Arsenal FC",
            "away_team": "Chelsea FC",
            "date": "2025-04-05",
            "prediction": "Home Win",
            "score_pred": "2-1",
            "confidence": null,
            "actual_result": null,
            "score_actual": null,
            "correct": null,
            "updated_at": "2025-04-01T10:00:00"
        }"#;

        let record: RawPredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::from(42));
        assert_eq!(record.home_team, "Arsenal FC");
        assert_eq!(record.confidence, None);
        assert_eq!(record.correct, None);
    }

    #[test]
    fn decodes_camel_case_row_with_missing_fields() {
        let json = r#"{
            "id": "101",
            "homeTeam": "Aston Villa",
            "awayTeam": "Fulham",
            "date": "2025-03-22",
            "prediction": "Home Win",
            "actualResult": "Home Win",
            "scorePred": "2-1",
            "scoreActual": "2-1",
            "correct": true
        }"#;

        let record: RawPredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "101");
        assert_eq!(record.league, "");
        assert_eq!(record.score_pred, "2-1");
        assert_eq!(record.score_actual.as_deref(), Some("2-1"));
        assert_eq!(record.correct, Some(true));
    }

    #[test]
    fn null_date_decodes_to_empty_string() {
        let json = r#"{"id": 1, "home_team": "A", "away_team": "B", "date": null}"#;
        let record: RawPredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "");
    }

    #[test]
    fn league_parses_names_and_slugs() {
        assert_eq!("Premier League".parse::<League>(), Ok(League::PremierLeague));
        assert_eq!("la-liga".parse::<League>(), Ok(League::LaLiga));
        assert_eq!("SERIE_A".parse::<League>(), Ok(League::SerieA));
        assert!("Eredivisie".parse::<League>().is_err());
    }

    #[test]
    fn league_serializes_as_store_name() {
        let json = serde_json::to_string(&League::SerieA).unwrap();
        assert_eq!(json, "\"Serie A\"");
    }
}
