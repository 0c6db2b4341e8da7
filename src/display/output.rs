use crate::analysis::stats::StatsReport;
use crate::api::models::{DisplayPredictionRecord, League};
use crate::error::AppError;
use crate::pipeline::partition::LeaguePredictions;
use chrono::NaiveDate;
use colored::*;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    Upcoming,
    History,
    Stats,
    #[default]
    All,
}

/// Everything shown for one league.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueReport {
    pub league: League,
    pub today: NaiveDate,
    pub fetch_failed: bool,
    #[serde(flatten)]
    pub predictions: LeaguePredictions,
    pub stats: StatsReport,
}

#[derive(Tabled)]
struct UpcomingRow {
    date: String,
    #[tabled(rename = "match")]
    fixture: String,
    prediction: String,
    score: String,
    confidence: String,
}

#[derive(Tabled)]
struct HistoryRow {
    date: String,
    #[tabled(rename = "match")]
    fixture: String,
    predicted: String,
    actual: String,
    result: String,
}

#[derive(Tabled)]
struct OutcomeRow {
    prediction: String,
    correct: String,
    incorrect: String,
    accuracy: String,
}

pub fn display_league_report(report: &LeagueReport, view: View) {
    println!(
        "\n{}",
        format!("⚽ {} predictions (as of {})", report.league, report.today)
            .bold()
            .cyan()
    );
    println!("{}", "=".repeat(60).cyan());

    if report.fetch_failed {
        display_warning("Could not reach the prediction store; showing no data.");
    }

    if matches!(view, View::Upcoming | View::All) {
        display_upcoming(&report.predictions.upcoming);
    }
    if matches!(view, View::History | View::All) {
        display_history(&report.predictions.history);
    }
    if matches!(view, View::Stats | View::All) {
        display_stats(&report.stats);
    }
}

pub fn display_upcoming(matches: &[DisplayPredictionRecord]) {
    println!("\n{}", "📅 UPCOMING".bold());

    if matches.is_empty() {
        println!("{}", "No upcoming predictions.".yellow());
        return;
    }

    let rows: Vec<UpcomingRow> = matches
        .iter()
        .map(|m| UpcomingRow {
            date: m.date_display.clone(),
            fixture: fixture(m),
            prediction: m.prediction.clone(),
            score: m.score_pred.clone(),
            confidence: confidence_badge(m.confidence),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_history(matches: &[DisplayPredictionRecord]) {
    println!("\n{}", "🕘 HISTORY".bold());

    if matches.is_empty() {
        println!("{}", "No history yet.".yellow());
        return;
    }

    let rows: Vec<HistoryRow> = matches
        .iter()
        .map(|m| HistoryRow {
            date: m.date_display.clone(),
            fixture: fixture(m),
            predicted: format!("{} ({})", m.score_pred, m.prediction),
            actual: match (&m.score_actual, &m.actual_result) {
                (Some(score), Some(result)) => format!("{} ({})", score, result),
                (Some(score), None) => score.clone(),
                (None, Some(result)) => result.clone(),
                (None, None) => "-".to_string(),
            },
            result: result_label(m.correct),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_stats(report: &StatsReport) {
    let stats = &report.stats;

    println!("\n{}", "📊 PREDICTION PERFORMANCE".bold());
    println!(
        "{} {} correct / {} incorrect ({}% accuracy)",
        "📈 Overall:".bold(),
        stats.correct.to_string().green(),
        stats.incorrect.to_string().red(),
        stats.accuracy_percent
    );
    if report.pending > 0 {
        println!("   {} awaiting a result", report.pending);
    }

    if let Some(streak) = report.streak {
        let line = format!(
            "{} {} in a row",
            streak.length,
            if streak.correct { "correct" } else { "missed" }
        );
        if streak.correct {
            println!("{} {}", "✅ Streak:".bold(), line.green());
        } else {
            println!("{} {}", "❌ Streak:".bold(), line.red());
        }
    }

    if report.by_outcome.is_empty() {
        println!();
        return;
    }

    let rows: Vec<OutcomeRow> = report
        .by_outcome
        .iter()
        .map(|b| OutcomeRow {
            prediction: b.prediction.clone(),
            correct: b.stats.correct.to_string(),
            incorrect: b.stats.incorrect.to_string(),
            accuracy: format!("{}%", b.stats.accuracy_percent),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::JsonError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message.yellow());
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn fixture(m: &DisplayPredictionRecord) -> String {
    format!("{} vs {}", m.home_team, m.away_team)
}

fn confidence_badge(confidence: u8) -> String {
    let label = format!("{}%", confidence);
    match confidence {
        70..=100 => label.green().to_string(),
        55..=69 => label.yellow().to_string(),
        _ => label,
    }
}

fn result_label(correct: Option<bool>) -> String {
    match correct {
        Some(true) => "✅ Correct".green().to_string(),
        Some(false) => "❌ Incorrect".red().to_string(),
        None => "pending".dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats;

    #[test]
    fn result_label_covers_unsettled() {
        colored::control::set_override(false);
        assert_eq!(result_label(Some(true)), "✅ Correct");
        assert_eq!(result_label(Some(false)), "❌ Incorrect");
        assert_eq!(result_label(None), "pending");
        assert_eq!(confidence_badge(62), "62%");
    }

    #[test]
    fn report_json_has_both_buckets() {
        let report = LeagueReport {
            league: League::LaLiga,
            today: NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(),
            fetch_failed: true,
            predictions: LeaguePredictions::default(),
            stats: stats::report(&[]),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["league"], "La Liga");
        assert_eq!(json["today"], "2025-03-25");
        assert_eq!(json["fetchFailed"], true);
        assert!(json["upcoming"].as_array().unwrap().is_empty());
        assert!(json["history"].as_array().unwrap().is_empty());
        assert_eq!(json["stats"]["accuracyPercent"], 0);
    }
}
