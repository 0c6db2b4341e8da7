use crate::api::models::DisplayPredictionRecord;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy_percent: u32,
}

impl PredictionStats {
    pub fn new(correct: usize, incorrect: usize) -> Self {
        PredictionStats {
            correct,
            incorrect,
            accuracy_percent: accuracy_percent(correct, incorrect),
        }
    }

    pub fn settled(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Share of correct predictions as a whole percentage, rounded half up.
/// Zero when nothing has been settled.
pub fn accuracy_percent(correct: usize, incorrect: usize) -> u32 {
    let total = correct + incorrect;
    if total == 0 {
        0
    } else {
        ((correct * 200 + total) / (2 * total)) as u32
    }
}

/// Correct / incorrect counts over settled history records. Records without
/// a `correct` flag are skipped.
pub fn compute_stats(history: &[DisplayPredictionRecord]) -> PredictionStats {
    let correct = history.iter().filter(|r| r.correct == Some(true)).count();
    let incorrect = history.iter().filter(|r| r.correct == Some(false)).count();
    PredictionStats::new(correct, incorrect)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeBreakdown {
    pub prediction: String,
    pub stats: PredictionStats,
}

/// Accuracy per predicted outcome ("Home Win", "Draw", ...), busiest label
/// first.
pub fn breakdown_by_outcome(history: &[DisplayPredictionRecord]) -> Vec<OutcomeBreakdown> {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();

    for record in history {
        let Some(correct) = record.correct else {
            continue;
        };
        let entry = tally.entry(record.prediction.as_str()).or_insert((0, 0));
        if correct {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut breakdown: Vec<OutcomeBreakdown> = tally
        .into_iter()
        .map(|(prediction, (correct, incorrect))| OutcomeBreakdown {
            prediction: prediction.to_string(),
            stats: PredictionStats::new(correct, incorrect),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.stats
            .settled()
            .cmp(&a.stats.settled())
            .then_with(|| a.prediction.cmp(&b.prediction))
    });

    breakdown
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub correct: bool,
    pub length: usize,
}

/// Run of identical outcomes ending at the latest settled prediction.
/// Expects history in ascending date order; unsettled records are skipped.
pub fn current_streak(history: &[DisplayPredictionRecord]) -> Option<Streak> {
    let mut settled = history.iter().rev().filter_map(|r| r.correct);
    let latest = settled.next()?;
    let length = 1 + settled.take_while(|&c| c == latest).count();
    Some(Streak {
        correct: latest,
        length,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: PredictionStats,
    pub pending: usize,
    pub by_outcome: Vec<OutcomeBreakdown>,
    pub streak: Option<Streak>,
}

pub fn report(history: &[DisplayPredictionRecord]) -> StatsReport {
    let stats = compute_stats(history);
    StatsReport {
        stats,
        pending: history.len() - stats.settled(),
        by_outcome: breakdown_by_outcome(history),
        streak: current_streak(history),
    }
}
