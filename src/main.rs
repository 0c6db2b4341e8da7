use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use league_predictions::analysis::stats;
use league_predictions::api::client::{PredictionStore, SupabaseClient};
use league_predictions::api::fixtures::FixtureStore;
use league_predictions::api::models::League;
use league_predictions::config::Config;
use league_predictions::display::output::{
    display_error, display_info, display_league_report, display_success, print_json,
    LeagueReport, View,
};
use league_predictions::pipeline::mapper::RecordMapper;
use league_predictions::pipeline::repository::{PredictionRepository, RecordingReporter};
use league_predictions::pipeline::service::PredictionService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "League Predictions")]
#[command(about = "Football match predictions per league: upcoming, history and accuracy", long_about = None)]
struct Args {
    /// League name or slug (e.g. "Premier League", la-liga)
    #[arg(default_value_t = League::PremierLeague)]
    league: League,

    /// Treat this date as today (YYYY-MM-DD); defaults to the local date
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Which section to show
    #[arg(short, long, value_enum, default_value_t = View::All)]
    view: View,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Use the built-in demo data instead of the remote store
    #[arg(long)]
    fixtures: bool,

    /// Show every league
    #[arg(long)]
    all_leagues: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("league_predictions=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

const PROGRESS_TEMPLATE: &str = "{msg} [{bar:30.cyan/blue}] {pos}/{len}";

fn fetch_progress(leagues: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(leagues as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Fetching predictions");
    pb
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let table_output = args.format == OutputFormat::Table;

    let store: Box<dyn PredictionStore> = if args.fixtures {
        if table_output {
            display_info("Using built-in demo fixtures");
        }
        Box::new(FixtureStore::demo())
    } else {
        Box::new(SupabaseClient::new(&config).context("failed to set up the prediction store")?)
    };

    let reporter = Arc::new(RecordingReporter::default());
    let repository = PredictionRepository::new(store, reporter.clone())
        .with_table(config.table.clone())
        .with_filter_mode(config.filter_mode);
    let service = PredictionService::new(repository, RecordMapper::new(config.date_format.clone()));

    let leagues: Vec<League> = if args.all_leagues {
        League::ALL.to_vec()
    } else {
        vec![args.league]
    };

    let pb = fetch_progress(leagues.len(), table_output && leagues.len() > 1);

    let mut reports = Vec::with_capacity(leagues.len());
    for league in leagues {
        let predictions = service
            .get_predictions(league, today)
            .with_context(|| format!("bad prediction data for {}", league))?;
        pb.inc(1);

        reports.push(LeagueReport {
            league,
            today,
            fetch_failed: reporter.failed_for(league),
            stats: stats::report(&predictions.history),
            predictions,
        });
    }
    pb.finish_and_clear();

    match args.format {
        OutputFormat::Json => {
            if args.all_leagues {
                print_json(&reports)?;
            } else if let Some(report) = reports.first() {
                print_json(report)?;
            }
        }
        OutputFormat::Table => {
            for report in &reports {
                display_league_report(report, args.view);
            }
            let total: usize = reports.iter().map(|r| r.predictions.len()).sum();
            display_success(&format!("{} predictions loaded", total));
        }
    }

    Ok(())
}
