use crate::commands::{
    run_completeness, run_entitlements, run_lead, run_match, run_search, CompletenessArgs,
    EntitlementsArgs, LeadArgs, MatchArgs, SearchArgs,
};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use directory_rank::config::AppConfig;
use directory_rank::error::AppError;
use directory_rank::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "directory-rank",
    about = "Rank directory listings, score leads, and match patients from JSON snapshots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank a listing snapshot for a query and merge featured placements
    Search(SearchArgs),
    /// Recommend the best practices for a patient's quiz answers
    Match(MatchArgs),
    /// Score an inbound patient inquiry
    Lead(LeadArgs),
    /// Show the capability flags for a subscription state
    Entitlements(EntitlementsArgs),
    /// Recompute profile completeness for every listing in a snapshot
    Completeness(CompletenessArgs),
    /// Run every pipeline over a built-in sample dataset (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Search(args) => run_search(args, &config),
        Command::Match(args) => run_match(args),
        Command::Lead(args) => run_lead(args),
        Command::Entitlements(args) => run_entitlements(args),
        Command::Completeness(args) => run_completeness(args),
        Command::Demo(args) => run_demo(args, &config),
    }
}
