//! Cricket tournament CLI
//!
//! Sets up a round-robin, plays fixtures one at a time and prints the
//! points table. State lives in flat JSON files under the data directory.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cricket_core::config::ServiceConfig;
use cricket_core::{api, SetupRequest, TournamentError, TournamentService};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cricket")]
#[command(about = "Run a round-robin limited-overs cricket tournament", long_about = None)]
struct Cli {
    /// Directory holding the tournament files [env: CRICKET_DATA_DIR, default: data]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed the match simulator for reproducible results [env: CRICKET_SEED]
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print raw API responses as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new tournament, replacing any existing one
    Setup {
        /// Tournament name
        #[arg(long)]
        name: String,

        /// Overs per innings
        #[arg(long)]
        overs: u32,

        /// Team name (repeat for each team)
        #[arg(long = "team", required = true)]
        teams: Vec<String>,
    },

    /// Show whether a tournament exists and how far it has got
    Status,

    /// List the fixtures still to be played
    Schedule,

    /// Simulate the next fixture(s)
    Simulate(SimulateArgs),

    /// Show the ranked points table
    Table,

    /// Show every completed match
    Results,

    /// Delete all tournament data
    Reset,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Number of fixtures to play
    #[arg(long, default_value = "1", conflicts_with = "all")]
    count: usize,

    /// Play every remaining fixture
    #[arg(long)]
    all: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = ServiceConfig::from_env_with_overrides(cli.data_dir, cli.seed)?;
    log::debug!("Data directory: {}, seed: {:?}", config.data_dir.display(), config.seed);
    let mut service = TournamentService::new(config);

    if cli.json {
        let output = run_json(&mut service, cli.command)?;
        println!("{output}");
        if reports_failure(&output)? {
            bail!("request failed; see the error envelope above");
        }
        return Ok(());
    }

    let outcome = run(&mut service, cli.command);
    if let Err(err) = &outcome {
        if let Some(TournamentError::Store(store_err)) = err.downcast_ref::<TournamentError>() {
            if store_err.is_recoverable_by_reset() {
                log::warn!("Tournament files look damaged; `cricket reset` clears them");
            }
        }
    }
    outcome
}

fn run(service: &mut TournamentService, command: Commands) -> Result<()> {
    match command {
        Commands::Setup { name, overs, teams } => {
            let summary = service
                .setup(SetupRequest { name, overs, teams })
                .context("Failed to set up tournament")?;
            println!("{}", render::setup_summary(&summary));
        }

        Commands::Status => {
            let status = service.status().context("Failed to read tournament status")?;
            println!("{}", render::status(&status));
        }

        Commands::Schedule => {
            let fixtures = service.schedule().context("Failed to read schedule")?;
            println!("{}", render::fixtures(&fixtures));
        }

        Commands::Simulate(args) => {
            let count = if args.all { usize::MAX } else { args.count };
            let results = service.simulate_many(count).context("Failed to simulate")?;
            for result in &results {
                println!("{}\n", render::match_result(result));
            }
        }

        Commands::Table => {
            let table = service.points_table().context("Failed to read points table")?;
            println!("{}", render::points_table(&table));
        }

        Commands::Results => {
            let results = service.results().context("Failed to read results")?;
            if results.is_empty() {
                println!("No matches played yet.");
            }
            for result in &results {
                println!("{}\n", render::match_result(result));
            }
        }

        Commands::Reset => {
            service.reset().context("Failed to reset tournament")?;
            println!("Tournament data cleared from {}", service.store().data_dir().display());
        }
    }

    Ok(())
}

/// Route a command through the JSON API so the output matches what a
/// network client would receive.
fn run_json(service: &mut TournamentService, command: Commands) -> Result<String> {
    let response = match command {
        Commands::Setup { name, overs, teams } => {
            let request = serde_json::json!({ "name": name, "overs": overs, "teams": teams });
            api::setup_json(service, &request.to_string())
        }
        Commands::Status => api::status_json(service),
        Commands::Schedule => api::schedule_json(service),
        Commands::Simulate(args) => {
            let count = if args.all { usize::MAX } else { args.count };
            let mut responses = Vec::new();
            for _ in 0..count {
                let response = api::simulate_next_json(service);
                let value: serde_json::Value = serde_json::from_str(&response)?;
                let success = value["success"].as_bool().unwrap_or(false);
                // An exhausted schedule ends `--all`; report it only if nothing was played
                if !success && !responses.is_empty() {
                    break;
                }
                responses.push(value);
                if !success {
                    break;
                }
            }
            serde_json::to_string_pretty(&responses)?
        }
        Commands::Table => api::points_table_json(service),
        Commands::Results => api::results_json(service),
        Commands::Reset => api::reset_json(service),
    };

    Ok(response)
}

/// Whether a JSON response (one envelope or a list of them) carries a failure.
fn reports_failure(output: &str) -> Result<bool> {
    let value: serde_json::Value = serde_json::from_str(output)?;
    let failed = |envelope: &serde_json::Value| envelope["success"].as_bool() != Some(true);

    Ok(match value.as_array() {
        Some(envelopes) => envelopes.iter().any(failed),
        None => failed(&value),
    })
}
