use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use menagerie::{scenario::ScenarioLoader, session::SessionStatus};

#[derive(Debug, Parser)]
#[command(author, version, about = "Menagerie zoo simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/sunny_acres.yaml")]
    scenario: PathBuf,

    /// Override session length in days
    #[arg(long)]
    days: Option<u32>,

    /// Override the RNG seed (entropy when neither is set)
    #[arg(long)]
    seed: Option<u64>,

    /// Override snapshot interval in days, 0 disables
    #[arg(long)]
    snapshot_interval: Option<u32>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `menagerie=debug` (defaults to RUST_LOG, then info)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid log level '{directives}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let days = scenario.days(cli.days);
    let snapshot_dir = cli
        .snapshot_dir
        .unwrap_or_else(|| PathBuf::from("snapshots"));
    let settings = scenario.engine_settings(cli.seed, cli.snapshot_interval, snapshot_dir);

    let mut session = scenario.start_session(settings, days)?;
    let seed = session.engine().seed();
    scenario.play(&mut session, |report| {
        for event in &report.events {
            println!("Day {}: {}", report.day, event);
        }
        for death in &report.deaths {
            println!("Day {}: {}", report.day, death);
        }
    })?;

    let summary = session.zoo().summary();
    match session.status() {
        SessionStatus::Bankrupt { day } => println!(
            "'{}' went bankrupt on day {} (seed {}). Money: {}",
            summary.name, day, seed, summary.money
        ),
        _ => println!(
            "'{}' completed {} days (seed {}). Money: {}, popularity: {}, animals: {}",
            summary.name, days, seed, summary.money, summary.popularity, summary.animals
        ),
    }
    Ok(())
}
