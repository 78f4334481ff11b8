//! swipekit CLI
//!
//! Runs headless swipe scenarios and prints the default configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use swipekit_app::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};
use swipekit_widgets::SwipeConfig;

/// Headless driver for the swipe-to-reveal cell
#[derive(Parser, Debug)]
#[command(name = "swipekit")]
#[command(about = "Headless driver for the swipe-to-reveal cell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario and print its report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Cell configuration (TOML); replaces the scenario's own config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,

        /// Write the report to this relative path instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            scenario,
            config,
            tick_ms,
            report,
        } => run(scenario, config, tick_ms, report),
        Command::Config => {
            print!("{}", SwipeConfig::default().to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(
    scenario_path: PathBuf,
    config_path: Option<PathBuf>,
    tick_ms: u64,
    report_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let scenario = HeadlessScenario::from_path(&scenario_path)?;
    let config = config_path
        .as_deref()
        .map(SwipeConfig::load)
        .transpose()?;

    let runtime_cfg = HeadlessRunConfig { tick_ms };

    tracing::info!(
        "Running {} ({} steps)",
        scenario_path.display(),
        scenario.steps.len()
    );
    let outcome = run_loaded_scenario(&scenario, runtime_cfg, config)?;
    let report = outcome.report();

    match report_path {
        Some(path) => {
            report.write_to_path(&path)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        tracing::error!(
            step = ?report.failed_step_index,
            "Scenario failed: {}",
            report.message.as_deref().unwrap_or("assertion failed")
        );
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(
        frames = report.elapsed_frames,
        "Scenario passed, cell {:?} at {}",
        report.final_state,
        report.final_offset
    );
    Ok(ExitCode::SUCCESS)
}
