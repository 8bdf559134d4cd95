//! PolicySim command-line front end.
//!
//! Reads the JSON a browser front end would send
//! (`{"selectedPolicies": [...], "policyIntensities": {...}, "scenario": "..."}`)
//! and prints results as JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::Level;

use policysim::catalog;
use policysim::{
    Engine, EngineConfig, MetricId, RawSimulationInput, Scenario, SimulationInput,
    SimulationReport,
};

#[derive(Debug, Parser)]
#[command(name = "policysim", version, about = "Education AI policy simulator")]
struct Cli {
    /// Engine configuration (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute current metrics for an input.
    Compute {
        /// Input file; reads stdin when omitted or "-".
        input: Option<PathBuf>,

        /// Also emit the yearly series for these metrics (repeatable).
        #[arg(long = "series", value_name = "METRIC")]
        series: Vec<MetricId>,

        /// Also emit the per-lever breakdown.
        #[arg(long)]
        explain: bool,
    },
    /// Emit the full report: metrics, every series and the breakdown.
    Report {
        /// Input file; reads stdin when omitted or "-".
        input: Option<PathBuf>,
    },
    /// List levers, metrics and scenarios.
    Catalog,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config)?;

    let output = match &cli.command {
        Command::Compute {
            input,
            series,
            explain,
        } => {
            let input = read_input(input.as_deref())?;
            let mut out = json!({
                "fingerprint": input.fingerprint(),
                "metrics": engine.compute_or_baseline(&input),
            });
            if !series.is_empty() {
                out["series"] = serde_json::to_value(engine.generate_combined(series, &input))?;
            }
            if *explain {
                out["explanation"] = serde_json::to_value(engine.explain(&input))?;
            }
            out
        }
        Command::Report { input } => {
            let input = read_input(input.as_deref())?;
            serde_json::to_value(SimulationReport::build(&engine, &input))?
        }
        Command::Catalog => json!({
            "policies": catalog::policies(),
            "metrics": catalog::metrics(),
            "scenarios": Scenario::ALL
                .iter()
                .map(|s| json!({ "id": s, "label": s.label(), "baseline": s.baseline() }))
                .collect::<Vec<_>>(),
        }),
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let raw = RawSimulationInput::from_json_str(&text)?;
    Ok(raw.normalize())
}
