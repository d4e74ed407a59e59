//! Garrison - Entry Point
//!
//! Parses flags, sets up logging, builds the simulator and hands the console
//! to the menu shell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use garrison::core::config::SimulationConfig;
use garrison::core::error::Result;
use garrison::data::load_sample_data;
use garrison::simulation::Simulator;
use garrison::ui::{Shell, ShellOptions};

/// Text-menu military unit management simulator
#[derive(Parser, Debug)]
#[command(name = "garrison")]
#[command(about = "Manage soldiers, teams and missions from a text menu")]
struct Args {
    /// Random seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load the sample scenario without asking
    #[arg(long)]
    sample: bool,

    /// Do not clear the terminal between menus
    #[arg(long)]
    no_clear: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("garrison=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut sim = Simulator::new(config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    writeln!(stdout, "Military Simulator")?;
    let load_sample = if args.sample {
        true
    } else {
        write!(stdout, "Load sample data? (y/n): ")?;
        stdout.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        answer.trim().eq_ignore_ascii_case("y")
    };

    if load_sample {
        load_sample_data(&mut sim.registry)?;
        writeln!(stdout, "Sample data loaded!")?;
    }

    let options = ShellOptions {
        clear_screen: !args.no_clear,
        pause_after_action: true,
    };
    let mut shell = Shell::new(sim, input, stdout, options);
    shell.run()?;

    tracing::info!("Session ended");
    Ok(())
}
