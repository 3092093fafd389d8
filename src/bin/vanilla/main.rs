//! `vanilla` - price European options from the command line.
//!
//! # Commands
//!
//! - `vanilla binomial` - price the configured lattice run
//! - `vanilla black-scholes` - price the configured closed-form run
//! - `vanilla compare` - both pricers on the lattice inputs
//! - `vanilla convergence` - lattice price against step count
//! - `vanilla cdf-accuracy` - error of the polynomial normal CDF
//!
//! Without `--config` the reference parameter sets are used.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vanilla_lib::PricingConfig;

mod commands;

/// European option pricer: binomial lattice and Black-Scholes
#[derive(Parser)]
#[command(name = "vanilla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price with the binomial lattice
    Binomial {
        /// Override the configured number of steps
        #[arg(short = 'n', long)]
        steps: Option<usize>,
    },

    /// Price with the closed-form formula
    BlackScholes,

    /// Run both pricers on the lattice inputs
    Compare {
        /// Override the configured number of steps
        #[arg(short = 'n', long)]
        steps: Option<usize>,
    },

    /// Sweep lattice step counts against the closed form
    Convergence {
        /// Comma-separated step counts (overrides the config)
        #[arg(short, long, value_delimiter = ',')]
        steps: Option<Vec<usize>>,

        /// Write CSV here instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Measure the polynomial CDF against erfc
    CdfAccuracy {
        #[arg(long, default_value_t = -8.0, allow_hyphen_values = true)]
        lo: f64,

        #[arg(long, default_value_t = 8.0, allow_hyphen_values = true)]
        hi: f64,

        #[arg(long, default_value_t = 16001)]
        samples: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PricingConfig::from_file(path)?
        }
        None => PricingConfig::reference(),
    };

    match cli.command {
        Commands::Binomial { steps } => commands::binomial(&config, steps),
        Commands::BlackScholes => commands::black_scholes(&config),
        Commands::Compare { steps } => commands::compare(&config, steps),
        Commands::Convergence { steps, output } => {
            commands::convergence(&config, steps, output.as_deref())
        }
        Commands::CdfAccuracy { lo, hi, samples } => commands::cdf_accuracy(lo, hi, samples),
    }
}
