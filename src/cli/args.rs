//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands;

#[derive(Parser, Debug)]
#[command(
    name = "sqc",
    version,
    about = "AQL/LTPD acceptance-sampling plan calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate a sampling plan for a lot
    Plan(commands::plan::PlanArgs),

    /// Print the operating characteristic curve of an explicit plan
    Oc(commands::oc::OcArgs),

    /// Probe alternative parameter sets around a design
    Alternatives(commands::alternatives::AlternativesArgs),

    /// Monte Carlo check of a plan against a seeded defect rate
    Simulate(commands::simulate::SimulateArgs),
}

/// Output format selection
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
