//! `sqc alternatives` command - probe nearby parameter sets

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::engine::PlanEngine;
use crate::core::model::{HistoricalContext, SamplingRequest};

#[derive(clap::Args, Debug)]
pub struct AlternativesArgs {
    /// Acceptable quality level, percent defective
    #[arg(long)]
    pub aql: f64,

    /// Lot tolerance percent defective
    #[arg(long)]
    pub ltpd: f64,

    /// Producer's risk, percent
    #[arg(long, default_value_t = 5.0)]
    pub alpha: f64,

    /// Consumer's risk, percent
    #[arg(long, default_value_t = 10.0)]
    pub beta: f64,

    /// Acceptance number
    #[arg(long, short = 'c', default_value_t = 0)]
    pub c_value: u32,

    /// Lot size
    #[arg(long, short = 'n')]
    pub lot_size: u64,

    /// Historical defect rate, percent (used with --history-quantity)
    #[arg(long, requires = "history_quantity")]
    pub history_rate: Option<f64>,

    /// Total inspected quantity backing the historical rate
    #[arg(long, requires = "history_rate")]
    pub history_quantity: Option<u64>,

    /// Adjustment policy file (YAML)
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: AlternativesArgs) -> Result<()> {
    let mut engine = match &args.policy {
        Some(path) => PlanEngine::with_policy(output::load_policy(path)?),
        None => PlanEngine::new(),
    };

    let request = SamplingRequest {
        aql: args.aql,
        ltpd: args.ltpd,
        alpha: args.alpha,
        beta: args.beta,
        c_value: args.c_value,
        lot_size: args.lot_size,
    };
    let history = args.history_rate.map(|rate| HistoricalContext {
        defect_rate: Some(rate),
        total_quantity: args.history_quantity.unwrap_or(0),
    });

    let alternatives = engine
        .alternatives(&request, history.as_ref())
        .into_diagnostic()?;

    match args.format {
        OutputFormat::Json => output::print_json(&alternatives),
        OutputFormat::Text => {
            if alternatives.is_empty() {
                println!("No alternatives to probe for these parameters");
                return Ok(());
            }
            for alt in &alternatives {
                let mark = if alt.feasible {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                println!("{} {} -> {}", mark, alt.change, alt.outcome.sample_size);
            }
            let feasible = alternatives.iter().filter(|alt| alt.feasible).count();
            println!();
            println!(
                "{} of {} probed designs are feasible",
                style(feasible).cyan(),
                alternatives.len()
            );
            Ok(())
        }
    }
}
