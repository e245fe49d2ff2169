//! `sqc plan` command - calculate a sampling plan

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::advisor::Alternative;
use crate::core::engine::PlanEngine;
use crate::core::model::{HistoricalAggregate, HistoricalContext, SamplingRequest, SamplingResult};
use crate::report::render_text_report;

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
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

    /// Acceptance number: max defects tolerated in the sample
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

    /// Historical aggregate file (YAML or JSON), overrides the rate flags
    #[arg(long, conflicts_with_all = ["history_rate", "history_quantity"])]
    pub history_file: Option<PathBuf>,

    /// Adjustment policy file (YAML)
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress the OC curve table in text output
    #[arg(long)]
    pub no_oc: bool,

    /// Probe alternative parameter sets as well
    #[arg(long)]
    pub alternatives: bool,

    /// Write a full plain-text report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanPayload<'a> {
    result: &'a SamplingResult,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    alternatives: &'a [Alternative],
}

pub fn run(args: PlanArgs) -> Result<()> {
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

    let aggregate: Option<HistoricalAggregate> = match &args.history_file {
        Some(path) => Some(output::load_aggregate(path)?),
        None => None,
    };
    let history: Option<HistoricalContext> = match (&aggregate, args.history_rate) {
        (Some(agg), _) => Some(HistoricalContext::from(agg)),
        (None, Some(rate)) => Some(HistoricalContext {
            defect_rate: Some(rate),
            total_quantity: args.history_quantity.unwrap_or(0),
        }),
        (None, None) => None,
    };

    let result = engine.calculate(&request, history.as_ref()).into_diagnostic()?;

    let alternatives = if args.alternatives {
        engine
            .alternatives(&request, history.as_ref())
            .into_diagnostic()?
    } else {
        Vec::new()
    };

    match args.format {
        OutputFormat::Json => {
            output::print_json(&PlanPayload {
                result: &result,
                alternatives: &alternatives,
            })?;
        }
        OutputFormat::Text => {
            output::print_result(&result, !args.no_oc);
            if !alternatives.is_empty() {
                println!();
                println!("{}", style("Alternatives").bold());
                for alt in &alternatives {
                    let mark = if alt.feasible {
                        style("✓").green()
                    } else {
                        style("✗").red()
                    };
                    println!("  {} {} -> {}", mark, alt.change, alt.outcome.sample_size);
                }
            } else if !result.sample_size.is_exact() && !args.alternatives {
                println!(
                    "{}",
                    style("hint: rerun with --alternatives to probe nearby designs").dim()
                );
            }
        }
    }

    if let Some(path) = &args.report {
        let rendered = render_text_report(&request, aggregate.as_ref(), &result, &alternatives);
        std::fs::write(path, rendered)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
        println!("{} Report written to {}", style("✓").green(), path.display());
    }

    Ok(())
}
