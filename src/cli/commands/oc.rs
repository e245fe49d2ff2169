//! `sqc oc` command - OC curve for an explicit plan

use miette::Result;

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::engine::PlanEngine;
use crate::core::model::MAX_LOT_SIZE;

#[derive(clap::Args, Debug)]
pub struct OcArgs {
    /// Sample size of the plan
    #[arg(long, short = 's')]
    pub sample_size: u64,

    /// Acceptance number
    #[arg(long, short = 'c', default_value_t = 0)]
    pub c_value: u32,

    /// Lot size
    #[arg(long, short = 'n')]
    pub lot_size: u64,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: OcArgs) -> Result<()> {
    if args.sample_size == 0 {
        return Err(miette::miette!("Sample size must be at least 1"));
    }
    if args.lot_size == 0 || args.lot_size > MAX_LOT_SIZE {
        return Err(miette::miette!(
            "Lot size must be between 1 and {}",
            MAX_LOT_SIZE
        ));
    }
    if args.sample_size > args.lot_size {
        return Err(miette::miette!("Sample size cannot exceed the lot size"));
    }

    let mut engine = PlanEngine::new();
    let points = engine.oc_curve(args.sample_size, args.c_value, args.lot_size);

    match args.format {
        OutputFormat::Json => output::print_json(&points),
        OutputFormat::Text => {
            println!("{}", output::oc_table(&points));
            Ok(())
        }
    }
}
