//! `sqc simulate` command - Monte Carlo check of a plan

use console::style;
use miette::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::dist::DistCache;
use crate::core::model::MAX_LOT_SIZE;
use crate::core::simulate::simulate_plan;

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Sample size of the plan
    #[arg(long, short = 's')]
    pub sample_size: u64,

    /// Acceptance number
    #[arg(long, short = 'c', default_value_t = 0)]
    pub c_value: u32,

    /// Lot size
    #[arg(long, short = 'n')]
    pub lot_size: u64,

    /// True defect rate to seed the lot with, percent
    #[arg(long)]
    pub defect_rate: f64,

    /// Number of simulated inspections
    #[arg(long, default_value_t = 10_000)]
    pub iterations: u32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.sample_size == 0 {
        return Err(miette::miette!("Sample size must be at least 1"));
    }
    if args.lot_size == 0 || args.lot_size > MAX_LOT_SIZE {
        return Err(miette::miette!(
            "Lot size must be between 1 and {}",
            MAX_LOT_SIZE
        ));
    }
    if !(0.0..=100.0).contains(&args.defect_rate) {
        return Err(miette::miette!("Defect rate must be between 0 and 100"));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut dist = DistCache::new();
    let report = simulate_plan(
        &mut dist,
        args.sample_size,
        args.c_value,
        args.lot_size,
        args.defect_rate,
        args.iterations,
        &mut rng,
    );

    match args.format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Text => {
            println!(
                "Accepted {} of {} simulated inspections",
                style(report.accepted).cyan(),
                report.iterations
            );
            println!(
                "  empirical acceptance: {:.2}%",
                report.empirical_acceptance
            );
            println!("  analytic acceptance:  {:.2}%", report.analytic_acceptance);
            let delta = (report.empirical_acceptance - report.analytic_acceptance).abs();
            println!("  difference:           {:.2} points", delta);
            Ok(())
        }
    }
}
