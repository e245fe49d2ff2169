//! Monte Carlo verification of a sampling plan
//!
//! Draws samples without replacement from a lot seeded with a known defect
//! count and compares the empirical acceptance rate against the analytic
//! probability. A sanity check for plans, not part of the plan calculation.

use rand::Rng;
use serde::Serialize;

use crate::core::dist::DistCache;

/// Result of one simulation run, acceptance rates in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationReport {
    pub iterations: u32,
    pub accepted: u32,
    pub empirical_acceptance: f64,
    pub analytic_acceptance: f64,
}

/// Simulate `iterations` inspections of a lot of `lot_size` containing
/// `round(lot_size * rate)` defects, drawing `sample_size` pieces without
/// replacement and accepting when at most `c_value` defects are found.
pub fn simulate_plan<R: Rng>(
    dist: &mut DistCache,
    sample_size: u64,
    c_value: u32,
    lot_size: u64,
    defect_rate_percent: f64,
    iterations: u32,
    rng: &mut R,
) -> SimulationReport {
    let defects_in_lot =
        ((lot_size as f64 * defect_rate_percent / 100.0).round() as u64).min(lot_size);
    let draws = sample_size.min(lot_size);
    let reject_above = u64::from(c_value);

    let mut accepted = 0u32;
    for _ in 0..iterations {
        let mut remaining = lot_size;
        let mut defective = defects_in_lot;
        let mut found = 0u64;
        for _ in 0..draws {
            if defective > 0 && rng.random_range(0..remaining) < defective {
                found += 1;
                defective -= 1;
            }
            remaining -= 1;
            if found > reject_above {
                break;
            }
        }
        if found <= reject_above {
            accepted += 1;
        }
    }

    let analytic_acceptance =
        dist.acceptance_probability(draws, c_value, lot_size, defect_rate_percent) * 100.0;
    let empirical_acceptance = if iterations > 0 {
        f64::from(accepted) / f64::from(iterations) * 100.0
    } else {
        0.0
    };

    SimulationReport {
        iterations,
        accepted,
        empirical_acceptance,
        analytic_acceptance,
    }
}
