//! Alternative-plan suggestions for infeasible designs
//!
//! When a request collapses to full inspection, a fixed menu of nearby
//! parameter sets is probed through the same tiered search, purely as
//! advice. The primary result is never touched.

use std::fmt;

use serde::Serialize;

use crate::core::dist::DistCache;
use crate::core::search::SearchResult;
use crate::core::tier::plan_sample_size;

/// Relaxed AQL probes, percent.
pub const RELAXED_AQL_CANDIDATES: [f64; 4] = [0.4, 0.65, 1.0, 1.5];

/// Alternate LTPD probes, percent.
pub const ALTERNATE_LTPD_CANDIDATES: [f64; 4] = [1.5, 2.0, 2.5, 3.0];

/// Alternate (alpha, beta) risk pairs, percent.
pub const RISK_PAIR_CANDIDATES: [(f64, f64); 3] = [(5.0, 10.0), (10.0, 10.0), (10.0, 20.0)];

/// Alternate acceptance numbers.
pub const C_VALUE_CANDIDATES: [u32; 3] = [1, 2, 3];

/// Which single parameter a probe changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "parameter", rename_all = "snake_case")]
pub enum AlternativeChange {
    Aql { value: f64 },
    Ltpd { value: f64 },
    Risk { alpha: f64, beta: f64 },
    CValue { value: u32 },
}

impl fmt::Display for AlternativeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlternativeChange::Aql { value } => write!(f, "AQL {}%", value),
            AlternativeChange::Ltpd { value } => write!(f, "LTPD {}%", value),
            AlternativeChange::Risk { alpha, beta } => {
                write!(f, "alpha {}% / beta {}%", alpha, beta)
            }
            AlternativeChange::CValue { value } => write!(f, "c={}", value),
        }
    }
}

/// One probed alternative and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub change: AlternativeChange,
    pub outcome: SearchResult,
    pub feasible: bool,
}

/// Probe the fixed alternative menu around a (typically infeasible) design.
///
/// Candidates that merely repeat the request, or that would invert the
/// AQL < LTPD ordering, are skipped.
pub fn explore_alternatives(
    dist: &mut DistCache,
    aql: f64,
    ltpd: f64,
    alpha: f64,
    beta: f64,
    c_value: u32,
    lot_size: u64,
) -> Vec<Alternative> {
    let mut alternatives = Vec::new();

    for &candidate in &RELAXED_AQL_CANDIDATES {
        if candidate == aql || candidate >= ltpd {
            continue;
        }
        let outcome = plan_sample_size(dist, candidate, ltpd, alpha, beta, c_value, lot_size);
        push(&mut alternatives, AlternativeChange::Aql { value: candidate }, outcome);
    }

    for &candidate in &ALTERNATE_LTPD_CANDIDATES {
        if candidate == ltpd || candidate <= aql {
            continue;
        }
        let outcome = plan_sample_size(dist, aql, candidate, alpha, beta, c_value, lot_size);
        push(&mut alternatives, AlternativeChange::Ltpd { value: candidate }, outcome);
    }

    for &(alt_alpha, alt_beta) in &RISK_PAIR_CANDIDATES {
        if alt_alpha == alpha && alt_beta == beta {
            continue;
        }
        let outcome = plan_sample_size(dist, aql, ltpd, alt_alpha, alt_beta, c_value, lot_size);
        push(
            &mut alternatives,
            AlternativeChange::Risk {
                alpha: alt_alpha,
                beta: alt_beta,
            },
            outcome,
        );
    }

    for &candidate in &C_VALUE_CANDIDATES {
        if candidate == c_value {
            continue;
        }
        let outcome = plan_sample_size(dist, aql, ltpd, alpha, beta, candidate, lot_size);
        push(&mut alternatives, AlternativeChange::CValue { value: candidate }, outcome);
    }

    alternatives
}

fn push(alternatives: &mut Vec<Alternative>, change: AlternativeChange, outcome: SearchResult) {
    let feasible = outcome.sample_size.is_exact();
    alternatives.push(Alternative {
        change,
        outcome,
        feasible,
    });
}
