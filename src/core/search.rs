//! Minimum sample-size search
//!
//! Binary search for the smallest n whose operating characteristic satisfies
//! both risk constraints, with a closed-form fallback for zero-acceptance
//! (c = 0) plans.

use serde::Serialize;

use crate::core::dist::DistCache;
use crate::core::model::SampleSize;

/// The search never probes beyond this many samples. Lots smaller than this
/// are bounded by their own size; for larger lots this is an optimization,
/// not a correctness requirement.
pub const PRACTICAL_SEARCH_LIMIT: u64 = 10_000;

/// Search outcome: a sample size plus an optional fallback warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub sample_size: SampleSize,
    pub warning: Option<String>,
}

impl SearchResult {
    fn exact(n: u64) -> Self {
        Self {
            sample_size: SampleSize::Exact(n),
            warning: None,
        }
    }
}

/// Find the minimum n in `[1, lot_size]` such that
///
/// ```text
/// P(accept | AQL)  >= 1 - alpha/100
/// P(accept | LTPD) <=     beta/100
/// ```
///
/// Acceptance probability at a fixed rate is non-increasing in n for a fixed
/// acceptance number, so the qualifying range is searched by bisection:
/// when both constraints hold at the midpoint, record it and look lower.
///
/// An exhausted search is not an error. For c = 0 a logarithmic closed-form
/// estimate is tried first; otherwise the result is a full-inspection
/// sentinel carrying the offending parameters in its warning.
pub fn find_min_sample_size(
    dist: &mut DistCache,
    aql: f64,
    ltpd: f64,
    alpha: f64,
    beta: f64,
    c_value: u32,
    lot_size: u64,
) -> SearchResult {
    let target_accept = 1.0 - alpha / 100.0;
    let reject_ceiling = beta / 100.0;

    let mut low = 1u64;
    let mut high = lot_size.min(PRACTICAL_SEARCH_LIMIT);
    let mut found: Option<u64> = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        let at_aql = dist.acceptance_probability(mid, c_value, lot_size, aql);
        let at_ltpd = dist.acceptance_probability(mid, c_value, lot_size, ltpd);

        if at_aql >= target_accept && at_ltpd <= reject_ceiling {
            found = Some(mid);
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }

    if let Some(n) = found {
        return SearchResult::exact(n);
    }

    if c_value == 0 {
        return zero_acceptance_fallback(aql, ltpd, alpha, beta, lot_size);
    }

    SearchResult {
        sample_size: SampleSize::FullInspection(format!(
            "no sample size in 1..={} satisfies c={}, AQL={}%, LTPD={}%",
            lot_size, c_value, aql, ltpd
        )),
        warning: Some(format!(
            "no sample size within the lot ({}) satisfies c={} with AQL {}% and LTPD {}%; \
             full inspection recommended",
            lot_size, c_value, aql, ltpd
        )),
    }
}

/// Closed-form estimate for c = 0 plans, where P(accept | p) = (1-p)^n.
///
/// Combines the producer-side bound `ln(1-alpha/100)/ln(1-AQL/100)` with the
/// consumer-side bound `ln(beta/100)/ln(1-LTPD/100)`, taking the max. Log
/// domain failures degrade to a calculation-error outcome, never a panic.
fn zero_acceptance_fallback(
    aql: f64,
    ltpd: f64,
    alpha: f64,
    beta: f64,
    lot_size: u64,
) -> SearchResult {
    let accept_log = (1.0 - alpha / 100.0).ln();
    let aql_log = (1.0 - aql / 100.0).ln();
    let beta_log = (beta / 100.0).ln();
    let ltpd_log = (1.0 - ltpd / 100.0).ln();

    if !accept_log.is_finite()
        || !beta_log.is_finite()
        || !aql_log.is_finite()
        || !ltpd_log.is_finite()
        || aql_log == 0.0
        || ltpd_log == 0.0
    {
        return SearchResult {
            sample_size: SampleSize::CalculationError(
                "logarithmic estimate undefined for the given risk parameters".to_string(),
            ),
            warning: None,
        };
    }

    let producer_n = (accept_log / aql_log).ceil();
    let consumer_n = (beta_log / ltpd_log).ceil();
    let theoretical = producer_n.max(consumer_n).max(1.0);

    if !theoretical.is_finite() {
        return SearchResult {
            sample_size: SampleSize::CalculationError(
                "theoretical sample size overflowed".to_string(),
            ),
            warning: None,
        };
    }

    let theoretical = theoretical as u64;
    if theoretical <= lot_size {
        SearchResult::exact(theoretical)
    } else {
        SearchResult {
            sample_size: SampleSize::FullInspection(format!(
                "theoretical sample size {} exceeds lot size {}",
                theoretical, lot_size
            )),
            warning: Some(format!(
                "c=0 with AQL {}% and LTPD {}% requires {} samples but the lot holds {}; \
                 full inspection recommended",
                aql, ltpd, theoretical, lot_size
            )),
        }
    }
}
