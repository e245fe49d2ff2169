//! Discrete probability evaluation with memoization
//!
//! Computes P(X <= c) under the binomial and hypergeometric models and
//! centralizes the finite-population-correction rule that decides between
//! them. Evaluation never fails: numeric domain errors yield probability
//! 0.0 ("treat unknown as impossible").

use std::collections::HashMap;

use statrs::distribution::{Binomial, DiscreteCDF, Hypergeometric};

/// Sample-to-lot ratio above which the hypergeometric model is used.
pub const FPC_RATIO_THRESHOLD: f64 = 0.05;

/// Absolute sample size above which the hypergeometric model is used.
pub const FPC_SAMPLE_THRESHOLD: u64 = 50;

/// Scale for rounding float cache keys to 6 decimal digits.
const KEY_SCALE: f64 = 1e6;

/// Which discrete model applies to a candidate plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityModel {
    Binomial,
    Hypergeometric,
}

/// Choose the probability model for a candidate sample size against a lot.
///
/// Hypergeometric when `n / N > 0.05` or `n > 50`, binomial otherwise.
/// This threshold is an engineering heuristic; every call site shares this
/// one function so the rule cannot drift.
pub fn select_model(sample_size: u64, lot_size: u64) -> ProbabilityModel {
    if lot_size == 0 {
        return ProbabilityModel::Binomial;
    }
    if sample_size as f64 / lot_size as f64 > FPC_RATIO_THRESHOLD
        || sample_size > FPC_SAMPLE_THRESHOLD
    {
        ProbabilityModel::Hypergeometric
    } else {
        ProbabilityModel::Binomial
    }
}

fn quantize(p: f64) -> u64 {
    (p.max(0.0) * KEY_SCALE).round() as u64
}

/// Memoized CDF evaluator, owned by the engine instance rather than hidden
/// in module-global state so it can be reset and inspected in tests.
#[derive(Debug, Default)]
pub struct DistCache {
    binom: HashMap<(u32, u64, u64), f64>,
    hyper: HashMap<(u32, u64, u64, u64), f64>,
}

impl DistCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoized entries across both models.
    pub fn len(&self) -> usize {
        self.binom.len() + self.hyper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binom.is_empty() && self.hyper.is_empty()
    }

    pub fn clear(&mut self) {
        self.binom.clear();
        self.hyper.clear();
    }

    /// P(X <= c) for X ~ Binomial(n, p).
    ///
    /// A zero defect rate always passes: `p <= 0` short-circuits to 1.0.
    pub fn binomial_cdf(&mut self, c: u32, n: u64, p: f64) -> f64 {
        if p <= 0.0 {
            return 1.0;
        }
        if p >= 1.0 {
            return if u64::from(c) >= n { 1.0 } else { 0.0 };
        }

        let key = (c, n, quantize(p));
        if let Some(&cached) = self.binom.get(&key) {
            return cached;
        }

        let value = match Binomial::new(p, n) {
            Ok(dist) => dist.cdf(u64::from(c)),
            Err(_) => 0.0,
        };
        self.binom.insert(key, value);
        value
    }

    /// P(X <= c) for X ~ Hypergeometric(population, defects, draws).
    ///
    /// Degenerate supports resolve without evaluating: a defect-free lot
    /// yields 1.0 for c = 0 (0.0 otherwise), and impossible draws or an
    /// acceptance number beyond the support yield 0.0.
    pub fn hypergeometric_cdf(
        &mut self,
        c: u32,
        population: u64,
        defects: u64,
        draws: u64,
    ) -> f64 {
        if defects == 0 {
            return if c == 0 { 1.0 } else { 0.0 };
        }
        if draws > population {
            return 0.0;
        }
        if u64::from(c) > draws.min(defects) {
            return 0.0;
        }

        let key = (c, population, defects, draws);
        if let Some(&cached) = self.hyper.get(&key) {
            return cached;
        }

        let value = match Hypergeometric::new(population, defects, draws) {
            Ok(dist) => dist.cdf(u64::from(c)),
            Err(_) => 0.0,
        };
        self.hyper.insert(key, value);
        value
    }

    /// Acceptance probability P(accept | true defect rate) for a plan
    /// `(sample_size, c)` drawn from a lot of `lot_size`, in [0, 1].
    ///
    /// Switches model per [`select_model`]. The hypergeometric defect count
    /// is `max(1, round(N * p))` so a nonzero rate never degenerates to a
    /// defect-free lot. A perfect lot (rate <= 0) always accepts.
    pub fn acceptance_probability(
        &mut self,
        sample_size: u64,
        c: u32,
        lot_size: u64,
        defect_rate_percent: f64,
    ) -> f64 {
        if defect_rate_percent <= 0.0 {
            return 1.0;
        }
        let p = defect_rate_percent / 100.0;
        match select_model(sample_size, lot_size) {
            ProbabilityModel::Binomial => self.binomial_cdf(c, sample_size, p),
            ProbabilityModel::Hypergeometric => {
                let defects = ((lot_size as f64 * p).round() as u64).clamp(1, lot_size);
                self.hypergeometric_cdf(c, lot_size, defects, sample_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_selection_thresholds() {
        // 50 of 10000: low ratio, at the absolute threshold -> binomial
        assert_eq!(select_model(50, 10_000), ProbabilityModel::Binomial);
        // 51 anywhere -> hypergeometric
        assert_eq!(select_model(51, 10_000), ProbabilityModel::Hypergeometric);
        // 6 of 100 exceeds the 5% ratio
        assert_eq!(select_model(6, 100), ProbabilityModel::Hypergeometric);
        // 5 of 100 sits exactly at the ratio, not above it
        assert_eq!(select_model(5, 100), ProbabilityModel::Binomial);
    }

    #[test]
    fn test_binomial_zero_defect_rate_always_passes() {
        let mut cache = DistCache::new();
        for n in [0, 1, 10, 500] {
            for c in [0, 1, 5] {
                assert_eq!(cache.binomial_cdf(c, n, 0.0), 1.0);
            }
        }
    }

    #[test]
    fn test_binomial_monotone_nonincreasing_in_n() {
        let mut cache = DistCache::new();
        let mut previous = 1.0;
        for n in 1..=80 {
            let current = cache.binomial_cdf(1, n, 0.02);
            assert!(
                current <= previous + 1e-12,
                "cdf increased at n={}: {} > {}",
                n,
                current,
                previous
            );
            previous = current;
        }
    }

    #[test]
    fn test_binomial_known_value() {
        let mut cache = DistCache::new();
        // c=0: P = (1-p)^n
        let expected = 0.99_f64.powi(20);
        assert!((cache.binomial_cdf(0, 20, 0.01) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_hypergeometric_degenerate_cases() {
        let mut cache = DistCache::new();
        assert_eq!(cache.hypergeometric_cdf(0, 100, 0, 10), 1.0);
        assert_eq!(cache.hypergeometric_cdf(2, 100, 0, 10), 0.0);
        // more draws than population
        assert_eq!(cache.hypergeometric_cdf(0, 100, 5, 101), 0.0);
        // acceptance number beyond the support
        assert_eq!(cache.hypergeometric_cdf(3, 100, 2, 10), 0.0);
    }

    #[test]
    fn test_hypergeometric_known_value() {
        let mut cache = DistCache::new();
        // P(X = 0) drawing 10 from 100 with 1 defect: (100-10)/100
        let p0 = cache.hypergeometric_cdf(0, 100, 1, 10);
        assert!((p0 - 0.9).abs() < 1e-10);
    }

    #[test]
    fn test_memoization_caches_exact_argument_tuples() {
        let mut cache = DistCache::new();
        cache.binomial_cdf(1, 30, 0.015);
        cache.binomial_cdf(1, 30, 0.015);
        assert_eq!(cache.len(), 1);

        // differs only past the 6th decimal: same key
        cache.binomial_cdf(1, 30, 0.015_000_000_4);
        assert_eq!(cache.len(), 1);

        cache.binomial_cdf(1, 30, 0.016);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_acceptance_probability_perfect_lot() {
        let mut cache = DistCache::new();
        // holds under both model branches
        assert_eq!(cache.acceptance_probability(10, 0, 1000, 0.0), 1.0);
        assert_eq!(cache.acceptance_probability(200, 0, 1000, 0.0), 1.0);
    }

    #[test]
    fn test_acceptance_probability_floors_defect_count_at_one() {
        let mut cache = DistCache::new();
        // round(200 * 0.0001) = 0, floored to 1 defect in the lot
        let p = cache.acceptance_probability(100, 0, 200, 0.01);
        let direct = cache.hypergeometric_cdf(0, 200, 1, 100);
        assert!((p - direct).abs() < 1e-12);
        assert!((p - 0.5).abs() < 1e-10);
    }
}
