//! Operating characteristic curve generation

use crate::core::dist::DistCache;
use crate::core::model::{OcPoint, SampleSize};

/// Fixed grid of true defect rates (percent) the curve is evaluated on.
pub const OC_DEFECT_RATE_GRID: [f64; 10] =
    [0.0, 0.1, 0.25, 0.5, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0];

/// Evaluate the acceptance probability (percent) across the fixed grid for
/// a finalized plan. Pure apart from memoization; returns exactly 10 points
/// for a concrete sample size and an empty curve otherwise.
pub fn generate_curve(
    dist: &mut DistCache,
    sample_size: &SampleSize,
    c_value: u32,
    lot_size: u64,
) -> Vec<OcPoint> {
    let Some(n) = sample_size.as_exact() else {
        return Vec::new();
    };

    OC_DEFECT_RATE_GRID
        .iter()
        .map(|&defect_rate| OcPoint {
            defect_rate,
            acceptance_probability: dist.acceptance_probability(n, c_value, lot_size, defect_rate)
                * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_has_ten_points_and_perfect_lot_endpoint() {
        let mut dist = DistCache::new();
        let curve = generate_curve(&mut dist, &SampleSize::Exact(80), 0, 1000);
        assert_eq!(curve.len(), 10);
        assert_eq!(curve[0].defect_rate, 0.0);
        assert_eq!(curve[0].acceptance_probability, 100.0);
    }

    #[test]
    fn test_curve_is_nonincreasing_in_defect_rate() {
        let mut dist = DistCache::new();
        let curve = generate_curve(&mut dist, &SampleSize::Exact(80), 1, 2000);
        for pair in curve.windows(2) {
            assert!(
                pair[1].acceptance_probability <= pair[0].acceptance_probability + 1e-9,
                "curve increased between {}% and {}%",
                pair[0].defect_rate,
                pair[1].defect_rate
            );
        }
    }

    #[test]
    fn test_sentinel_sample_sizes_yield_empty_curve() {
        let mut dist = DistCache::new();
        let full = SampleSize::FullInspection("lot too small".to_string());
        assert!(generate_curve(&mut dist, &full, 0, 100).is_empty());
        let err = SampleSize::CalculationError("log domain".to_string());
        assert!(generate_curve(&mut dist, &err, 0, 100).is_empty());
    }
}
