//! Lot-size tiering policy
//!
//! Routes the sample-size determination by lot size: very small lots are
//! inspected in full, small lots search with the finite-population
//! correction dominating, and medium/large lots share a uniform collapse
//! rule when the theoretical sample covers the whole lot.

use crate::core::dist::DistCache;
use crate::core::model::SampleSize;
use crate::core::search::{find_min_sample_size, SearchResult};

/// Lots at or below this size never get a partial sample.
pub const MIN_SAMPLING_LOT: u64 = 10;

/// Upper bound of the small-lot tier.
pub const SMALL_LOT_MAX: u64 = 50;

/// Upper bound of the medium-lot tier.
pub const MEDIUM_LOT_MAX: u64 = 500;

/// Lot-size tier for calculation routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotTier {
    Small,
    Medium,
    Large,
}

impl LotTier {
    pub fn classify(lot_size: u64) -> Self {
        if lot_size <= SMALL_LOT_MAX {
            LotTier::Small
        } else if lot_size <= MEDIUM_LOT_MAX {
            LotTier::Medium
        } else {
            LotTier::Large
        }
    }
}

/// Tier-aware sample-size determination.
///
/// All tiers delegate to the search engine except lots of 10 or fewer,
/// which always come back as full inspection. Search results that meet or
/// exceed the lot size collapse to full inspection with a warning.
pub fn plan_sample_size(
    dist: &mut DistCache,
    aql: f64,
    ltpd: f64,
    alpha: f64,
    beta: f64,
    c_value: u32,
    lot_size: u64,
) -> SearchResult {
    if LotTier::classify(lot_size) == LotTier::Small && lot_size <= MIN_SAMPLING_LOT {
        return SearchResult {
            sample_size: SampleSize::FullInspection(format!(
                "lot of {} is too small for statistical sampling",
                lot_size
            )),
            warning: None,
        };
    }

    let result = find_min_sample_size(dist, aql, ltpd, alpha, beta, c_value, lot_size);
    collapse_to_lot(result, lot_size)
}

fn collapse_to_lot(result: SearchResult, lot_size: u64) -> SearchResult {
    match result.sample_size {
        SampleSize::Exact(n) if n >= lot_size => SearchResult {
            sample_size: SampleSize::FullInspection(format!(
                "theoretical sample size {} meets or exceeds lot size {}",
                n, lot_size
            )),
            warning: Some(format!(
                "the computed sample size ({}) covers the whole lot ({}); \
                 full inspection recommended",
                n, lot_size
            )),
        },
        _ => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_classification_boundaries() {
        assert_eq!(LotTier::classify(1), LotTier::Small);
        assert_eq!(LotTier::classify(50), LotTier::Small);
        assert_eq!(LotTier::classify(51), LotTier::Medium);
        assert_eq!(LotTier::classify(500), LotTier::Medium);
        assert_eq!(LotTier::classify(501), LotTier::Large);
    }

    #[test]
    fn test_tiny_lot_always_full_inspection() {
        let mut dist = DistCache::new();
        // any parameters: an 8-piece lot is never partially sampled
        for c in [0u32, 1, 3] {
            let result = plan_sample_size(&mut dist, 0.25, 1.0, 5.0, 10.0, c, 8);
            match result.sample_size {
                SampleSize::FullInspection(reason) => assert!(reason.contains("too small")),
                other => panic!("expected full inspection for lot of 8, got {:?}", other),
            }
            assert!(result.warning.is_none());
        }
    }

    #[test]
    fn test_small_lot_scenario_never_panics() {
        // AQL 0.1, LTPD 0.5, alpha 3, beta 5, c=0, N=50: either a concrete
        // n <= 50 or a full-inspection sentinel with a non-empty warning.
        let mut dist = DistCache::new();
        let result = plan_sample_size(&mut dist, 0.1, 0.5, 3.0, 5.0, 0, 50);
        match &result.sample_size {
            SampleSize::Exact(n) => assert!(*n <= 50),
            SampleSize::FullInspection(_) => {
                let warning = result.warning.as_deref().unwrap_or("");
                assert!(!warning.is_empty());
            }
            SampleSize::CalculationError(reason) => {
                panic!("unexpected calculation error: {}", reason)
            }
        }
    }

    #[test]
    fn test_collapse_when_sample_covers_lot() {
        let collapsed = collapse_to_lot(
            SearchResult {
                sample_size: SampleSize::Exact(120),
                warning: None,
            },
            120,
        );
        assert!(matches!(
            collapsed.sample_size,
            SampleSize::FullInspection(_)
        ));
        assert!(collapsed.warning.is_some());

        let kept = collapse_to_lot(
            SearchResult {
                sample_size: SampleSize::Exact(119),
                warning: None,
            },
            120,
        );
        assert_eq!(kept.sample_size, SampleSize::Exact(119));
    }

    #[test]
    fn test_large_lot_delegates_to_search() {
        let mut dist = DistCache::new();
        let result = plan_sample_size(&mut dist, 0.25, 1.0, 5.0, 10.0, 0, 10_000);
        assert_eq!(result.sample_size, SampleSize::Exact(230));
    }
}
