//! Historical defect-rate adjustment of AQL/LTPD
//!
//! Shifts the requested risk parameters toward values implied by observed
//! defect history, weighted by how much data backs the observation. The
//! banding table is business policy, not derived statistics, so it is a
//! plain serde structure that deployments can override from a YAML file.

use serde::{Deserialize, Serialize};

use crate::core::model::HistoricalContext;

/// Historical defect rate (percent) at or below which inspection stays
/// at normal severity.
pub const NORMAL_SEVERITY_MAX_RATE: f64 = 0.5;

/// One adjustment band: rates at or below `max_rate` use `factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub max_rate: f64,
    pub factor: f64,
}

/// Multiplicative adjustment policy with confidence blending.
///
/// Excellent history loosens AQL/LTPD (factor > 1), poor history tightens
/// them (factor < 1), and thin history (below `min_quantity`) changes
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentPolicy {
    /// Below this inspected quantity, history is statistically unreliable
    /// and the adjustment is skipped entirely.
    pub min_quantity: u64,

    /// Inspected quantity at which the blend reaches full confidence.
    pub full_confidence_quantity: f64,

    /// Rate bands, checked in order; first match wins.
    pub bands: Vec<RateBand>,

    /// Factor for rates beyond the last band.
    pub fallback_factor: f64,

    /// Clamp range for the adjusted AQL, percent.
    pub aql_range: [f64; 2],

    /// Clamp range for the adjusted LTPD, percent.
    pub ltpd_range: [f64; 2],
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            min_quantity: 100,
            full_confidence_quantity: 1500.0,
            bands: vec![
                RateBand { max_rate: 0.1, factor: 1.10 },
                RateBand { max_rate: 0.5, factor: 1.05 },
                RateBand { max_rate: 1.5, factor: 1.00 },
                RateBand { max_rate: 2.5, factor: 0.90 },
            ],
            fallback_factor: 0.80,
            aql_range: [0.02, 5.0],
            ltpd_range: [0.2, 10.0],
        }
    }
}

/// Adjusted parameters plus a human-readable rationale when an adjustment
/// actually happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub aql: f64,
    pub ltpd: f64,
    pub rationale: Option<String>,
}

impl AdjustmentPolicy {
    /// Factor for an observed defect rate, from the band table.
    pub fn factor_for(&self, rate: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| rate <= band.max_rate)
            .map(|band| band.factor)
            .unwrap_or(self.fallback_factor)
    }

    /// Adjust `(aql, ltpd)` against the historical context.
    ///
    /// Returns the inputs unchanged when the history is missing or too thin.
    /// Otherwise blends each parameter toward `original * factor` by
    /// `clamp(total_quantity / full_confidence_quantity, 0, 1)`, clamps to
    /// the configured range, and rounds to 3 decimals.
    pub fn adjust(&self, aql: f64, ltpd: f64, history: &HistoricalContext) -> Adjustment {
        let rate = match history.defect_rate {
            Some(rate) if history.total_quantity >= self.min_quantity => rate,
            _ => {
                return Adjustment {
                    aql,
                    ltpd,
                    rationale: None,
                }
            }
        };

        let factor = self.factor_for(rate);
        let confidence =
            (history.total_quantity as f64 / self.full_confidence_quantity).clamp(0.0, 1.0);

        let blend = |original: f64, range: [f64; 2]| {
            let target = original * factor;
            let adjusted = original + (target - original) * confidence;
            round3(adjusted.clamp(range[0], range[1]))
        };

        Adjustment {
            aql: blend(aql, self.aql_range),
            ltpd: blend(ltpd, self.ltpd_range),
            rationale: Some(format!(
                "historical defect rate {:.3}% over {} inspected units: factor x{:.2} at confidence {:.2}",
                rate, history.total_quantity, factor, confidence
            )),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Inspection severity implied by historical quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionSeverity {
    Reduced,
    Normal,
    Tightened,
}

impl InspectionSeverity {
    /// Classify from a historical defect rate in percent.
    pub fn classify(defect_rate: f64) -> Self {
        if defect_rate <= 0.0 {
            InspectionSeverity::Reduced
        } else if defect_rate <= NORMAL_SEVERITY_MAX_RATE {
            InspectionSeverity::Normal
        } else {
            InspectionSeverity::Tightened
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InspectionSeverity::Reduced => "reduced (I)",
            InspectionSeverity::Normal => "normal (II)",
            InspectionSeverity::Tightened => "tightened (III)",
        }
    }

    fn rationale(&self) -> &'static str {
        match self {
            InspectionSeverity::Reduced => "no defects observed in the historical window",
            InspectionSeverity::Normal => "historical defect rate at or below 0.5%",
            InspectionSeverity::Tightened => "historical defect rate above 0.5%",
        }
    }
}

/// Severity with its supporting rationale, reported alongside a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityAssessment {
    pub severity: InspectionSeverity,
    pub rationale: String,
}

impl SeverityAssessment {
    /// Assess from history; `None` when no defect rate is known.
    pub fn from_history(history: &HistoricalContext) -> Option<Self> {
        let rate = history.defect_rate?;
        let severity = InspectionSeverity::classify(rate);
        Some(Self {
            severity,
            rationale: severity.rationale().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(rate: f64, quantity: u64) -> HistoricalContext {
        HistoricalContext {
            defect_rate: Some(rate),
            total_quantity: quantity,
        }
    }

    #[test]
    fn test_thin_history_is_exact_noop() {
        let policy = AdjustmentPolicy::default();
        for rate in [0.0, 0.05, 2.0, 50.0] {
            let adjustment = policy.adjust(0.65, 2.5, &history(rate, 99));
            assert_eq!(adjustment.aql, 0.65);
            assert_eq!(adjustment.ltpd, 2.5);
            assert!(adjustment.rationale.is_none());
        }
    }

    #[test]
    fn test_unknown_rate_is_noop() {
        let policy = AdjustmentPolicy::default();
        let ctx = HistoricalContext {
            defect_rate: None,
            total_quantity: 5000,
        };
        let adjustment = policy.adjust(0.65, 2.5, &ctx);
        assert_eq!((adjustment.aql, adjustment.ltpd), (0.65, 2.5));
        assert!(adjustment.rationale.is_none());
    }

    #[test]
    fn test_band_factors() {
        let policy = AdjustmentPolicy::default();
        assert_eq!(policy.factor_for(0.05), 1.10);
        assert_eq!(policy.factor_for(0.1), 1.10);
        assert_eq!(policy.factor_for(0.3), 1.05);
        assert_eq!(policy.factor_for(1.0), 1.00);
        assert_eq!(policy.factor_for(2.0), 0.90);
        assert_eq!(policy.factor_for(4.0), 0.80);
    }

    #[test]
    fn test_full_confidence_blend() {
        let policy = AdjustmentPolicy::default();
        let adjustment = policy.adjust(1.0, 4.0, &history(0.05, 1500));
        // factor 1.10 at confidence 1.0
        assert!((adjustment.aql - 1.1).abs() < 1e-9);
        assert!((adjustment.ltpd - 4.4).abs() < 1e-9);
        assert!(adjustment.rationale.is_some());
    }

    #[test]
    fn test_half_confidence_blend() {
        let policy = AdjustmentPolicy::default();
        let adjustment = policy.adjust(1.0, 4.0, &history(0.05, 750));
        // halfway toward the 1.10 target
        assert!((adjustment.aql - 1.05).abs() < 1e-9);
        assert!((adjustment.ltpd - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_adjustment_respects_clamps() {
        let policy = AdjustmentPolicy::default();
        // poor history tightening an already-tight AQL hits the floor
        let adjustment = policy.adjust(0.02, 0.2, &history(9.0, 10_000));
        assert!(adjustment.aql >= policy.aql_range[0]);
        assert!(adjustment.ltpd >= policy.ltpd_range[0]);

        // excellent history loosening a loose plan hits the ceiling
        let adjustment = policy.adjust(5.0, 10.0, &history(0.01, 10_000));
        assert!(adjustment.aql <= policy.aql_range[1]);
        assert!(adjustment.ltpd <= policy.ltpd_range[1]);
    }

    #[test]
    fn test_policy_yaml_round_trip() {
        let policy = AdjustmentPolicy::default();
        let yaml = serde_yml::to_string(&policy).unwrap();
        let parsed: AdjustmentPolicy = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, policy);
    }

    #[test]
    fn test_partial_policy_file_fills_defaults() {
        let parsed: AdjustmentPolicy = serde_yml::from_str("min_quantity: 250\n").unwrap();
        assert_eq!(parsed.min_quantity, 250);
        assert_eq!(parsed.fallback_factor, 0.80);
        assert_eq!(parsed.bands.len(), 4);
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            InspectionSeverity::classify(0.0),
            InspectionSeverity::Reduced
        );
        assert_eq!(
            InspectionSeverity::classify(0.5),
            InspectionSeverity::Normal
        );
        assert_eq!(
            InspectionSeverity::classify(0.51),
            InspectionSeverity::Tightened
        );
    }

    #[test]
    fn test_severity_assessment_requires_history() {
        assert!(SeverityAssessment::from_history(&HistoricalContext::default()).is_none());
        let assessment = SeverityAssessment::from_history(&history(0.2, 500)).unwrap();
        assert_eq!(assessment.severity, InspectionSeverity::Normal);
        assert!(!assessment.rationale.is_empty());
    }
}
