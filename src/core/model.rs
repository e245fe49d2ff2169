//! Data model for sampling-plan calculations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::PlanError;
use crate::core::history::SeverityAssessment;

/// Largest lot the engine will plan for.
pub const MAX_LOT_SIZE: u64 = 1_000_000;

/// Largest acceptance number accepted as input.
pub const MAX_C_VALUE: u32 = 100;

/// Risk parameters and lot size for one plan calculation.
///
/// All percentages are expressed on the 0-100 scale. The engine is a pure
/// function of this tuple (plus optional historical context) apart from
/// cache side effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingRequest {
    /// Acceptable quality level, percent defective
    pub aql: f64,

    /// Lot tolerance percent defective
    pub ltpd: f64,

    /// Producer's risk, percent
    pub alpha: f64,

    /// Consumer's risk, percent
    pub beta: f64,

    /// Acceptance number: max defects tolerated in the sample
    pub c_value: u32,

    /// Lot (population) size
    pub lot_size: u64,
}

impl SamplingRequest {
    /// Fail-fast validation. Runs before any search begins.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.aql > 0.0 && self.aql < 100.0) {
            return Err(PlanError::InvalidAql(self.aql));
        }
        if !(self.ltpd > 0.0 && self.ltpd < 100.0) {
            return Err(PlanError::InvalidLtpd(self.ltpd));
        }
        if !(self.alpha > 0.0 && self.alpha < 100.0) {
            return Err(PlanError::InvalidAlpha(self.alpha));
        }
        if !(self.beta > 0.0 && self.beta < 100.0) {
            return Err(PlanError::InvalidBeta(self.beta));
        }
        if self.lot_size == 0 || self.lot_size > MAX_LOT_SIZE {
            return Err(PlanError::InvalidLotSize(self.lot_size));
        }
        if self.c_value > MAX_C_VALUE {
            return Err(PlanError::InvalidCValue(self.c_value));
        }
        Ok(())
    }
}

/// Historical defect data backing an AQL/LTPD adjustment.
///
/// Adjustment is skipped when `defect_rate` is unknown or `total_quantity`
/// falls below the policy's reliability threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalContext {
    /// Observed defect rate, percent, if any history exists
    pub defect_rate: Option<f64>,

    /// Total inspected quantity backing the rate
    pub total_quantity: u64,
}

/// One defect category with its observed count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Aggregate inspection record supplied by an external data source.
///
/// The engine does not care how this was computed (SQL, file scan, ...);
/// only the shape matters. Categories are kept sorted descending by count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAggregate {
    pub total_quantity: u64,
    pub total_defect: u64,
    pub defect_rate_percent: f64,
    #[serde(default)]
    pub per_category: Vec<CategoryCount>,
}

impl HistoricalAggregate {
    /// Build an aggregate from raw counts, deriving the defect rate and
    /// ranking categories by count (zero-count categories are dropped).
    pub fn from_counts(
        total_quantity: u64,
        total_defect: u64,
        categories: Vec<(String, u64)>,
    ) -> Self {
        let defect_rate_percent = if total_quantity > 0 {
            total_defect as f64 / total_quantity as f64 * 100.0
        } else {
            0.0
        };

        let mut per_category: Vec<CategoryCount> = categories
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        per_category.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_quantity,
            total_defect,
            defect_rate_percent,
            per_category,
        }
    }

    /// The `k` most frequent defect categories.
    pub fn top_categories(&self, k: usize) -> &[CategoryCount] {
        &self.per_category[..self.per_category.len().min(k)]
    }
}

impl From<&HistoricalAggregate> for HistoricalContext {
    fn from(aggregate: &HistoricalAggregate) -> Self {
        Self {
            defect_rate: Some(aggregate.defect_rate_percent),
            total_quantity: aggregate.total_quantity,
        }
    }
}

/// Outcome of a sample-size determination.
///
/// Full inspection and calculation errors are valid outcomes, not failures:
/// callers must be able to render each case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SampleSize {
    /// A concrete sample size within the lot
    Exact(u64),

    /// The design cannot be met by partial sampling; inspect the whole lot
    FullInspection(String),

    /// Numeric evaluation failed; degrade to a rendered reason
    CalculationError(String),
}

impl SampleSize {
    pub fn is_exact(&self) -> bool {
        matches!(self, SampleSize::Exact(_))
    }

    pub fn as_exact(&self) -> Option<u64> {
        match self {
            SampleSize::Exact(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSize::Exact(n) => write!(f, "{} samples", n),
            SampleSize::FullInspection(reason) => {
                write!(f, "full inspection required ({})", reason)
            }
            SampleSize::CalculationError(reason) => write!(f, "calculation error ({})", reason),
        }
    }
}

/// One point on the operating characteristic curve, both axes in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OcPoint {
    pub defect_rate: f64,
    pub acceptance_probability: f64,
}

/// Complete result of one plan calculation.
///
/// Constructed fresh per request and never mutated afterwards. `warning`
/// is present exactly when the search had to fall back to full inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingResult {
    pub sample_size: SampleSize,
    pub warning: Option<String>,
    pub oc_curve: Vec<OcPoint>,
    pub original_aql: f64,
    pub original_ltpd: f64,
    pub adjusted_aql: f64,
    pub adjusted_ltpd: f64,
    pub adjustment_rationale: Option<String>,
    pub severity: Option<SeverityAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SamplingRequest {
        SamplingRequest {
            aql: 0.25,
            ltpd: 1.0,
            alpha: 5.0,
            beta: 10.0,
            c_value: 0,
            lot_size: 10_000,
        }
    }

    #[test]
    fn test_validate_accepts_reference_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentages() {
        let mut req = request();
        req.aql = 0.0;
        assert_eq!(req.validate(), Err(PlanError::InvalidAql(0.0)));

        let mut req = request();
        req.ltpd = 100.0;
        assert_eq!(req.validate(), Err(PlanError::InvalidLtpd(100.0)));

        let mut req = request();
        req.alpha = -1.0;
        assert_eq!(req.validate(), Err(PlanError::InvalidAlpha(-1.0)));

        let mut req = request();
        req.beta = 100.5;
        assert_eq!(req.validate(), Err(PlanError::InvalidBeta(100.5)));
    }

    #[test]
    fn test_validate_rejects_bad_lot_and_c() {
        let mut req = request();
        req.lot_size = 0;
        assert_eq!(req.validate(), Err(PlanError::InvalidLotSize(0)));

        let mut req = request();
        req.lot_size = MAX_LOT_SIZE + 1;
        assert!(req.validate().is_err());

        let mut req = request();
        req.c_value = MAX_C_VALUE + 1;
        assert_eq!(req.validate(), Err(PlanError::InvalidCValue(101)));
    }

    #[test]
    fn test_aggregate_from_counts_ranks_categories() {
        let aggregate = HistoricalAggregate::from_counts(
            1000,
            12,
            vec![
                ("scratch".to_string(), 3),
                ("burr".to_string(), 7),
                ("dent".to_string(), 0),
                ("rust".to_string(), 2),
            ],
        );

        assert!((aggregate.defect_rate_percent - 1.2).abs() < 1e-10);
        let top: Vec<&str> = aggregate
            .top_categories(2)
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(top, vec!["burr", "scratch"]);
        // zero-count category dropped entirely
        assert_eq!(aggregate.per_category.len(), 3);
    }

    #[test]
    fn test_aggregate_zero_quantity_has_zero_rate() {
        let aggregate = HistoricalAggregate::from_counts(0, 0, vec![]);
        assert_eq!(aggregate.defect_rate_percent, 0.0);
    }

    #[test]
    fn test_sample_size_serde_tagging() {
        let json = serde_json::to_value(SampleSize::Exact(230)).unwrap();
        assert_eq!(json["kind"], "exact");
        assert_eq!(json["value"], 230);
    }
}
