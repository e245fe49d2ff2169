//! Plain-text report rendering
//!
//! Renders a complete inspection-plan report as a `String`; writing it
//! anywhere is the caller's business.

use chrono::Local;

use crate::core::advisor::Alternative;
use crate::core::model::{HistoricalAggregate, SampleSize, SamplingRequest, SamplingResult};

const RULE: &str = "============================================================";

/// Render a report for one calculated plan.
pub fn render_text_report(
    request: &SamplingRequest,
    history: Option<&HistoricalAggregate>,
    result: &SamplingResult,
    alternatives: &[Alternative],
) -> String {
    let mut out = String::new();
    let now = Local::now().format("%Y-%m-%d %H:%M");

    out.push_str(RULE);
    out.push_str("\nSampling plan report\n");
    out.push_str(&format!("Generated: {}\n", now));
    out.push_str(RULE);
    out.push('\n');

    out.push_str("\n[Request]\n");
    out.push_str(&format!(
        "  AQL {}%  LTPD {}%  alpha {}%  beta {}%  c={}  lot size {}\n",
        request.aql, request.ltpd, request.alpha, request.beta, request.c_value, request.lot_size
    ));

    if let Some(aggregate) = history {
        out.push_str("\n[Historical data]\n");
        out.push_str(&format!(
            "  {} inspected, {} defects ({:.3}%)\n",
            aggregate.total_quantity, aggregate.total_defect, aggregate.defect_rate_percent
        ));
        for entry in aggregate.top_categories(5) {
            out.push_str(&format!("  - {}: {}\n", entry.category, entry.count));
        }
    }

    if let Some(severity) = &result.severity {
        out.push_str("\n[Inspection severity]\n");
        out.push_str(&format!(
            "  {} - {}\n",
            severity.severity.label(),
            severity.rationale
        ));
    }

    if let Some(rationale) = &result.adjustment_rationale {
        out.push_str("\n[Parameter adjustment]\n");
        out.push_str(&format!(
            "  AQL {}% -> {}%, LTPD {}% -> {}%\n",
            result.original_aql, result.adjusted_aql, result.original_ltpd, result.adjusted_ltpd
        ));
        out.push_str(&format!("  {}\n", rationale));
    }

    out.push_str("\n[Result]\n");
    match &result.sample_size {
        SampleSize::Exact(n) => out.push_str(&format!("  Sample size: {}\n", n)),
        SampleSize::FullInspection(reason) => {
            out.push_str(&format!("  Full inspection required: {}\n", reason))
        }
        SampleSize::CalculationError(reason) => {
            out.push_str(&format!("  Calculation error: {}\n", reason))
        }
    }
    if let Some(warning) = &result.warning {
        out.push_str(&format!("  Warning: {}\n", warning));
    }

    if !result.oc_curve.is_empty() {
        out.push_str("\n[Operating characteristic curve]\n");
        out.push_str("  defect %    P(accept) %\n");
        for point in &result.oc_curve {
            out.push_str(&format!(
                "  {:>8.2}    {:>10.2}\n",
                point.defect_rate, point.acceptance_probability
            ));
        }
    }

    if !alternatives.is_empty() {
        out.push_str("\n[Alternatives]\n");
        for alt in alternatives {
            let outcome = match &alt.outcome.sample_size {
                SampleSize::Exact(n) => format!("{} samples", n),
                SampleSize::FullInspection(_) => "full inspection".to_string(),
                SampleSize::CalculationError(_) => "calculation error".to_string(),
            };
            out.push_str(&format!("  {} -> {}\n", alt.change, outcome));
        }
    }

    out
}
