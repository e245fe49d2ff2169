//! Output formatting and input-file loading shared by the commands

use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::core::history::AdjustmentPolicy;
use crate::core::model::{HistoricalAggregate, OcPoint, SampleSize, SamplingResult};

/// Load an adjustment policy from a YAML file. Missing fields fall back to
/// the built-in defaults.
pub fn load_policy(path: &Path) -> Result<AdjustmentPolicy> {
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read policy file {}", path.display()))?;
    serde_yml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid policy file {}", path.display()))
}

/// Load a historical inspection aggregate from a YAML or JSON file.
pub fn load_aggregate(path: &Path) -> Result<HistoricalAggregate> {
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read history file {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(&content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid history file {}", path.display()))
    } else {
        serde_yml::from_str(&content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid history file {}", path.display()))
    }
}

/// Pretty-print any serializable payload as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", rendered);
    Ok(())
}

#[derive(Tabled)]
struct OcRow {
    #[tabled(rename = "DEFECT %")]
    defect_rate: String,
    #[tabled(rename = "P(ACCEPT) %")]
    acceptance: String,
}

/// Render OC points as a right-aligned two-column table.
pub fn oc_table(points: &[OcPoint]) -> String {
    let rows: Vec<OcRow> = points
        .iter()
        .map(|point| OcRow {
            defect_rate: format!("{:.2}", point.defect_rate),
            acceptance: format!("{:.2}", point.acceptance_probability),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Print a calculated plan in human-readable form.
pub fn print_result(result: &SamplingResult, show_oc: bool) {
    match &result.sample_size {
        SampleSize::Exact(n) => {
            println!(
                "{} Sample size: {}",
                style("✓").green(),
                style(n).cyan().bold()
            );
        }
        SampleSize::FullInspection(reason) => {
            println!(
                "{} Full inspection required: {}",
                style("!").yellow(),
                reason
            );
        }
        SampleSize::CalculationError(reason) => {
            println!("{} Calculation error: {}", style("✗").red(), reason);
        }
    }

    if let Some(warning) = &result.warning {
        println!("{} {}", style("warning:").yellow().bold(), warning);
    }

    if let Some(severity) = &result.severity {
        println!(
            "  Inspection severity: {} ({})",
            style(severity.severity.label()).bold(),
            severity.rationale
        );
    }

    if let Some(rationale) = &result.adjustment_rationale {
        println!(
            "  Adjusted by history: AQL {}% -> {}%, LTPD {}% -> {}%",
            result.original_aql, result.adjusted_aql, result.original_ltpd, result.adjusted_ltpd
        );
        println!("  {}", style(rationale).dim());
    }

    if show_oc && !result.oc_curve.is_empty() {
        println!();
        println!("{}", style("Operating characteristic curve").bold());
        println!("{}", oc_table(&result.oc_curve));
    }
}
