//! Report rendering for profiling results.

use crate::profile::summary::ProfileSummary;

const RULE: &str = "================================================================================";

/// Labeled text block printed at the end of a run.
pub fn render_text(summary: &ProfileSummary) -> String {
    let codes = if summary.failed_status_codes.is_empty() {
        "N/A".to_string()
    } else {
        summary
            .failed_status_codes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nRESULTS:\n\n");
    out.push_str(&format!(">>>> Fastest time: {}ms\n", summary.fastest_ms));
    out.push_str(&format!(">>>> Slowest time: {}ms\n", summary.slowest_ms));
    out.push_str(&format!(">>>> Mean time: {}ms\n", format_real(summary.mean_ms)));
    out.push_str(&format!(">>>> Median time: {}ms\n", summary.median_ms));
    out.push_str(&format!(
        ">>>> Percentage successful requests: {}%\n",
        format_real(summary.success_rate_percent)
    ));
    out.push_str(&format!(">>>> Unsuccessful error codes: {}\n", codes));
    out.push_str(&format!(">>>> Smallest response size: {} bytes\n", summary.min_bytes));
    out.push_str(&format!(">>>> Largest response size: {} bytes\n", summary.max_bytes));
    out
}

/// Pretty-printed JSON form of the summary.
pub fn render_json(summary: &ProfileSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// Up to three decimals, trailing zeros dropped (`35`, `33.333`, `12.5`).
pub fn format_real(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
