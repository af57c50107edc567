//! Aggregate statistics over a profiling run.
//!
//! # Design Decisions
//! - Times are whole milliseconds; median uses integer division
//! - The legacy median rule is the default and is applied verbatim
//! - An empty sample set has no summary

use serde::Serialize;

use crate::config::MedianRule;
use crate::profile::sample::ProfileSample;

/// Statistics computed once at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_requests: usize,
    pub fastest_ms: u64,
    pub slowest_ms: u64,
    pub mean_ms: f64,
    pub median_ms: u64,
    pub success_rate_percent: f64,
    /// Non-200 statuses in the order they were received.
    pub failed_status_codes: Vec<u16>,
    pub min_bytes: usize,
    pub max_bytes: usize,
}

/// Median of ascending `sorted` times.
///
/// With `MedianRule::Legacy` an even-length set averages positions `n/2`
/// and `n/2 + 1`; the upper position is clamped to the last element when it
/// runs past the end (`n == 2`).
pub fn median(sorted: &[u64], rule: MedianRule) -> Option<u64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        return Some(sorted[n / 2]);
    }

    let (lo, hi) = match rule {
        MedianRule::Legacy => (n / 2, (n / 2 + 1).min(n - 1)),
        MedianRule::Conventional => (n / 2 - 1, n / 2),
    };
    Some((sorted[lo] + sorted[hi]) / 2)
}

/// Summarize samples in request order.
pub fn summarize(samples: &[ProfileSample], rule: MedianRule) -> Option<ProfileSummary> {
    let mut times: Vec<u64> = samples.iter().map(|s| s.elapsed_ms).collect();
    times.sort_unstable();

    let median_ms = median(&times, rule)?;
    let fastest_ms = times[0];
    let slowest_ms = times[times.len() - 1];
    let total = samples.len();
    let mean_ms = times.iter().sum::<u64>() as f64 / total as f64;

    let mut succeeded = 0usize;
    let mut failed_status_codes = Vec::new();
    let mut min_bytes = usize::MAX;
    let mut max_bytes = 0usize;

    for sample in samples {
        if sample.is_success() {
            succeeded += 1;
        } else {
            failed_status_codes.push(sample.status_code);
        }
        min_bytes = min_bytes.min(sample.byte_length);
        max_bytes = max_bytes.max(sample.byte_length);
    }

    Some(ProfileSummary {
        total_requests: total,
        fastest_ms,
        slowest_ms,
        mean_ms,
        median_ms,
        success_rate_percent: succeeded as f64 / total as f64 * 100.0,
        failed_status_codes,
        min_bytes,
        max_bytes,
    })
}
