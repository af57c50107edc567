//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the profiler.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the profiler.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Socket settings (port, buffer cap, timeouts).
    pub transport: TransportConfig,

    /// How request targets are derived from URLs.
    pub parsing: ParsingConfig,

    /// Aggregation and report settings.
    pub profile: ProfileConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Destination port. URLs never supply a port.
    pub port: u16,

    /// Response buffer size in bytes. One byte is reserved, so the usable
    /// capacity is `max_response_bytes - 1`.
    pub max_response_bytes: usize,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Timeout for the whole write + read exchange in milliseconds.
    pub request_timeout_ms: u64,

    /// Size of each socket read.
    pub read_chunk_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: 80,
            max_response_bytes: 128 * 1024, // 128 KiB
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            read_chunk_bytes: 8 * 1024,
        }
    }
}

impl TransportConfig {
    /// Bytes that may be received before the response counts as too large.
    pub fn usable_capacity(&self) -> usize {
        self.max_response_bytes.saturating_sub(1)
    }
}

/// Strategy for splitting a URL into host and request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrlMode {
    /// Proper URL grammar via the `url` crate.
    #[default]
    Standard,
    /// Backward-scanning heuristics kept for compatibility.
    Legacy,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ParsingConfig {
    pub url_mode: UrlMode,
}

/// Median rule applied to even-length sample sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MedianRule {
    /// Averages positions `n/2` and `n/2 + 1` of the sorted times.
    #[default]
    Legacy,
    /// Averages positions `n/2 - 1` and `n/2`.
    Conventional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Profiling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProfileConfig {
    pub median: MedianRule,
    pub report_format: ReportFormat,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Print a Prometheus text exposition after a profiling report.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            metrics_enabled: false,
        }
    }
}
