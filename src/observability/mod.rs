//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport + profiler produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → terminal (stderr)
//!     → Prometheus text printed after a profiling report (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (host, elapsed_ms, bytes, status) on every event
//! - Metrics are cheap and off unless a recorder is installed

pub mod logging;
pub mod metrics;
