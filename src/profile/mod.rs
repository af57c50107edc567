//! Profiling subsystem.
//!
//! # Data Flow
//! ```text
//! url + numRequests
//!     → profiler.rs (validate count, N sequential requests via Transport)
//!     → sample.rs (elapsed ms, byte length, status per request)
//!     → summary.rs (sort times; fastest/slowest/mean/median; success rate)
//!     → report.rs (labeled text block or JSON)
//! ```
//!
//! # Design Decisions
//! - Samples are owned by the profiler for the length of one run
//! - The summary is computed once and never mutated

pub mod profiler;
pub mod report;
pub mod sample;
pub mod summary;

pub use profiler::{ProfileError, Profiler};
pub use sample::ProfileSample;
pub use summary::{median, summarize, ProfileSummary};
