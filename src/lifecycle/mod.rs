//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Shutdown::trigger
//!
//! Cancellation (shutdown.rs):
//!     Shutdown::trigger → in-flight request aborts with Cancelled
//!                       → profiler stops issuing requests
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative; the transport races each exchange against it
//! - A trigger is latched, so later requests observe it too

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
