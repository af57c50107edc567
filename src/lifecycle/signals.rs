//! OS signal handling.
//!
//! # Responsibilities
//! - Listen for Ctrl+C while a run is in progress
//! - Translate it into a cancellation of the current request

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first Ctrl+C. The listener task ends afterwards.
pub fn cancel_on_ctrl_c(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, cancelling run");
                shutdown.trigger();
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install Ctrl+C handler"),
        }
    })
}
