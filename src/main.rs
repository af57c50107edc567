//! HTTP GET profiler
//!
//! Sends hand-built HTTP/1.1 GET requests over plain TCP, either once
//! (printing the body) or N times in a row (printing latency statistics).
//!
//! # Architecture Overview
//!
//! ```text
//!   --url / --profile ┌─────────┐     ┌──────────────┐     ┌────────────┐
//!   ─────────────────▶│   cli   │────▶│     app      │────▶│  profile   │
//!                     │  mode   │     │  dispatcher  │     │  profiler  │
//!                     └─────────┘     └──────┬───────┘     └─────┬──────┘
//!                                            │ single-shot       │ N times
//!                                            ▼                   ▼
//!                     ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!                     │ http::target │─▶│ net::transport│─▶│http::response│
//!                     │  + message   │  │ TCP :80, timer│  │ status + body│
//!                     └──────────────┘  └──────────────┘  └──────────────┘
//!
//!   Cross-cutting: config (TOML) · observability (tracing, metrics) ·
//!                  lifecycle (Ctrl+C cancellation)
//! ```

use std::io;
use std::process::ExitCode;

use http_profile::app;
use http_profile::cli::Cli;
use http_profile::lifecycle::{signals, Shutdown};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::parse_lenient(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let shutdown = Shutdown::new();
    let _signals = signals::cancel_on_ctrl_c(shutdown.clone());

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = app::execute(&cli, shutdown, &mut stdout, &mut stderr).await;

    ExitCode::from(code)
}
