//! Top-level dispatch.
//!
//! # Responsibilities
//! - Resolve mode and configuration from the command line
//! - Run single-shot or profiling mode
//! - Turn every outcome into an exit status
//!
//! # Design Decisions
//! - Lower layers return errors; only this module decides the exit status
//! - Usage problems go to stdout, failures to stderr, both prefixed `ERROR, `
//! - No retry and no partial results after a failure

use std::io::{self, Write};

use thiserror::Error;

use crate::cli::{Cli, Mode, UsageError, USAGE};
use crate::config::{load_config, ConfigError, ProfilerConfig, ReportFormat};
use crate::config::validation::validate_config;
use crate::http::{ParsedResponse, Request, ResponseError, TargetError};
use crate::lifecycle::Shutdown;
use crate::net::{TcpTransport, Transport, TransportError};
use crate::observability::{logging, metrics};
use crate::profile::{report, ProfileError, Profiler};

/// Exit status for help and for completed runs.
pub const EXIT_DONE: u8 = 1;
/// Exit status for rejected input and aborted runs.
pub const EXIT_ABORTED: u8 = 0;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("writing output failed: {0}")]
    Io(#[from] io::Error),

    #[error("encoding report failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Errors caused by the invocation itself rather than by the network.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AppError::Usage(_) | AppError::Profile(ProfileError::InvalidCount(_))
        )
    }

    /// Runs stopped by Ctrl+C rather than by a failure.
    pub fn is_cancelled(&self) -> bool {
        match self {
            AppError::Transport(TransportError::Cancelled) => true,
            AppError::Profile(e) => e.is_cancelled(),
            _ => false,
        }
    }
}

/// Load the config file (if any) and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<ProfilerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProfilerConfig::default(),
    };

    if let Some(ms) = cli.timeout_ms {
        config.transport.request_timeout_ms = ms;
    }
    if cli.json {
        config.profile.report_format = ReportFormat::Json;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Run one invocation and return its exit status.
pub async fn execute<W, E>(cli: &Cli, shutdown: Shutdown, out: &mut W, err: &mut E) -> u8
where
    W: Write,
    E: Write,
{
    let result = match cli.mode() {
        Ok(Mode::Help) => {
            let _ = writeln!(out, "{USAGE}");
            return EXIT_DONE;
        }
        Ok(mode) => match resolve_config(cli) {
            Ok(config) => {
                logging::init(&config.observability.log_level);
                dispatch(mode, &config, shutdown, out).await
            }
            Err(e) => Err(e.into()),
        },
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => EXIT_DONE,
        Err(e) => {
            report_error(&e, out, err);
            EXIT_ABORTED
        }
    }
}

fn report_error<W: Write, E: Write>(error: &AppError, out: &mut W, err: &mut E) {
    if error.is_usage() {
        let _ = writeln!(out, "ERROR, {error}\n");
    } else if error.is_cancelled() {
        tracing::warn!("Run cancelled");
        let _ = writeln!(err, "ERROR, run cancelled");
    } else {
        tracing::error!(error = %error, "Run aborted");
        let _ = writeln!(err, "ERROR, {error}");
    }
}

/// Run a resolved mode against the TCP transport.
pub async fn dispatch<W: Write>(
    mode: Mode,
    config: &ProfilerConfig,
    shutdown: Shutdown,
    out: &mut W,
) -> Result<(), AppError> {
    let transport = TcpTransport::new(config.transport.clone(), shutdown);
    tracing::debug!(
        port = transport.config().port,
        max_response_bytes = transport.config().max_response_bytes,
        "Transport ready"
    );

    match mode {
        Mode::Help => {
            writeln!(out, "{USAGE}")?;
            Ok(())
        }
        Mode::Single { url } => single_shot(&transport, &url, config, out).await,
        Mode::Profile { url, count } => profile(transport, &url, count, config, out).await,
    }
}

/// Fetch once and print the body (200) or the status code.
pub async fn single_shot<T: Transport, W: Write>(
    transport: &T,
    url: &str,
    config: &ProfilerConfig,
    out: &mut W,
) -> Result<(), AppError> {
    let request = Request::from_url(url, config.parsing.url_mode)?;
    let raw = transport.send(&request).await?;
    let parsed = ParsedResponse::parse(&raw.text)?;

    tracing::info!(
        status = parsed.status_code,
        elapsed_ms = raw.elapsed_ms,
        bytes = raw.byte_length,
        "Response received"
    );

    if parsed.is_success() {
        write!(out, "{}\n\n", parsed.body)?;
    } else {
        write!(out, "status {}\n\n", parsed.status_code)?;
    }
    Ok(())
}

/// Profile `count` sequential requests and print the report.
pub async fn profile<T: Transport, W: Write>(
    transport: T,
    url: &str,
    count: i64,
    config: &ProfilerConfig,
    out: &mut W,
) -> Result<(), AppError> {
    let prometheus = if config.observability.metrics_enabled && count > 0 {
        metrics::init_metrics()
    } else {
        None
    };

    let profiler = Profiler::new(transport, config.parsing.url_mode, config.profile.median);
    let summary = profiler
        .run(url, count, |_, sample| {
            if !sample.is_success() {
                let _ = write!(out, ">>>> failed (status {})\n\n", sample.status_code);
            }
        })
        .await?;

    match config.profile.report_format {
        ReportFormat::Text => write!(out, "{}", report::render_text(&summary))?,
        ReportFormat::Json => writeln!(out, "{}", report::render_json(&summary)?)?,
    }

    if let Some(handle) = prometheus {
        write!(out, "\n{}", handle.render())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RawResponse;
    use clap::Parser;
    use std::cell::Cell;

    struct FixedTransport {
        text: &'static str,
        calls: Cell<usize>,
    }

    impl FixedTransport {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for FixedTransport {
        async fn send(&self, _request: &Request) -> Result<RawResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            Ok(RawResponse::new(self.text.as_bytes(), 7))
        }
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("profile").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn single_shot_prints_body() {
        let transport = FixedTransport::new("HTTP/1.1 200 OK\r\n\r\nHELLO");
        let mut out = Vec::new();
        single_shot(&transport, "http://example.com", &ProfilerConfig::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "HELLO\n\n");
    }

    #[tokio::test]
    async fn single_shot_prints_status() {
        let transport = FixedTransport::new("HTTP/1.1 404 Not Found\r\n\r\nmissing");
        let mut out = Vec::new();
        single_shot(&transport, "http://example.com", &ProfilerConfig::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "status 404\n\n");
    }

    #[tokio::test]
    async fn profile_prints_failures_and_report() {
        let transport = FixedTransport::new("HTTP/1.1 503 Busy\r\n\r\n");
        let mut out = Vec::new();
        profile(transport, "example.com", 2, &ProfilerConfig::default(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(">>>> failed (status 503)").count(), 2);
        assert!(text.contains(">>>> Percentage successful requests: 0%"));
        assert!(text.contains(">>>> Unsuccessful error codes: 503 503"));
        assert!(text.contains(">>>> Median time: 7ms"));
    }

    #[tokio::test]
    async fn profile_json_report() {
        let transport = FixedTransport::new("HTTP/1.1 200 OK\r\n\r\nok");
        let mut config = ProfilerConfig::default();
        config.profile.report_format = ReportFormat::Json;
        let mut out = Vec::new();
        profile(transport, "example.com", 3, &config, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_requests"], 3);
        assert_eq!(value["success_rate_percent"], 100.0);
    }

    #[tokio::test]
    async fn profile_rejects_zero_without_network() {
        let transport = FixedTransport::new("HTTP/1.1 200 OK\r\n\r\n");
        let mut out = Vec::new();
        let err = profile(&transport, "example.com", 0, &ProfilerConfig::default(), &mut out)
            .await
            .unwrap_err();
        assert!(err.is_usage());
        assert_eq!(transport.calls.get(), 0);
    }

    #[tokio::test]
    async fn help_exits_with_one() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(&cli(&["--url", "x.com", "--help"]), Shutdown::new(), &mut out, &mut err).await;
        assert_eq!(code, EXIT_DONE);
        assert!(String::from_utf8(out).unwrap().starts_with("Usage: ./profile"));
    }

    #[tokio::test]
    async fn missing_url_exits_with_zero() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(&cli(&[]), Shutdown::new(), &mut out, &mut err).await;
        assert_eq!(code, EXIT_ABORTED);
        assert_eq!(String::from_utf8(out).unwrap(), "ERROR, must provide URL.\n\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn non_positive_count_exits_with_zero() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(
            &cli(&["--url", "example.com", "--profile", "0"]),
            Shutdown::new(),
            &mut out,
            &mut err,
        )
        .await;
        assert_eq!(code, EXIT_ABORTED);
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("ERROR, numRequests must be greater than 0"));
    }

    #[tokio::test]
    async fn cancelled_run_is_reported_on_stderr() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(&cli(&["--url", "example.com"]), shutdown, &mut out, &mut err).await;
        assert_eq!(code, EXIT_ABORTED);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "ERROR, run cancelled\n");
    }

    #[tokio::test]
    async fn cancelled_profile_gets_the_same_notice() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let args = ["--url", "example.com", "--profile", "3"];
        let code = execute(&cli(&args), shutdown, &mut out, &mut err).await;
        assert_eq!(code, EXIT_ABORTED);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "ERROR, run cancelled\n");
    }

    #[test]
    fn only_cancellation_counts_as_cancelled() {
        let cancelled = AppError::Profile(ProfileError::Transport {
            iteration: 2,
            source: TransportError::Cancelled,
        });
        assert!(cancelled.is_cancelled());

        let failed = AppError::Profile(ProfileError::Transport {
            iteration: 2,
            source: TransportError::ResponseTooLarge { limit: 16 },
        });
        assert!(!failed.is_cancelled());
        assert!(!AppError::Usage(UsageError::MissingUrl).is_cancelled());
    }

    #[test]
    fn overrides_are_validated() {
        let config = resolve_config(&cli(&["--url", "a.com", "--timeout-ms", "0"]));
        assert!(matches!(config, Err(ConfigError::Validation(_))));

        let config = resolve_config(&cli(&["--url", "a.com", "--timeout-ms", "900", "--json"])).unwrap();
        assert_eq!(config.transport.request_timeout_ms, 900);
        assert_eq!(config.profile.report_format, ReportFormat::Json);
    }
}
