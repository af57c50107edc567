//! Command-line surface.
//!
//! `--help` is handled here rather than by clap so that it prints the
//! tool's own usage text and exits with status 1.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use thiserror::Error;

pub const USAGE: &str = "\
Usage: ./profile --url <url> --profile <numRequests> --help
    > url: the url to make requests to
    > numRequests: the number of requests to make when profiling (optional).
    > --config <path>: TOML configuration file (optional).
    > --timeout-ms <ms>: per-request timeout in milliseconds (optional).
    > --json: print the profiling report as JSON (optional).
";

#[derive(Debug, Parser)]
#[command(name = "profile")]
#[command(about = "Issue raw HTTP/1.1 GET requests and profile their latency", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// The url to make requests to.
    #[arg(long)]
    pub url: Option<String>,

    /// Number of requests to make when profiling.
    #[arg(long, value_name = "numRequests", allow_hyphen_values = true)]
    pub profile: Option<String>,

    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in milliseconds (overrides config).
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the profiling report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print usage and exit.
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Help,
    Single { url: String },
    Profile { url: String, count: i64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("must provide URL.")]
    MissingUrl,

    #[error("numRequests must be an integer (got '{0}')")]
    InvalidCount(String),
}

impl Cli {
    /// Parse a full argument list, program name first. When clap rejects
    /// the list but `--help` appears in it, the result is a help request.
    pub fn parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match Self::try_parse_from(&args) {
            Ok(cli) => Ok(cli),
            Err(_) if args.iter().skip(1).any(|a| a == "--help") => Ok(Self::help_only()),
            Err(e) => Err(e),
        }
    }

    fn help_only() -> Self {
        Self {
            url: None,
            profile: None,
            config: None,
            timeout_ms: None,
            json: false,
            help: true,
        }
    }

    /// Resolve flags into a mode. `--help` wins over everything else.
    pub fn mode(&self) -> Result<Mode, UsageError> {
        if self.help {
            return Ok(Mode::Help);
        }
        let url = self.url.clone().ok_or(UsageError::MissingUrl)?;

        match &self.profile {
            None => Ok(Mode::Single { url }),
            Some(raw) => {
                let count = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| UsageError::InvalidCount(raw.clone()))?;
                Ok(Mode::Profile { url, count })
            }
        }
    }
}
