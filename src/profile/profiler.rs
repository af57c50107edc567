//! Sequential request driver.
//!
//! # Responsibilities
//! - Validate the request count
//! - Issue requests one after another through a `Transport`
//! - Collect a sample per request and summarize at the end
//!
//! # Design Decisions
//! - Strictly sequential; sample order is request order
//! - Non-200 statuses are samples, not errors
//! - Any transport or response error aborts the run; no partial summary

use thiserror::Error;

use crate::config::{MedianRule, UrlMode};
use crate::http::{ParsedResponse, Request, ResponseError, TargetError};
use crate::net::{Transport, TransportError};
use crate::observability::metrics;
use crate::profile::sample::ProfileSample;
use crate::profile::summary::{summarize, ProfileSummary};

/// Upper bound on the sample buffer reserved before the first request.
const PREALLOCATED_SAMPLES: usize = 1024;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("numRequests must be greater than 0 (got {0})")]
    InvalidCount(i64),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("request {iteration} failed: {source}")]
    Transport {
        iteration: usize,
        #[source]
        source: TransportError,
    },

    #[error("request {iteration} returned an unreadable response: {source}")]
    Response {
        iteration: usize,
        #[source]
        source: ResponseError,
    },

    #[error("no samples collected")]
    Empty,
}

impl ProfileError {
    /// Whether the run was stopped by the user rather than by a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ProfileError::Transport {
                source: TransportError::Cancelled,
                ..
            }
        )
    }
}

/// Drives a profiling run over any transport.
pub struct Profiler<T> {
    transport: T,
    url_mode: UrlMode,
    median: MedianRule,
}

impl<T: Transport> Profiler<T> {
    pub fn new(transport: T, url_mode: UrlMode, median: MedianRule) -> Self {
        Self {
            transport,
            url_mode,
            median,
        }
    }

    /// Issue `num_requests` GETs to `url`. `on_sample` sees every sample as
    /// it is recorded, with its zero-based iteration.
    pub async fn run<F>(
        &self,
        url: &str,
        num_requests: i64,
        mut on_sample: F,
    ) -> Result<ProfileSummary, ProfileError>
    where
        F: FnMut(usize, &ProfileSample),
    {
        if num_requests <= 0 {
            return Err(ProfileError::InvalidCount(num_requests));
        }
        let count = usize::try_from(num_requests).unwrap_or(usize::MAX);
        let request = Request::from_url(url, self.url_mode)?;

        tracing::info!(
            host = %request.host,
            path = request.trimmed_path(),
            count,
            "Profiling started"
        );

        let mut samples = Vec::with_capacity(count.min(PREALLOCATED_SAMPLES));
        for iteration in 0..count {
            let raw = self
                .transport
                .send(&request)
                .await
                .map_err(|source| ProfileError::Transport { iteration, source })?;
            let parsed = ParsedResponse::parse(&raw.text)
                .map_err(|source| ProfileError::Response { iteration, source })?;

            let sample = ProfileSample::from_response(&raw, &parsed);
            metrics::record_status(sample.status_code);
            tracing::debug!(
                iteration,
                status = sample.status_code,
                elapsed_ms = sample.elapsed_ms,
                bytes = sample.byte_length,
                "Sample recorded"
            );

            on_sample(iteration, &sample);
            samples.push(sample);
        }

        summarize(&samples, self.median).ok_or(ProfileError::Empty)
    }
}
