//! Per-request profiling record.

use serde::Serialize;

use crate::http::{ParsedResponse, RawResponse};

/// Outcome of one request in a profiling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileSample {
    pub elapsed_ms: u64,
    pub byte_length: usize,
    pub status_code: u16,
}

impl ProfileSample {
    pub fn new(elapsed_ms: u64, byte_length: usize, status_code: u16) -> Self {
        Self {
            elapsed_ms,
            byte_length,
            status_code,
        }
    }

    pub fn from_response(raw: &RawResponse, parsed: &ParsedResponse) -> Self {
        Self::new(raw.elapsed_ms, raw.byte_length, parsed.status_code)
    }

    /// Only 200 counts as success.
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
