//! Response interpretation.
//!
//! # Responsibilities
//! - Pull the numeric status out of the status line
//! - Split the body from the header block
//!
//! # Design Decisions
//! - No header parsing; chunked and compressed bodies are returned as-is
//! - A missing `HTTP/1.1 ` token is an error, not a garbage status

use thiserror::Error;

const STATUS_TOKEN: &str = "HTTP/1.1 ";
const HEADER_TERMINATOR: &str = "\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("response has no HTTP/1.1 status line")]
    MissingStatusLine,

    #[error("invalid status code '{0}'")]
    InvalidStatus(String),
}

/// Bytes received for one request, decoded as text, with the exchange time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub text: String,
    /// Number of bytes read from the socket.
    pub byte_length: usize,
    pub elapsed_ms: u64,
}

impl RawResponse {
    pub fn new(bytes: &[u8], elapsed_ms: u64) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
            byte_length: bytes.len(),
            elapsed_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub status_code: u16,
    pub body: String,
}

impl ParsedResponse {
    pub fn parse(text: &str) -> Result<Self, ResponseError> {
        Ok(Self {
            status_code: extract_status(text)?,
            body: extract_body(text).to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Status code from the three characters following `HTTP/1.1 `.
pub fn extract_status(text: &str) -> Result<u16, ResponseError> {
    let start = text.find(STATUS_TOKEN).ok_or(ResponseError::MissingStatusLine)? + STATUS_TOKEN.len();
    let code: String = text[start..].chars().take(3).collect();

    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ResponseError::InvalidStatus(code));
    }
    code.parse().map_err(|_| ResponseError::InvalidStatus(code))
}

/// Everything after the first blank line; empty when there is none.
pub fn extract_body(text: &str) -> &str {
    text.find(HEADER_TERMINATOR)
        .map(|i| &text[i + HEADER_TERMINATOR.len()..])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_status_line() {
        assert_eq!(extract_status("HTTP/1.1 404 Not Found\r\n\r\n"), Ok(404));
        assert_eq!(extract_status("HTTP/1.1 200 OK\r\n\r\nHELLO"), Ok(200));
    }

    #[test]
    fn status_token_missing() {
        assert_eq!(
            extract_status("HTTP/1.0 200 OK\r\n\r\n"),
            Err(ResponseError::MissingStatusLine)
        );
        assert_eq!(extract_status(""), Err(ResponseError::MissingStatusLine));
    }

    #[test]
    fn status_not_numeric() {
        assert_eq!(
            extract_status("HTTP/1.1 abc\r\n"),
            Err(ResponseError::InvalidStatus("abc".into()))
        );
        assert_eq!(
            extract_status("HTTP/1.1 20"),
            Err(ResponseError::InvalidStatus("20".into()))
        );
    }

    #[test]
    fn body_after_separator() {
        assert_eq!(extract_body("HTTP/1.1 200 OK\r\n\r\nHELLO"), "HELLO");
        assert_eq!(extract_body("HTTP/1.1 200 OK\r\nA: b\r\n\r\nx\r\n\r\ny"), "x\r\n\r\ny");
    }

    #[test]
    fn body_empty_without_separator() {
        assert_eq!(extract_body("HTTP/1.1 200 OK\r\n"), "");
        assert_eq!(extract_body("HTTP/1.1 204 No Content\r\n\r\n"), "");
    }

    #[test]
    fn parsed_response() {
        let parsed = ParsedResponse::parse("HTTP/1.1 200 OK\r\n\r\nHELLO").unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.body, "HELLO");

        let parsed = ParsedResponse::parse("HTTP/1.1 500 Oops\r\n\r\n").unwrap();
        assert!(!parsed.is_success());
    }

    #[test]
    fn raw_response_counts_bytes() {
        let raw = RawResponse::new(b"HTTP/1.1 200 OK\r\n\r\n\xff", 3);
        assert_eq!(raw.byte_length, 20);
        assert_eq!(raw.elapsed_ms, 3);
        assert!(raw.text.ends_with('\u{fffd}'));
    }
}
