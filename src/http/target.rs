//! Request target extraction.
//!
//! # Responsibilities
//! - Split a raw URL into the `Host` value and the request path
//! - Keep the compatibility backward-scanning heuristics available
//!   (`UrlMode::Legacy`) next to proper URL parsing (`UrlMode::Standard`)
//!
//! # Design Decisions
//! - The path always carries a trailing space; it is the separator between
//!   the path and the `HTTP/1.1` token when the message is assembled
//! - Ports in URLs are never honored; the transport port comes from config

use std::borrow::Cow;
use thiserror::Error;
use url::Url;

use crate::config::UrlMode;

/// Errors produced while deriving a request from a URL.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{0}' (only http and https URLs are accepted)")]
    UnsupportedScheme(String),

    #[error("no host found in URL '{0}'")]
    MissingHost(String),
}

/// Host and path for one GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub host: String,
    /// Starts with `/` and ends with a single space.
    pub path: String,
}

impl Request {
    /// Derive a request from a URL using the given parsing mode.
    pub fn from_url(url: &str, mode: UrlMode) -> Result<Self, TargetError> {
        match mode {
            UrlMode::Standard => Self::from_standard(url),
            UrlMode::Legacy => {
                let host = parse_host(url);
                if host.is_empty() {
                    return Err(TargetError::MissingHost(url.to_string()));
                }
                Ok(Self {
                    host: host.to_string(),
                    path: parse_path(url),
                })
            }
        }
    }

    fn from_standard(url: &str) -> Result<Self, TargetError> {
        let candidate: Cow<'_, str> = if url.contains("://") {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("http://{url}"))
        };

        let parsed = Url::parse(&candidate).map_err(|source| TargetError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "http" => {}
            "https" => tracing::warn!(url, "https URL requested; sending plain HTTP"),
            other => return Err(TargetError::UnsupportedScheme(other.to_string())),
        }

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| TargetError::MissingHost(url.to_string()))?;

        if let Some(port) = parsed.port() {
            tracing::warn!(port, "Ignoring port in URL; the configured transport port is used");
        }

        let mut path = String::from(parsed.path());
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        path.push(' ');

        Ok(Self {
            host: host.to_string(),
            path,
        })
    }

    /// The request path without its trailing separator.
    pub fn trimmed_path(&self) -> &str {
        self.path.strip_suffix(' ').unwrap_or(&self.path)
    }
}

/// Host portion of a URL, by backward scan.
///
/// Strips an `http://` or `https://` prefix, then looks at the last `.`, `/`
/// or `:` in the remainder. A `.` keeps the whole remainder; a `/` or `:`
/// cuts the remainder there. Only the last delimiter matters, so
/// `example.com/a/b` yields `example.com/a`.
pub fn parse_host(url: &str) -> &str {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);

    match rest.rfind(|c: char| matches!(c, '.' | '/' | ':')) {
        Some(i) if rest.as_bytes()[i] != b'.' => &rest[..i],
        _ => rest,
    }
}

/// Request path of a URL, by backward scan, with a trailing space.
///
/// A `.` seen before any `/` means "no path" and yields `"/ "`. Otherwise
/// everything from the last `/` is returned. Paths containing dots and
/// multi-segment paths are misread.
pub fn parse_path(url: &str) -> String {
    match url.rfind(|c: char| c == '.' || c == '/') {
        Some(i) if url.as_bytes()[i] == b'/' => format!("{} ", &url[i..]),
        _ => "/ ".to_string(),
    }
}
