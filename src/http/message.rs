//! Request message construction.

use crate::http::target::Request;

/// Build the literal GET request text.
///
/// `path` must already carry its trailing space; it is what separates the
/// path from the `HTTP/1.1` token.
pub fn construct_message(host: &str, path: &str) -> String {
    format!("GET {path}HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n")
}

impl Request {
    /// Wire bytes for this request.
    pub fn to_message(&self) -> String {
        construct_message(&self.host, &self.path)
    }
}
