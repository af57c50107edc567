//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! URL string
//!     → target.rs (host + path, legacy or standard parsing)
//!     → message.rs (literal GET request text)
//!     → [net::transport sends it, collects RawResponse]
//!     → response.rs (status code + body)
//! ```

pub mod message;
pub mod response;
pub mod target;

pub use message::construct_message;
pub use response::{extract_body, extract_status, ParsedResponse, RawResponse, ResponseError};
pub use target::{parse_host, parse_path, Request, TargetError};
