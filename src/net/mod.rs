//! Network transport subsystem.
//!
//! # Data Flow
//! ```text
//! Request (host, path)
//!     → transport.rs: DNS (first IPv4) → TCP connect (configured port)
//!     → start timer → write message → read until close / cap → stop timer
//!     → RawResponse (text, byte length, elapsed ms)
//! ```
//!
//! # Design Decisions
//! - Exactly one socket open at a time; requests never overlap
//! - The `Transport` trait is the seam the profiler is generic over

pub mod transport;

pub use transport::{TcpTransport, Transport, TransportError};
