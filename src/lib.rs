//! Raw HTTP/1.1 GET client and latency profiler.

pub mod app;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod profile;

pub use config::schema::ProfilerConfig;
pub use lifecycle::Shutdown;
pub use net::{TcpTransport, Transport};
pub use profile::Profiler;
