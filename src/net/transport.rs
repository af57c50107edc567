//! Request transport over plain TCP.
//!
//! # Responsibilities
//! - Resolve the host to its first IPv4 address
//! - Connect to the configured port (80 unless overridden in config)
//! - Write the request, read until the peer closes or the buffer cap is hit
//! - Time the write + read cycle
//!
//! # Design Decisions
//! - One connection per request, closed on drop
//! - Reaching the buffer cap is a typed error, never a silent truncation
//! - Read errors end the response; write errors fail the request
//! - Every exchange is raced against a timeout and the cancellation signal

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use crate::config::TransportConfig;
use crate::http::{RawResponse, Request};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Errors that end a request without a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no such host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no IPv4 address found for host '{0}'")]
    NoIpv4Address(String),

    #[error("connecting to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("writing message to socket failed: {0}")]
    Write(#[source] io::Error),

    #[error("response does not fit in {limit} bytes (not enough space allocated)")]
    ResponseTooLarge { limit: usize },

    #[error("{stage} timed out after {timeout_ms}ms")]
    Timeout { stage: &'static str, timeout_ms: u64 },

    #[error("request cancelled")]
    Cancelled,
}

/// Sends one request and returns the raw response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &Request) -> Result<RawResponse, TransportError>;
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: &Request) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Production transport: one blocking-style TCP exchange per request.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    config: TransportConfig,
    shutdown: Shutdown,
}

impl TcpTransport {
    pub fn new(config: TransportConfig, shutdown: Shutdown) -> Self {
        Self { config, shutdown }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn resolve(&self, host: &str) -> Result<SocketAddr, TransportError> {
        let mut addrs = lookup_host((host, self.config.port))
            .await
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                source,
            })?;

        // First IPv4 record only.
        addrs
            .find(SocketAddr::is_ipv4)
            .ok_or_else(|| TransportError::NoIpv4Address(host.to_string()))
    }

    async fn exchange(&self, request: &Request) -> Result<RawResponse, TransportError> {
        let connect_timeout_ms = self.config.connect_timeout_ms;
        let connect_budget = Duration::from_millis(connect_timeout_ms);

        let addr = timeout(connect_budget, self.resolve(&request.host))
            .await
            .map_err(|_| TransportError::Timeout {
                stage: "resolve",
                timeout_ms: connect_timeout_ms,
            })??;
        tracing::debug!(host = %request.host, addr = %addr, "Resolved host");

        let mut stream = timeout(connect_budget, TcpStream::connect(addr))
            .await
            .map_err(|_| TransportError::Timeout {
                stage: "connect",
                timeout_ms: connect_timeout_ms,
            })?
            .map_err(|source| TransportError::Connect { addr, source })?;

        let message = request.to_message();
        let request_timeout_ms = self.config.request_timeout_ms;

        let start = Instant::now();
        let bytes = timeout(
            Duration::from_millis(request_timeout_ms),
            write_then_read(&mut stream, message.as_bytes(), &self.config),
        )
        .await
        .map_err(|_| TransportError::Timeout {
            stage: "request",
            timeout_ms: request_timeout_ms,
        })??;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        drop(stream);

        tracing::debug!(
            host = %request.host,
            elapsed_ms,
            bytes = bytes.len(),
            "Exchange complete"
        );
        metrics::record_exchange(elapsed_ms, bytes.len());

        Ok(RawResponse::new(&bytes, elapsed_ms))
    }
}

impl Transport for TcpTransport {
    async fn send(&self, request: &Request) -> Result<RawResponse, TransportError> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(TransportError::Cancelled),
            result = self.exchange(request) => result,
        }
    }
}

/// Write `message`, then read until EOF, a read error, or the buffer cap.
///
/// Filling `TransportConfig::usable_capacity` bytes fails with
/// `ResponseTooLarge`.
pub async fn write_then_read<S>(
    stream: &mut S,
    message: &[u8],
    limits: &TransportConfig,
) -> Result<Vec<u8>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut sent = 0;
    while sent < message.len() {
        match stream.write(&message[sent..]).await {
            Ok(0) => {
                tracing::warn!(sent, total = message.len(), "Socket accepted no more bytes");
                break;
            }
            Ok(n) => sent += n,
            Err(e) => return Err(TransportError::Write(e)),
        }
    }

    let capacity = limits.usable_capacity();
    let mut response = Vec::with_capacity(limits.read_chunk_bytes.min(capacity));
    let mut chunk = vec![0u8; limits.read_chunk_bytes.max(1)];

    while response.len() < capacity {
        let want = chunk.len().min(capacity - response.len());
        match stream.read(&mut chunk[..want]).await {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&chunk[..n]),
            Err(e) => {
                tracing::warn!(error = %e, received = response.len(), "Read failed, ending response");
                break;
            }
        }
    }

    if response.len() >= capacity {
        return Err(TransportError::ResponseTooLarge {
            limit: limits.max_response_bytes,
        });
    }

    Ok(response)
}
