//! Shared mock servers for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use http_profile::config::ProfilerConfig;

/// Read until the blank line that ends a request head.
pub async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        match socket.read(&mut byte).await {
            Ok(0) | Err(_) => break,
            Ok(_) => head.push(byte[0]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

pub fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Config pointing the transport at a local mock server.
#[allow(dead_code)]
pub fn config_for(addr: SocketAddr) -> ProfilerConfig {
    let mut config = ProfilerConfig::default();
    config.transport.port = addr.port();
    config.transport.connect_timeout_ms = 2_000;
    config.transport.request_timeout_ms = 2_000;
    config
}

/// Start a backend whose response is decided per connection.
///
/// Each request head is forwarded on the returned channel.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, mpsc::UnboundedReceiver<String>)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let f = Arc::new(f);

    tokio::spawn(async move {
        // Sequential on purpose: the client never overlaps requests.
        while let Ok((mut socket, _)) = listener.accept().await {
            let head = read_request_head(&mut socket).await;
            let _ = tx.send(head);

            let (status, body) = f().await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_text(status),
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (addr, rx)
}

/// Start a backend that always answers 200 with `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    start_programmable_backend(move || async move { (200, body.to_string()) }).await
}

/// Start a backend that writes `bytes` verbatim, then closes unless
/// `hold_open` is set.
#[allow(dead_code)]
pub async fn start_raw_backend(bytes: Vec<u8>, hold_open: bool) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request_head(&mut socket).await;
            let _ = socket.write_all(&bytes).await;
            if hold_open {
                tokio::spawn(async move {
                    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                    drop(socket);
                });
            } else {
                let _ = socket.shutdown().await;
            }
        }
    });

    addr
}

/// Start a backend that accepts and then never answers.
#[allow(dead_code)]
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}
