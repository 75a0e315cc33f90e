//! Shared utilities for integration testing: mock JSON-RPC backends.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock JSON-RPC backend that answers every request with 200 and
/// the given `result` payload (raw JSON, e.g. `"false"` or `"{}"`).
pub async fn start_mock_rpc_backend(addr: SocketAddr, result: &'static str) {
    start_programmable_rpc_backend(addr, move || async move {
        (
            200,
            format!("{{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}}", result),
        )
    })
    .await;
}

/// Start a mock JSON-RPC backend whose status and response body are
/// produced per request by `f`.
pub async fn start_programmable_rpc_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request before answering; the probe
                        // sends a small POST that fits one read.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}
