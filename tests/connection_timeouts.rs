//! Request timeout behavior over raw TCP connections.

use std::time::Duration;

use echo_server::config::EchoConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

fn config_with_timeout(secs: u64) -> EchoConfig {
    let mut config = EchoConfig::default();
    config.timeouts.request_secs = secs;
    config
}

#[tokio::test]
async fn test_stalled_headers_close_connection() {
    let addr = common::start_server(config_with_timeout(1)).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    // Header block never terminated
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();

    let mut received = Vec::new();
    let closed = tokio::time::timeout(Duration::from_secs(3), stream.read_to_end(&mut received)).await;

    assert!(closed.is_ok(), "connection still open 3s after a 1s timeout");
    assert!(!String::from_utf8_lossy(&received).contains("\"method\""));
}

#[tokio::test]
async fn test_disabled_timeout_leaves_connection_open() {
    let addr = common::start_server(config_with_timeout(0)).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();

    let mut received = Vec::new();
    let waited = tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut received)).await;

    assert!(waited.is_err(), "connection closed without a timeout configured");
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_unread_response_closes_connection() {
    const BODY_LEN: usize = 32 * 1024 * 1024;

    let addr = common::start_server(config_with_timeout(1)).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let head = format!(
        "POST /big HTTP/1.1\r\nHost: x\r\nContent-Length: {BODY_LEN}\r\n\r\n"
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(&vec![b'a'; BODY_LEN]).await.unwrap();

    // Leave the echo unread long enough for the write deadline to fire
    tokio::time::sleep(Duration::from_secs(3)).await;

    let mut received = Vec::new();
    let finished =
        tokio::time::timeout(Duration::from_secs(10), stream.read_to_end(&mut received)).await;

    assert!(finished.is_ok(), "stalled connection was never closed");
    assert!(received.len() < BODY_LEN, "whole echo was delivered");
}

#[tokio::test]
async fn test_complete_request_within_timeout() {
    let addr = common::start_server(config_with_timeout(1)).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream
        .write_all(b"GET /quick HTTP/1.1\r\nHost: x\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(3), stream.read_to_end(&mut received))
        .await
        .unwrap()
        .unwrap();

    let text = String::from_utf8_lossy(&received);
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"), "{text}");
    assert!(text.contains("\"url\": \"http://x/quick\""), "{text}");
}
