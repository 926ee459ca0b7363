//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use echo_server::config::EchoConfig;
use echo_server::http::HttpServer;
use echo_server::net;

/// Start the echo server on an ephemeral loopback port and return its address.
pub async fn start_server(mut config: EchoConfig) -> SocketAddr {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = net::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// A client that never reuses connections or consults proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
