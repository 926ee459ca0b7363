use clap::Parser;

use echo_server::cli::Cli;
use echo_server::config::EchoConfig;
use echo_server::http::HttpServer;
use echo_server::{net, observability, VERSION};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{VERSION}");
        return;
    }

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("echo-server: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = observability::init_logging(&config.observability) {
        eprintln!("echo-server: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: EchoConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("echo-server v{VERSION} starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await?;

    let server = HttpServer::new(config);
    server.run(listener).await?;

    Ok(())
}
