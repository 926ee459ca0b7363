//! Command-line interface.
//!
//! Flags override values from the optional config file, which in turn
//! override the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, ConfigError, EchoConfig};

#[derive(Debug, Parser)]
#[command(name = "echo-server")]
#[command(about = "A simple http \"echo\" server", long_about = None)]
#[command(after_help = "Example: echo-server --listen 0.0.0.0:80")]
pub struct Cli {
    /// Listen address [default: ":8090"]
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Server timeout in seconds, 0 for none [default: 60]
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: info]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format [default: pretty]
    #[arg(long, value_name = "FORMAT", value_parser = ["pretty", "json"])]
    pub log_format: Option<String>,

    /// Show version and exit
    #[arg(short, long)]
    pub version: bool,
}

impl Cli {
    /// Defaults, then the config file (if any), then flags; validated.
    pub fn resolve_config(&self) -> Result<EchoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => EchoConfig::default(),
        };
        self.apply_overrides(&mut config);
        config::finalize(config)
    }

    fn apply_overrides(&self, config: &mut EchoConfig) {
        if let Some(listen) = &self.listen {
            config.listener.bind_address = listen.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeouts.request_secs = timeout;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.observability.log_format = format.clone();
        }
    }
}
