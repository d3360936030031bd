//! CLI argument parsing and server boot
//!
//! Usage: `rollbook [--host <addr>] [--port <port>] [--data-file <path>]`

use std::path::PathBuf;

use clap::Parser;

use crate::http_server::{HttpServer, HttpServerConfig};

/// rollbook - a minimal file-backed student record service
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Path of the delimited-text record file
    #[arg(long, default_value = "students.csv")]
    pub data_file: PathBuf,

    /// Restrict CORS to this origin (repeatable); any origin if absent
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,
}

impl Cli {
    /// Turn parsed arguments into a server configuration
    pub fn into_config(self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host,
            port: self.port,
            cors_origins: self.cors_origins,
            data_file: self.data_file,
        }
    }
}

/// Parse arguments and run the server until it exits.
pub async fn run() -> Result<(), std::io::Error> {
    let config = Cli::parse().into_config();
    HttpServer::with_config(config).start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rollbook"]);
        let config = cli.into_config();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.data_file, PathBuf::from("students.csv"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "rollbook",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--data-file",
            "/tmp/records.csv",
        ]);
        let config = cli.into_config();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/tmp/records.csv"));
    }

    #[test]
    fn test_cors_origins_are_repeatable() {
        let cli = Cli::parse_from([
            "rollbook",
            "--cors-origin",
            "http://a.test",
            "--cors-origin",
            "http://b.test",
        ]);
        assert_eq!(
            cli.into_config().cors_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }
}
