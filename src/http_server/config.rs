//! HTTP Server Configuration
//!
//! Host, port, CORS origins and the backing data file path. Built from
//! CLI arguments (or directly in tests), never read from a file.

use std::path::PathBuf;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 3000)
    pub port: u16,

    /// CORS allowed origins; empty means allow any origin
    pub cors_origins: Vec<String>,

    /// Path of the delimited-text record file (default: "students.csv")
    pub data_file: PathBuf,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            data_file: PathBuf::from("students.csv"),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
