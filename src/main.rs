//! rollbook entry point
//!
//! Parses CLI arguments, boots the HTTP server, prints errors to
//! stderr and exits non-zero on failure. All logic lives in the
//! library; this file only delegates.

use rollbook::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
