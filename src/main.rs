//! toilet-finder CLI entry point
//!
//! Public toilet finder - CLI + HTTP API

use toilet_finder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
