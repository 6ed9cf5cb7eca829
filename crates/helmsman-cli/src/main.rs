//! Helmsman CLI - render the Kubernetes architecture diagram gallery

mod cli;

use clap::Parser;
use helmsman::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // Initialize logging early; run() reinitializes with CLI flags if needed.
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::HelmsmanApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
