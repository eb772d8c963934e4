//! # PesaTrack Register Entry Point
//!
//! Parses the command line and hands off to [`pesatrack_register::run`].
//! Any error is printed once and the process exits with status 1.

use clap::Parser;
use pesatrack_register::cli::Cli;

#[tokio::main]
async fn main() {
    pesatrack_register::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = pesatrack_register::run(cli).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
