//! Strata CLI - Render hierarchical data as SVG diagrams

mod cli;
mod convert;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::StrataApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
