//! # Storefront Entry Point
//!
//! Parses flags, sets up logging and hands over to the REPL in
//! `storefront_lib`.
//!
//! ```text
//! $ storefront --config ./storefront.toml --log debug
//! Welcome to RestoShop. Type 'help' for commands.
//! add p1
//! ```

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "RestoShop storefront in the terminal")]
struct Cli {
    /// Path to storefront.toml (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "info,storefront_lib=trace"
    #[arg(short, long)]
    log: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    storefront_lib::init_tracing(cli.log.as_deref());

    if let Err(e) = storefront_lib::run(cli.config.as_deref()) {
        tracing::error!("Storefront failed: {}", e);
        eprintln!("{}", e.message);
        std::process::exit(1);
    }
}
