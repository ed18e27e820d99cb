//! # Storefront Shell Library
//!
//! The presentation shell around `storefront-core`: a single controller,
//! commands returning snapshot responses, a text renderer and a REPL.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & tracing)
//! ├── state/
//! │   ├── storefront.rs   ◄─── Storefront controller (cart, coupon, form, view)
//! │   └── config.rs       ◄─── ConfigState (TOML + env)
//! ├── commands/       ◄─── add_to_cart, apply_coupon, place_order, ...
//! ├── render.rs       ◄─── responses → text
//! ├── repl.rs         ◄─── stdin loop
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing(--log)          logs → stderr                          │
//! │  2. ConfigState::load(--config)  defaults → file → env                  │
//! │  3. Storefront::with_coupons     built-in menu + configured coupons     │
//! │  4. Repl::run(stdin, stdout)     until quit / EOF                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod repl;
pub mod state;

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use repl::Repl;
use state::{ConfigState, Storefront};

const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,storefront_lib=debug";

/// Runs an interactive session on stdin/stdout.
pub fn run(config_path: Option<&Path>) -> Result<(), ApiError> {
    let config = ConfigState::load(config_path)?;
    info!(
        store = %config.store_name,
        currency = %config.currency_code,
        coupons = config.coupons.len(),
        "Configuration loaded"
    );

    let store = Storefront::with_coupons(config.coupons.clone())?;
    info!("Starting {} storefront", config.store_name);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Repl::new(store, config)
        .run(stdin.lock(), stdout.lock())
        .map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `--log debug` or `RUST_LOG=debug` - Show debug messages
/// - Default: `info`, with `debug` for the storefront crates
///
/// Logs go to stderr so they never interleave with the storefront on stdout.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
