//! # cart
//!
//! Replays a shopping cart session and prints a receipt after every step.
//!
//! ## Usage
//! ```bash
//! # Text receipts, 10% discount (default)
//! cargo run -p cart-cli
//!
//! # 25% discount, JSON snapshots
//! cargo run -p cart-cli -- --discount 25 --json
//!
//! # Flags and environment variables
//! cargo run -p cart-cli -- --help
//!
//! # Debug logging on stderr
//! RUST_LOG=debug cargo run -p cart-cli
//! ```

use cart_cli::{render_steps, run_session, CliConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = CliConfig::load()?;

    info!(
        discount = %config.discount_rate,
        output = %config.output,
        "Configuration loaded"
    );

    let steps = run_session(&config)?;
    println!("{}", render_steps(&steps, config.output)?);

    info!(steps = steps.len(), "Session complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every cart mutation
/// - `RUST_LOG=cart_cli=trace` - Trace for this crate only
/// - Default: INFO level
///
/// Logs go to stderr so stdout carries only receipts / JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
