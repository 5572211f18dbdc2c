//! # cart-cli
//!
//! Library half of the `cart` binary: configuration loading and the
//! scripted session. Kept separate from `main.rs` so both are testable
//! without spawning a process.

pub mod config;
pub mod session;

pub use config::{CliConfig, ConfigError, OutputFormat};
pub use session::{render_steps, run_session, Step};
