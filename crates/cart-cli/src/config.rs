//! # CLI Configuration
//!
//! Configuration for the `cart` binary.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--discount`, `--format`, `--json`), parsed by clap
//! 2. Environment variables (`CART_*`)
//! 3. Defaults (this file)
//!
//! Log verbosity is not part of this struct; it comes from `RUST_LOG` and is
//! handled by the tracing subscriber in `main`.

use std::env;
use std::ffi::OsString;
use std::fmt;

use cart_core::DiscountRate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Environment variable holding the percentage discount, e.g. `10` or `12.5`.
pub const ENV_DISCOUNT_PERCENT: &str = "CART_DISCOUNT_PERCENT";

/// Environment variable selecting the output format (`text` or `json`).
pub const ENV_OUTPUT: &str = "CART_OUTPUT";

/// Discount applied by the session when nothing is configured.
pub const DEFAULT_DISCOUNT_BPS: u32 = 1000;

const ENV_HELP: &str = "\
Environment:
  CART_DISCOUNT_PERCENT  Same as --discount
  CART_OUTPUT            Same as --format
  RUST_LOG               Log filter (default: info), logs go to stderr";

// =============================================================================
// Output Format
// =============================================================================

/// How session results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Receipt text per step
    #[default]
    Text,
    /// Pretty-printed JSON array of cart snapshots
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

// =============================================================================
// Command Line
// =============================================================================

/// Command line flags. Every flag is optional so unset ones fall back to
/// the environment.
#[derive(Debug, Parser)]
#[command(name = "cart", version)]
#[command(about = "Replays a shopping cart session and prints a receipt after every step")]
#[command(after_help = ENV_HELP)]
pub struct Args {
    /// Percentage discount to apply, e.g. 10 or 12.5 [default: 10]
    #[arg(short, long, value_name = "PERCENT", value_parser = parse_rate_arg)]
    pub discount: Option<DiscountRate>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,
}

fn parse_rate_arg(value: &str) -> Result<DiscountRate, String> {
    DiscountRate::parse_percent(value).map_err(|e| e.to_string())
}

// =============================================================================
// CLI Config
// =============================================================================

/// Resolved configuration for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Discount used for the "apply discount" step.
    pub discount_rate: DiscountRate,

    /// Output format for stdout.
    pub output: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            discount_rate: DiscountRate::from_bps(DEFAULT_DISCOUNT_BPS),
            output: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    /// Load configuration from the process arguments and environment.
    ///
    /// Exits the process for `--help`, `--version` and argument errors,
    /// the same way `clap::Parser::parse` does.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(Args::parse(), |key| env::var(key).ok())
    }

    /// Load configuration from an explicit argument list (including the
    /// program name) and variable lookup.
    pub fn load_from<F, I, T>(lookup: F, args: I) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;
        Self::resolve(args, lookup)
    }

    fn resolve<F>(args: Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(value) = lookup(ENV_DISCOUNT_PERCENT) {
            config.discount_rate =
                DiscountRate::parse_percent(&value).map_err(|e| ConfigError::InvalidValue {
                    key: ENV_DISCOUNT_PERCENT.to_string(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(value) = lookup(ENV_OUTPUT) {
            config.output = OutputFormat::from_str(value.trim(), true).map_err(|_| {
                ConfigError::InvalidValue {
                    key: ENV_OUTPUT.to_string(),
                    reason: format!("expected text or json, got '{}'", value),
                }
            })?;
        }

        if let Some(rate) = args.discount {
            config.discount_rate = rate;
        }

        if args.json {
            config.output = OutputFormat::Json;
        } else if let Some(format) = args.format {
            config.output = format;
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error(transparent)]
    Args(#[from] clap::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], args: &[&str]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let argv = std::iter::once("cart").chain(args.iter().copied());
        CliConfig::load_from(|key| vars.get(key).cloned(), argv)
    }

    fn arg_error_kind(result: Result<CliConfig, ConfigError>) -> Option<ErrorKind> {
        match result {
            Err(ConfigError::Args(e)) => Some(e.kind()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = load(&[], &[]).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.discount_rate.bps(), 1000);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_env_vars() {
        let config = load(&[(ENV_DISCOUNT_PERCENT, "12.5"), (ENV_OUTPUT, "JSON")], &[]).unwrap();
        assert_eq!(config.discount_rate.bps(), 1250);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_args_override_env() {
        let config = load(
            &[(ENV_DISCOUNT_PERCENT, "12.5"), (ENV_OUTPUT, "json")],
            &["--discount", "25", "-f", "text"],
        )
        .unwrap();
        assert_eq!(config.discount_rate.bps(), 2500);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_json_flag() {
        let config = load(&[(ENV_OUTPUT, "text")], &["--json"]).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = load(&[(ENV_DISCOUNT_PERCENT, "lots")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_DISCOUNT_PERCENT));

        let err = load(&[(ENV_OUTPUT, "yaml")], &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for CART_OUTPUT: expected text or json, got 'yaml'"
        );
    }

    #[test]
    fn test_discount_over_100_rejected() {
        assert_eq!(
            arg_error_kind(load(&[], &["-d", "120"])),
            Some(ErrorKind::ValueValidation)
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert!(arg_error_kind(load(&[], &["--discount"])).is_some());
        assert_eq!(
            arg_error_kind(load(&[], &["--verbose"])),
            Some(ErrorKind::UnknownArgument)
        );
        assert_eq!(
            arg_error_kind(load(&[], &["--format", "yaml"])),
            Some(ErrorKind::InvalidValue)
        );
        assert_eq!(
            arg_error_kind(load(&[], &["--json", "--format", "text"])),
            Some(ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn test_help_mentions_environment() {
        let err = Args::try_parse_from(["cart", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains(ENV_DISCOUNT_PERCENT));
    }
}
