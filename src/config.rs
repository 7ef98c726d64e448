//! Configuration
//!
//! Command line and environment settings shared by the demo binaries.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::cart::{DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE, ShippingPolicy};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Shipping settings, in won.
#[derive(Debug, Clone, Copy, Args)]
pub struct ShippingArgs {
    /// Cart total at which shipping becomes free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = DEFAULT_FREE_SHIPPING_THRESHOLD)]
    pub free_shipping_threshold: i64,

    /// Flat shipping fee below the threshold
    #[arg(long, env = "SHIPPING_FEE", default_value_t = DEFAULT_SHIPPING_FEE)]
    pub shipping_fee: i64,
}

impl ShippingArgs {
    /// Shipping policy for these settings
    #[must_use]
    pub fn policy(&self) -> ShippingPolicy {
        ShippingPolicy::won(self.free_shipping_threshold, self.shipping_fee)
    }
}

/// Settings common to every demo.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to load walkers, products & service settings from
    #[arg(short, long, env = "PAWPATH_FIXTURE", default_value = "default")]
    pub fixture: String,

    /// Directory holding the fixture sets
    #[arg(long, env = "PAWPATH_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Shipping settings.
    #[command(flatten)]
    pub shipping: ShippingArgs,
}

impl DemoArgs {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
