//! CLI argument definitions for fundwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Fetch estimates and notify every configured channel |
//! | `quote` | Fetch estimates and print them as JSON |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--codes` | `$FOUND_CODES` or sample set | Comma-separated fund codes |
//! | `--timeout-secs` | `120` | Deadline for the whole run |
//! | `--concurrency` | `3` | Maximum requests in flight |
//!
//! # Examples
//!
//! ```bash
//! # Notify with default thresholds
//! fundwatch run
//!
//! # Print the digest instead of sending it
//! fundwatch run --codes 180012,003095 --dry-run
//!
//! # Raw estimates
//! fundwatch quote --pretty
//! ```

use clap::{Args, Parser, Subcommand};
use fundwatch_core::DEFAULT_MAX_CONCURRENCY;
use rust_decimal::Decimal;

/// Mutual fund intraday valuation watcher.
///
/// Channels are configured through the environment: SMTP_HOST, EMAIL_NAME,
/// EMAIL_PASSWORD and EMAIL_TO for email, SCKEY for ServerChan.
#[derive(Debug, Parser)]
#[command(
    name = "fundwatch",
    author,
    version,
    about = "Mutual fund valuation watcher with email and ServerChan notifications"
)]
pub struct Cli {
    /// Comma-separated fund codes. Overrides FOUND_CODES.
    #[arg(long, global = true)]
    pub codes: Option<String>,

    /// Deadline for the whole run, in seconds.
    #[arg(long, global = true, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Maximum number of upstream requests in flight.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch estimates and send them to every configured channel.
    ///
    /// # Examples
    ///
    ///   fundwatch run
    ///   fundwatch run --min-rise 2 --max-fall -1.5
    ///   fundwatch run --dry-run
    Run(RunArgs),

    /// Fetch estimates and print them as JSON, without notifying.
    Quote(QuoteArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Growth percentage at or above which a fund counts as rising.
    #[arg(long, default_value = "1")]
    pub min_rise: Decimal,

    /// Growth percentage at or below which a fund counts as falling (negative).
    #[arg(long, default_value = "-0.8", allow_negative_numbers = true)]
    pub max_fall: Decimal,

    /// Print the rendered digest to stdout instead of delivering it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
