//! Command-line configuration for the vanity search binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crypto::{AddressFormat, ADDRESS_HEX_LEN};
use crate::matcher::{Pattern, PatternError};
use crate::search::RunConfig;

/// Vanity address search: find addresses containing a pattern anywhere
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Pattern to search for anywhere in the address (hex characters only)
    #[arg(short, long)]
    pub pattern: String,

    /// Case sensitive matching against the checksummed address
    #[arg(short = 'c', long, default_value = "false")]
    pub case_sensitive: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Stop after finding N addresses (0 = run until Ctrl+C)
    #[arg(short = 'n', long, default_value = "0")]
    pub max_hits: u64,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "2")]
    pub report_interval: u64,

    /// Do not print throughput statistics
    #[arg(long, default_value = "false")]
    pub no_stats: bool,

    /// File that matches are appended to
    #[arg(short = 'o', long, default_value = "matches.txt")]
    pub output: PathBuf,

    /// Address form to search in
    #[arg(short = 'f', long, value_enum, default_value_t = AddressFormat::Checksum)]
    pub format: AddressFormat,

    /// Enable debug logs (RUST_LOG overrides)
    #[arg(short = 'd', long, default_value = "false")]
    pub debug: bool,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    pub fn show_stats(&self) -> bool {
        !self.no_stats
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::Pattern(PatternError::Empty));
        }

        if !self.pattern.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidPattern(
                "Pattern must contain only hex characters (0-9, a-f, A-F)".into(),
            ));
        }

        if self.pattern.len() > ADDRESS_HEX_LEN {
            return Err(ConfigError::InvalidPattern(format!(
                "Pattern cannot be longer than {} characters (full address)",
                ADDRESS_HEX_LEN
            )));
        }

        if self.case_sensitive
            && !self.format.has_uppercase()
            && self.pattern.chars().any(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::InvalidPattern(format!(
                "Uppercase pattern can never match {} addresses case-sensitively",
                self.format
            )));
        }

        if self.show_stats() && self.report_interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        Ok(())
    }

    /// Validates and freezes the search parameters.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        self.validate()?;
        let pattern = Pattern::new(self.pattern.clone(), self.case_sensitive)?;
        Ok(RunConfig::from_pattern(
            pattern,
            self.worker_count(),
            self.max_hits,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Report interval must be at least 1 second")]
    InvalidInterval,
}
