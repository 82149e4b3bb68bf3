//! Command-line arguments and the configuration derived from them

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use credo_core::MatrixConfig;
use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "credo")]
#[command(about = "Belief revision over credibility statements")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Rows preallocated by the matrix engine
    #[arg(
        long,
        global = true,
        default_value_t = MatrixConfig::default().initial_size,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MatrixConfig::MAX_INITIAL_SIZE as u64)
    )]
    pub matrix_size: usize,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> CliConfig {
        CliConfig {
            log_level: self.log_level.clone(),
            format: self.format,
            matrix: MatrixConfig {
                initial_size: self.matrix_size,
            },
        }
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    pub format: OutputFormat,
    pub matrix: MatrixConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: OutputFormat::default(),
            matrix: MatrixConfig::default(),
        }
    }
}

impl CliConfig {
    /// Default tracing filter: the chosen level for both credo crates.
    pub fn log_filter(&self) -> String {
        format!("credo={level},credo_core={level}", level = self.log_level)
    }
}
