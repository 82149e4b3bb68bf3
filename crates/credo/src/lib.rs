//! Credo command-line tool
//!
//! Loads credibility statements from files in the `(source,target,reporter)`
//! list syntax, runs one revision operation with `credo-core`, and prints the
//! resulting knowledge base as text or JSON.

pub mod commands;
pub mod config;
pub mod error;
pub mod tracing;

pub use commands::{run, run_with, Command, Report};
pub use config::{Cli, CliConfig, OutputFormat};
pub use error::{Error, Result};
