//! CLI module for the `cf-ops` tool.
//!
//! This module provides the command-line interface over the operations
//! façade and the log cache.

mod commands;
mod output;

pub use commands::{Cli, Commands, EnvelopeKind, OutputFormat};
pub use output::OutputFormatter;
