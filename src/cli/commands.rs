//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logcache::EnvelopeType;

/// cf-ops - Cloud Foundry operations from the command line.
#[derive(Parser, Debug)]
#[command(name = "cf-ops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "CF_OPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Bind a service instance to an application.
    Bind {
        /// Application name.
        application: String,

        /// Service instance name.
        service_instance: String,

        /// Binding parameter as KEY=VALUE; values are parsed as JSON when possible.
        #[arg(short, long = "parameter", value_parser = parse_parameter)]
        parameters: Vec<(String, serde_json::Value)>,
    },

    /// Unbind a service instance from an application.
    Unbind {
        /// Application name.
        application: String,

        /// Service instance name.
        service_instance: String,
    },

    /// List the service instances of the targeted space.
    Services,

    /// Delete a route.
    DeleteRoute {
        /// Domain of the route.
        domain: String,

        /// Host name.
        #[arg(long, conflicts_with = "port")]
        host: Option<String>,

        /// Route path, including the leading slash.
        #[arg(long, conflicts_with = "port")]
        path: Option<String>,

        /// Port of a TCP route.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Cancel a running application task.
    TerminateTask {
        /// Application name.
        application: String,

        /// Task sequence id.
        sequence_id: u32,
    },

    /// Show a feature flag.
    FeatureFlag {
        /// Feature flag name.
        name: String,
    },

    /// Read recent envelopes from the log cache.
    Logs {
        /// Source id, usually an application GUID.
        source_id: String,

        /// Number of envelopes to read.
        #[arg(short, long, default_value = "100")]
        limit: u32,

        /// Envelope types to read (repeatable).
        #[arg(short = 't', long = "type")]
        types: Vec<EnvelopeKind>,

        /// Only envelopes at or after this time (nanoseconds since the epoch).
        #[arg(long)]
        start_time: Option<i64>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Envelope types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EnvelopeKind {
    /// Application and platform logs.
    Log,
    /// Counters.
    Counter,
    /// Gauges.
    Gauge,
    /// HTTP timers.
    Timer,
    /// Events.
    Event,
}

impl From<EnvelopeKind> for EnvelopeType {
    fn from(kind: EnvelopeKind) -> Self {
        match kind {
            EnvelopeKind::Log => Self::Log,
            EnvelopeKind::Counter => Self::Counter,
            EnvelopeKind::Gauge => Self::Gauge,
            EnvelopeKind::Timer => Self::Timer,
            EnvelopeKind::Event => Self::Event,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses `KEY=VALUE`, keeping VALUE as a string unless it is valid JSON.
fn parse_parameter(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
