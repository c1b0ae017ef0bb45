//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use chrono::DateTime;
use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::client::v2::FeatureFlag;
use crate::config::{OpsConfig, ValidationResult};
use crate::logcache::Envelope;
use crate::operations::ServiceInstance;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Service instance row for table display.
#[derive(Tabled)]
struct ServiceInstanceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Bound apps")]
    applications: String,
    #[tabled(rename = "Last operation")]
    last_operation: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the service instances of a space.
    #[must_use]
    pub fn format_service_instances(&self, instances: &[ServiceInstance]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(instances).unwrap_or_default(),
            OutputFormat::Text => Self::format_service_instances_text(instances),
        }
    }

    fn format_service_instances_text(instances: &[ServiceInstance]) -> String {
        if instances.is_empty() {
            return String::from("No services found.\n");
        }

        let rows: Vec<ServiceInstanceRow> = instances
            .iter()
            .map(|instance| ServiceInstanceRow {
                name: instance.name.clone(),
                service: instance
                    .service
                    .clone()
                    .unwrap_or_else(|| instance.instance_type.to_string()),
                plan: instance.plan.clone().unwrap_or_default(),
                applications: Self::truncate(&instance.applications.join(", "), 40),
                last_operation: instance
                    .last_operation
                    .as_deref()
                    .map(Self::format_last_operation)
                    .unwrap_or_default(),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        output.push('\n');
        output
    }

    /// Formats a feature flag.
    #[must_use]
    pub fn format_feature_flag(&self, flag: &FeatureFlag) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(flag).unwrap_or_default(),
            OutputFormat::Text => {
                let state = if flag.enabled {
                    "enabled".green()
                } else {
                    "disabled".red()
                };
                let mut output = format!("{}: {state}\n", flag.name);
                if let Some(message) = &flag.error_message {
                    let _ = writeln!(output, "   Error message: {message}");
                }
                output
            }
        }
    }

    /// Formats log cache envelopes, oldest first.
    #[must_use]
    pub fn format_envelopes(&self, envelopes: &[Envelope]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(envelopes).unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = String::new();
                for envelope in envelopes {
                    let timestamp = DateTime::from_timestamp_nanos(envelope.timestamp)
                        .format("%Y-%m-%dT%H:%M:%S%.3fZ");
                    let prefix = format!("{timestamp} [{}]", envelope.instance_id).dimmed();

                    if let Some(log) = &envelope.log {
                        let text = log
                            .payload_text()
                            .unwrap_or_else(|_| String::from("<undecodable payload>"));
                        let line = if log.log_type.as_deref() == Some("ERR") {
                            text.red().to_string()
                        } else {
                            text
                        };
                        let _ = writeln!(output, "{prefix} {line}");
                    }
                    for metric in envelope.value_metrics() {
                        let _ = writeln!(
                            output,
                            "{prefix} {} = {} {}",
                            metric.name().cyan(),
                            metric.value(),
                            metric.unit()
                        );
                    }
                    if let Some(counter) = &envelope.counter {
                        let _ = writeln!(
                            output,
                            "{prefix} {} total={} delta={}",
                            counter.name.cyan(),
                            counter.total,
                            counter.delta
                        );
                    }
                }
                if output.is_empty() {
                    output.push_str("No envelopes found.\n");
                }
                output
            }
        }
    }

    /// Formats the outcome of `validate`.
    #[must_use]
    pub fn format_validation(
        &self,
        config: &OpsConfig,
        result: &ValidationResult,
        show_warnings: bool,
    ) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": result.is_valid(),
                    "warnings": result.warnings,
                    "config": config,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = format!("{} Configuration is valid!\n", "✓".green());
                if show_warnings && !result.warnings.is_empty() {
                    let _ = write!(output, "\n{} Warnings:\n", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                output.push_str("\nConfiguration summary:\n");
                let _ = writeln!(output, "   API: {}", config.api.url);
                let _ = writeln!(
                    output,
                    "   Organization: {}",
                    config.target.organization.as_deref().unwrap_or("-")
                );
                let _ = writeln!(
                    output,
                    "   Space: {}",
                    config
                        .target
                        .space
                        .as_deref()
                        .or(config.target.space_id.as_deref())
                        .unwrap_or("-")
                );
                output
            }
        }
    }

    /// Formats a completed action.
    #[must_use]
    pub fn format_success(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "status": "success", "message": message });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => format!("{} {message}\n", "✓".green()),
        }
    }

    /// Colors a `"<type> <state>"` operation by its state.
    fn format_last_operation(operation: &str) -> String {
        if operation.ends_with("succeeded") {
            operation.green().to_string()
        } else if operation.ends_with("failed") {
            operation.red().to_string()
        } else {
            operation.yellow().to_string()
        }
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{head}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::v2::ServiceInstanceType;

    fn instance() -> ServiceInstance {
        ServiceInstance {
            id: String::from("test-service-instance-id"),
            name: String::from("test-service-instance-name"),
            instance_type: ServiceInstanceType::Managed,
            applications: vec![String::from("test-application-name")],
            plan: Some(String::from("test-service-plan")),
            service: Some(String::from("test-service-label")),
            last_operation: Some(String::from("create succeeded")),
        }
    }

    #[test]
    fn test_service_instances_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_service_instances(&[instance()]);
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value[0]["name"], "test-service-instance-name");
        assert_eq!(value[0]["type"], "managed");
        assert_eq!(value[0]["applications"][0], "test-application-name");
    }

    #[test]
    fn test_service_instances_text() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_service_instances(&[instance()]);
        assert!(output.contains("test-service-instance-name"));
        assert!(output.contains("test-service-label"));
        assert!(output.contains("create succeeded"));

        assert_eq!(formatter.format_service_instances(&[]), "No services found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("a-much-longer-value", 10), "a-much-...");
    }
}
