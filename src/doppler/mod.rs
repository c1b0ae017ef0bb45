//! Doppler value metrics.

use serde::Serialize;

use crate::client::validation::{require, require_text};
use crate::error::RequestError;
use crate::logcache::GaugeValue;

/// A named measurement with a unit, as emitted by the loggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueMetric {
    name: String,
    unit: String,
    value: f64,
}

impl ValueMetric {
    /// Starts building a value metric.
    #[must_use]
    pub fn builder() -> ValueMetricBuilder {
        ValueMetricBuilder::default()
    }

    /// Converts a gauge reading into a value metric.
    #[must_use]
    pub fn from_gauge(name: &str, gauge: &GaugeValue) -> Self {
        Self {
            name: name.to_string(),
            unit: gauge.unit.clone(),
            value: gauge.value,
        }
    }

    /// Metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metric unit.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

/// Builder for [`ValueMetric`].
#[derive(Debug, Clone, Default)]
pub struct ValueMetricBuilder {
    name: Option<String>,
    unit: Option<String>,
    value: Option<f64>,
}

impl ValueMetricBuilder {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the unit.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the value.
    #[must_use]
    pub const fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Validates and builds the metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, unit or value is missing.
    pub fn build(self) -> Result<ValueMetric, RequestError> {
        Ok(ValueMetric {
            name: require_text(self.name, "name")?,
            unit: require_text(self.unit, "unit")?,
            value: require(self.value, "value")?,
        })
    }
}
