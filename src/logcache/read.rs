//! Log cache read requests and envelopes.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::client::validation::require_text;
use crate::doppler::ValueMetric;
use crate::error::{ClientError, RequestError, Result};

/// Kind of envelope to read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvelopeType {
    /// Application log lines.
    Log,
    /// Monotonic counters.
    Counter,
    /// Point-in-time gauges.
    Gauge,
    /// Request timers.
    Timer,
    /// Platform events.
    Event,
}

impl EnvelopeType {
    /// The wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "LOG",
            Self::Counter => "COUNTER",
            Self::Gauge => "GAUGE",
            Self::Timer => "TIMER",
            Self::Event => "EVENT",
        }
    }
}

/// Accepts an integer encoded either as a JSON number or a string, as
/// protobuf JSON encodes 64-bit values as strings.
fn lenient_int<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Base64 encoded payload.
    #[serde(default)]
    pub payload: String,
    /// Stream the line was written to (`OUT` or `ERR`).
    #[serde(default, rename = "type")]
    pub log_type: Option<String>,
}

impl Log {
    /// Decodes the payload as UTF-8 text, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn payload_text(&self) -> Result<String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|e| ClientError::invalid_response(format!("bad log payload: {e}")))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A single gauge reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GaugeValue {
    /// Unit of the reading.
    #[serde(default)]
    pub unit: String,
    /// The reading.
    #[serde(default)]
    pub value: f64,
}

/// A set of named gauge readings taken together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Readings keyed by metric name.
    #[serde(default)]
    pub metrics: HashMap<String, GaugeValue>,
}

/// A counter reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Counter name.
    pub name: String,
    /// Increment since the previous reading.
    #[serde(default, deserialize_with = "lenient_int")]
    pub delta: u64,
    /// Running total.
    #[serde(default, deserialize_with = "lenient_int")]
    pub total: u64,
}

/// A log cache envelope. Exactly one of the payload fields is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Nanoseconds since the epoch.
    #[serde(default, deserialize_with = "lenient_int")]
    pub timestamp: i64,
    /// Source, usually an application id.
    #[serde(default)]
    pub source_id: String,
    /// Instance index of the source.
    #[serde(default)]
    pub instance_id: String,
    /// Envelope tags.
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// Log payload.
    #[serde(default)]
    pub log: Option<Log>,
    /// Gauge payload.
    #[serde(default)]
    pub gauge: Option<Gauge>,
    /// Counter payload.
    #[serde(default)]
    pub counter: Option<Counter>,
}

impl Envelope {
    /// Returns the gauge readings of this envelope as value metrics,
    /// sorted by name.
    #[must_use]
    pub fn value_metrics(&self) -> Vec<ValueMetric> {
        let mut metrics: Vec<ValueMetric> = self
            .gauge
            .iter()
            .flat_map(|gauge| gauge.metrics.iter())
            .map(|(name, value)| ValueMetric::from_gauge(name, value))
            .collect();
        metrics.sort_by(|a, b| a.name().cmp(b.name()));
        metrics
    }
}

/// A batch of envelopes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeBatch {
    /// The envelopes, oldest first unless read descending.
    #[serde(default)]
    pub batch: Vec<Envelope>,
}

/// Response of a log cache read. Envelopes default to an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    /// The envelopes read.
    #[serde(default)]
    pub envelopes: EnvelopeBatch,
}

/// Request to read envelopes of one source from the log cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    source_id: String,
    start_time: Option<i64>,
    end_time: Option<i64>,
    limit: Option<u32>,
    envelope_types: Vec<EnvelopeType>,
    descending: bool,
}

impl ReadRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> ReadRequestBuilder {
        ReadRequestBuilder::default()
    }

    /// The source to read.
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start_time {
            query.push(("start_time", start.to_string()));
        }
        if let Some(end) = self.end_time {
            query.push(("end_time", end.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        for envelope_type in &self.envelope_types {
            query.push(("envelope_types", envelope_type.as_str().to_string()));
        }
        if self.descending {
            query.push(("descending", String::from("true")));
        }
        query
    }
}

/// Builder for [`ReadRequest`].
#[derive(Debug, Clone, Default)]
pub struct ReadRequestBuilder {
    source_id: Option<String>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    limit: Option<u32>,
    envelope_types: Vec<EnvelopeType>,
    descending: bool,
}

impl ReadRequestBuilder {
    /// Sets the source to read.
    #[must_use]
    pub fn source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    /// Sets the inclusive start, in nanoseconds since the epoch.
    #[must_use]
    pub const fn start_time(mut self, nanos: i64) -> Self {
        self.start_time = Some(nanos);
        self
    }

    /// Sets the exclusive end, in nanoseconds since the epoch.
    #[must_use]
    pub const fn end_time(mut self, nanos: i64) -> Self {
        self.end_time = Some(nanos);
        self
    }

    /// Caps the number of envelopes returned.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restricts the read to an envelope type.
    #[must_use]
    pub fn envelope_type(mut self, envelope_type: EnvelopeType) -> Self {
        self.envelope_types.push(envelope_type);
        self
    }

    /// Returns the newest envelopes first.
    #[must_use]
    pub const fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the source id is missing or the time range is
    /// inverted.
    pub fn build(self) -> std::result::Result<ReadRequest, RequestError> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(RequestError::conflict(
                    &["start time", "end time"],
                    "end time must not precede start time",
                ));
            }
        }

        Ok(ReadRequest {
            source_id: require_text(self.source_id, "source id")?,
            start_time: self.start_time,
            end_time: self.end_time,
            limit: self.limit,
            envelope_types: self.envelope_types,
            descending: self.descending,
        })
    }
}
