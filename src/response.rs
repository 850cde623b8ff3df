//! The response half of a stub mapping.
//!
//! [`ResponseSpec`] describes what the mock server sends back once a request
//! matched: status, headers, one kind of body, and optional latency or faults.

use crate::delay::{ChunkedDribbleDelay, DelayDistribution};
use crate::{Error, Result};
use base64::Engine;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// A simulated network failure instead of a well-formed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fault {
    EmptyResponse,
    MalformedResponseChunk,
    RandomDataThenClose,
    ConnectionResetByPeer,
}

/// The response a stub returns.
///
/// Only one body is ever sent. If several were set, the first present in the order
/// literal body, binary body, body file, JSON body wins. An empty binary body
/// counts as unset.
///
/// # Examples
///
/// ```
/// use wiremock_client::{ResponseSpec, Fault};
/// use std::time::Duration;
///
/// let response = ResponseSpec::new()
///     .with_status(400)
///     .with_header("Content-Type", "application/json")
///     .with_body(r#"{"code": 400}"#)
///     .with_fixed_delay(Duration::from_millis(250));
///
/// let broken = ResponseSpec::new().with_fault(Fault::ConnectionResetByPeer);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    status: u16,
    body: Option<String>,
    base64_body: Option<Vec<u8>>,
    body_file_name: Option<String>,
    json_body: Option<serde_json::Value>,
    headers: BTreeMap<String, String>,
    delay_distribution: Option<DelayDistribution>,
    chunked_dribble_delay: Option<ChunkedDribbleDelay>,
    fault: Option<Fault>,
    transformers: Vec<String>,
    transformer_parameters: BTreeMap<String, String>,
}

/// A `200 OK` response with no body.
pub fn ok() -> ResponseSpec {
    ResponseSpec::new()
}

impl ResponseSpec {
    /// Creates a `200 OK` response with no body.
    pub fn new() -> Self {
        Self {
            status: 200,
            body: None,
            base64_body: None,
            body_file_name: None,
            json_body: None,
            headers: BTreeMap::new(),
            delay_distribution: None,
            chunked_dribble_delay: None,
            fault: None,
            transformers: Vec::new(),
            transformer_parameters: BTreeMap::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replaces all headers.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sends raw bytes; serialized base64-encoded.
    pub fn with_binary_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.base64_body = Some(body.into());
        self
    }

    /// Sends a file from the server's `__files` directory.
    pub fn with_body_file(mut self, file_name: impl Into<String>) -> Self {
        self.body_file_name = Some(file_name.into());
        self
    }

    pub fn with_json_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.json_body = Some(body.into());
        self
    }

    /// Serializes `body` and uses it as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if `body` cannot be represented as JSON.
    pub fn try_with_json_body<T: serde::Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        Ok(self.with_json_body(value))
    }

    pub fn with_delay(mut self, delay: DelayDistribution) -> Self {
        self.delay_distribution = Some(delay);
        self
    }

    pub fn with_fixed_delay(self, delay: Duration) -> Self {
        self.with_delay(DelayDistribution::fixed(delay))
    }

    pub fn with_log_normal_random_delay(self, median: Duration, sigma: f64) -> Self {
        self.with_delay(DelayDistribution::log_normal(median, sigma))
    }

    pub fn with_uniform_random_delay(self, lower: Duration, upper: Duration) -> Self {
        self.with_delay(DelayDistribution::uniform(lower, upper))
    }

    pub fn with_chunked_dribble_delay(mut self, number_of_chunks: u32, total: Duration) -> Self {
        self.chunked_dribble_delay = Some(ChunkedDribbleDelay::new(number_of_chunks, total));
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Names the response transformers the server should apply, e.g. `response-template`.
    pub fn with_transformers<I, S>(mut self, transformers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transformers = transformers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_transformer_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.transformer_parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces all transformer parameters.
    pub fn with_transformer_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.transformer_parameters = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ResponseSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", &self.status)?;

        if let Some(body) = &self.body {
            map.serialize_entry("body", body)?;
        } else if let Some(bytes) = self.base64_body.as_ref().filter(|b| !b.is_empty()) {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            map.serialize_entry("base64Body", &encoded)?;
        } else if let Some(file_name) = &self.body_file_name {
            map.serialize_entry("bodyFileName", file_name)?;
        } else if let Some(json) = &self.json_body {
            map.serialize_entry("jsonBody", json)?;
        }

        if !self.headers.is_empty() {
            map.serialize_entry("headers", &self.headers)?;
        }
        if let Some(delay) = &self.delay_distribution {
            map.serialize_entry("delayDistribution", delay)?;
        }
        if let Some(dribble) = &self.chunked_dribble_delay {
            map.serialize_entry("chunkedDribbleDelay", dribble)?;
        }
        if let Some(fault) = &self.fault {
            map.serialize_entry("fault", fault)?;
        }
        if !self.transformers.is_empty() {
            map.serialize_entry("transformers", &self.transformers)?;
        }
        if !self.transformer_parameters.is_empty() {
            map.serialize_entry("transformerParameters", &self.transformer_parameters)?;
        }
        map.end()
    }
}
