//! Request journal types returned by the `/__admin/requests` endpoints.
//!
//! These mirror the server's JSON loosely: every field is optional on the wire
//! and defaults when missing, so newer server versions keep deserializing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A header value as logged by the server: one string, or a list for repeated headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// The first value, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Multiple(values) => values.first().map(String::as_str),
        }
    }
}

pub type Headers = BTreeMap<String, HeaderValue>;

/// A query or form parameter with all of its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Param {
    pub key: String,
    pub values: Vec<String>,
}

pub type Params = BTreeMap<String, Param>;

/// A request as recorded in the journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggedRequest {
    pub url: String,
    pub absolute_url: String,
    pub method: String,
    pub client_ip: String,
    pub headers: Headers,
    pub cookies: BTreeMap<String, String>,
    pub browser_proxy_request: bool,
    pub logged_date: i64,
    pub body_as_base64: String,
    pub body: String,
    pub protocol: String,
    pub scheme: String,
    pub logged_date_string: String,
    pub host: String,
    pub port: i64,
    pub query_params: Params,
    pub form_params: Params,
}

/// The response definition that was selected for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseDefinition {
    pub headers: Headers,
    pub body: String,
    pub status: i64,
    pub from_configured_stub: bool,
}

/// The response actually sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggedResponse {
    pub headers: Headers,
    pub body_as_base64: String,
    pub body: String,
    pub status: i64,
}

/// Server-side timings in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    pub serve_time: i64,
    pub total_time: i64,
    pub process_time: i64,
    pub response_send_time: i64,
    pub added_delay: i64,
}

/// The request part of a stub mapping as echoed back by the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StubMappingRequest {
    pub method: String,
    pub url: String,
    pub url_pattern: String,
    pub url_path: String,
    pub url_path_pattern: String,
    pub url_path_template: String,
}

/// The stub mapping that served a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubMapping {
    pub id: String,
    pub uuid: String,
    pub name: String,
    pub request: StubMappingRequest,
    pub response: ResponseDefinition,
}

/// One journal entry: a received request and how it was handled.
///
/// Also the body of `GET /__admin/requests/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServeEvent {
    pub id: String,
    pub request: LoggedRequest,
    pub response_definition: ResponseDefinition,
    pub response: LoggedResponse,
    pub was_matched: bool,
    pub timing: Timing,
    pub stub_mapping: StubMapping,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub total: i64,
}

/// Body of `GET /__admin/requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetAllRequestsResponse {
    pub requests: Vec<ServeEvent>,
    pub meta: Meta,
    pub request_journal_disabled: bool,
}

/// Body of `POST /__admin/requests/find` and `GET /__admin/requests/unmatched`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindRequestsResponse {
    pub requests: Vec<LoggedRequest>,
}

/// Body of `POST /__admin/requests/remove`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteRequestsByCriteriaResponse {
    pub serve_events: Vec<ServeEvent>,
}

/// Body of `POST /__admin/requests/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountRequestsResponse {
    pub count: i64,
}
