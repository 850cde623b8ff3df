//! Stub mappings: the top-level object registered with the mock server.

use crate::matcher::Matcher;
use crate::multipart::MultipartPattern;
use crate::request::Request;
use crate::response::ResponseSpec;
use crate::url_matcher::UrlMatcher;
use crate::webhook::Webhook;
use crate::{Error, Result};
use http::Method;
use serde::ser::{Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::time::Duration;
use uuid::Uuid;

/// The state every scenario starts in.
pub const SCENARIO_STATE_STARTED: &str = "Started";

/// A stub mapping: a request matcher paired with a canned response.
///
/// Each rule gets a random UUID on creation; the client uses it to delete the
/// mapping again. Two rules are equal when their UUIDs are.
///
/// # Examples
///
/// ```
/// use wiremock_client::{post, url_path_equal_to, ok, matcher::equal_to};
///
/// let rule = post(url_path_equal_to("/example"))
///     .with_query_param("firstName", equal_to("John").or(equal_to("Jack")))
///     .will_return_response(ok());
///
/// let json = serde_json::to_value(&rule).unwrap();
/// assert_eq!(
///     json["request"]["queryParameters"]["firstName"],
///     serde_json::json!({"or": [{"equalTo": "John"}, {"equalTo": "Jack"}]})
/// );
/// assert_eq!(json["uuid"], rule.uuid());
/// ```
#[derive(Debug, Clone)]
pub struct StubRule {
    uuid: String,
    request: Request,
    response: ResponseSpec,
    fixed_delay_milliseconds: Option<Duration>,
    priority: Option<i64>,
    scenario_name: Option<String>,
    required_scenario_state: Option<String>,
    new_scenario_state: Option<String>,
    post_serve_actions: Vec<Webhook>,
}

/// A stub for `POST` requests.
pub fn post(url_matcher: UrlMatcher) -> StubRule {
    StubRule::new(Method::POST.as_str(), url_matcher)
}

/// A stub for `GET` requests.
pub fn get(url_matcher: UrlMatcher) -> StubRule {
    StubRule::new(Method::GET.as_str(), url_matcher)
}

/// A stub for `PUT` requests.
pub fn put(url_matcher: UrlMatcher) -> StubRule {
    StubRule::new(Method::PUT.as_str(), url_matcher)
}

/// A stub for `DELETE` requests.
pub fn delete(url_matcher: UrlMatcher) -> StubRule {
    StubRule::new(Method::DELETE.as_str(), url_matcher)
}

/// A stub for `PATCH` requests.
pub fn patch(url_matcher: UrlMatcher) -> StubRule {
    StubRule::new(Method::PATCH.as_str(), url_matcher)
}

impl StubRule {
    /// Creates a rule for any method name, including the server's `ANY`.
    pub fn new(method: impl Into<String>, url_matcher: UrlMatcher) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            request: Request::new(method, url_matcher),
            response: ResponseSpec::new(),
            fixed_delay_milliseconds: None,
            priority: None,
            scenario_name: None,
            required_scenario_state: None,
            new_scenario_state: None,
            post_serve_actions: Vec::new(),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The request matcher, usable as journal criteria for
    /// [`Client::verify`](crate::Client::verify).
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &ResponseSpec {
        &self.response
    }

    fn map_request(mut self, f: impl FnOnce(Request) -> Request) -> Self {
        self.request = f(self.request);
        self
    }

    fn map_response(mut self, f: impl FnOnce(ResponseSpec) -> ResponseSpec) -> Self {
        self.response = f(self.response);
        self
    }

    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        self.map_request(|r| r.with_scheme(scheme))
    }

    pub fn with_host(self, host: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_host(host))
    }

    pub fn with_port(self, port: u16) -> Self {
        self.map_request(|r| r.with_port(port))
    }

    pub fn with_query_param(self, param: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_query_param(param, matcher))
    }

    pub fn with_path_param(self, param: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_path_param(param, matcher))
    }

    pub fn with_form_param(self, param: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_form_param(param, matcher))
    }

    pub fn with_header(self, header: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_header(header, matcher))
    }

    pub fn with_cookie(self, cookie: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_cookie(cookie, matcher))
    }

    pub fn with_body_pattern(self, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_body_pattern(matcher))
    }

    pub fn with_multipart_pattern(self, pattern: MultipartPattern) -> Self {
        self.map_request(|r| r.with_multipart_pattern(pattern))
    }

    pub fn with_basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.map_request(|r| r.with_basic_auth(username, password))
    }

    /// See [`Request::with_bearer_token`].
    pub fn with_bearer_token(self, token: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_bearer_token(token))
    }

    /// See [`Request::with_auth_token`].
    pub fn with_auth_token(self, token: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_auth_token(token))
    }

    /// See [`Request::with_digest_auth`].
    pub fn with_digest_auth(self, matcher: impl Into<Matcher>) -> Self {
        self.map_request(|r| r.with_digest_auth(matcher))
    }

    /// Sets the response returned when the rule matches.
    pub fn will_return_response(mut self, response: ResponseSpec) -> Self {
        self.response = response;
        self
    }

    #[deprecated(note = "use `will_return_response` with `ResponseSpec::with_body`")]
    pub fn will_return<I, K, V>(self, body: impl Into<String>, headers: I, status: u16) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_response(|r| r.with_body(body).with_headers(headers).with_status(status))
    }

    #[deprecated(note = "use `will_return_response` with `ResponseSpec::with_binary_body`")]
    pub fn will_return_binary<I, K, V>(
        self,
        body: impl Into<Vec<u8>>,
        headers: I,
        status: u16,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_response(|r| {
            r.with_binary_body(body)
                .with_headers(headers)
                .with_status(status)
        })
    }

    #[deprecated(note = "use `will_return_response` with `ResponseSpec::with_body_file`")]
    pub fn will_return_file_content<I, K, V>(
        self,
        file_name: impl Into<String>,
        headers: I,
        status: u16,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_response(|r| {
            r.with_body_file(file_name)
                .with_headers(headers)
                .with_status(status)
        })
    }

    #[deprecated(note = "use `will_return_response` with `ResponseSpec::with_json_body`")]
    pub fn will_return_json<I, K, V>(
        self,
        json: impl Into<serde_json::Value>,
        headers: I,
        status: u16,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_response(|r| {
            r.with_json_body(json)
                .with_headers(headers)
                .with_status(status)
        })
    }

    /// Emits the legacy top-level `fixedDelayMilliseconds` response key.
    #[deprecated(note = "use `ResponseSpec::with_fixed_delay`")]
    pub fn with_fixed_delay_milliseconds(mut self, delay: Duration) -> Self {
        self.fixed_delay_milliseconds = Some(delay).filter(|d| d.as_millis() > 0);
        self
    }

    /// Higher priority stubs win when several match; 1 is the highest.
    pub fn at_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn in_scenario(mut self, scenario_name: impl Into<String>) -> Self {
        self.scenario_name = Some(scenario_name.into());
        self
    }

    pub fn when_scenario_state_is(mut self, state: impl Into<String>) -> Self {
        self.required_scenario_state = Some(state.into());
        self
    }

    pub fn will_set_state_to(mut self, state: impl Into<String>) -> Self {
        self.new_scenario_state = Some(state.into());
        self
    }

    /// Attaches a webhook under the given post-serve extension name.
    pub fn with_post_serve_action(
        mut self,
        extension_name: impl Into<String>,
        webhook: Webhook,
    ) -> Self {
        self.post_serve_actions.push(webhook.with_name(extension_name));
        self
    }

    /// Serializes the rule into the body expected by `POST /__admin/mappings`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if a JSON body set on the response
    /// cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SerializationFailed(e.to_string()))
    }
}

impl PartialEq for StubRule {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for StubRule {}

impl Hash for StubRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StubRuleWire<'a> {
    uuid: &'a str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_scenario_state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_scenario_state: Option<&'a str>,
    request: &'a Request,
    response: ResponseWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_serve_actions: Option<&'a [Webhook]>,
}

#[derive(serde::Serialize)]
struct ResponseWire<'a> {
    #[serde(flatten)]
    spec: &'a ResponseSpec,
    #[serde(rename = "fixedDelayMilliseconds", skip_serializing_if = "Option::is_none")]
    fixed_delay_milliseconds: Option<u64>,
}

impl Serialize for StubRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fixed_delay_milliseconds = self
            .fixed_delay_milliseconds
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        StubRuleWire {
            uuid: &self.uuid,
            id: &self.uuid,
            priority: self.priority,
            scenario_name: self.scenario_name.as_deref(),
            required_scenario_state: self.required_scenario_state.as_deref(),
            new_scenario_state: self.new_scenario_state.as_deref(),
            request: &self.request,
            response: ResponseWire {
                spec: &self.response,
                fixed_delay_milliseconds,
            },
            post_serve_actions: (!self.post_serve_actions.is_empty())
                .then_some(self.post_serve_actions.as_slice()),
        }
        .serialize(serializer)
    }
}
