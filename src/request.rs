//! The request half of a stub mapping.
//!
//! A [`Request`] is also what the journal endpoints take as search criteria.

use crate::matcher::{has_exactly, starts_with, Matcher};
use crate::multipart::MultipartPattern;
use crate::url_matcher::UrlMatcher;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

const AUTHORIZATION: &str = "Authorization";

/// Credentials for HTTP basic auth matching.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

/// Describes which incoming requests a stub (or journal query) applies to.
///
/// # Examples
///
/// ```
/// use wiremock_client::{Request, url_path_equal_to, matcher::{equal_to, absent}};
///
/// let request = Request::new("GET", url_path_equal_to("/users"))
///     .with_query_param("page", equal_to("2"))
///     .with_header("X-Debug", absent());
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["urlPath"], "/users");
/// assert_eq!(json["queryParameters"]["page"]["equalTo"], "2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: String,
    url_matcher: UrlMatcher,
    scheme: Option<String>,
    host: Option<Matcher>,
    port: Option<u16>,
    headers: BTreeMap<String, Matcher>,
    query_params: BTreeMap<String, Matcher>,
    path_params: BTreeMap<String, Matcher>,
    form_params: BTreeMap<String, Matcher>,
    cookies: BTreeMap<String, Matcher>,
    body_patterns: Vec<Matcher>,
    multipart_patterns: Vec<MultipartPattern>,
    basic_auth: Option<BasicAuthCredentials>,
}

impl Request {
    /// The smallest valid request: a method and a URL matcher.
    pub fn new(method: impl Into<String>, url_matcher: UrlMatcher) -> Self {
        Self {
            method: method.into(),
            url_matcher,
            scheme: None,
            host: None,
            port: None,
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            path_params: BTreeMap::new(),
            form_params: BTreeMap::new(),
            cookies: BTreeMap::new(),
            body_patterns: Vec::new(),
            multipart_patterns: Vec::new(),
            basic_auth: None,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url_matcher(&self) -> &UrlMatcher {
        &self.url_matcher
    }

    pub fn headers(&self) -> &BTreeMap<String, Matcher> {
        &self.headers
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_url_matched(mut self, url_matcher: UrlMatcher) -> Self {
        self.url_matcher = url_matcher;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<Matcher>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.headers.insert(header.into(), matcher.into());
        self
    }

    pub fn with_query_param(
        mut self,
        param: impl Into<String>,
        matcher: impl Into<Matcher>,
    ) -> Self {
        self.query_params.insert(param.into(), matcher.into());
        self
    }

    /// Matches a variable of a [`url_path_template`](crate::url_path_template).
    pub fn with_path_param(
        mut self,
        param: impl Into<String>,
        matcher: impl Into<Matcher>,
    ) -> Self {
        self.path_params.insert(param.into(), matcher.into());
        self
    }

    /// Matches a field of an `application/x-www-form-urlencoded` body.
    pub fn with_form_param(
        mut self,
        param: impl Into<String>,
        matcher: impl Into<Matcher>,
    ) -> Self {
        self.form_params.insert(param.into(), matcher.into());
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.cookies.insert(cookie.into(), matcher.into());
        self
    }

    pub fn with_body_pattern(mut self, matcher: impl Into<Matcher>) -> Self {
        self.body_patterns.push(matcher.into());
        self
    }

    pub fn with_multipart_pattern(mut self, pattern: MultipartPattern) -> Self {
        self.multipart_patterns.push(pattern);
        self
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some(BasicAuthCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Matches `Authorization: Bearer <token>` where `<token>` satisfies `token`.
    ///
    /// The resulting header matcher is `starts_with("Bearer ")` AND the prefixed token matcher.
    pub fn with_bearer_token(self, token: impl Into<Matcher>) -> Self {
        let prefix = "Bearer ";
        let matcher = token.into().with_prefix(prefix);
        self.with_header(AUTHORIZATION, starts_with(prefix).and(matcher))
    }

    /// Matches `Authorization: Token <token>` where `<token>` satisfies `token`.
    pub fn with_auth_token(self, token: impl Into<Matcher>) -> Self {
        self.with_prefixed_authorization("Token ", token.into())
    }

    /// Matches `Authorization: Digest <credentials>` where the credentials satisfy `matcher`.
    pub fn with_digest_auth(self, matcher: impl Into<Matcher>) -> Self {
        self.with_prefixed_authorization("Digest ", matcher.into())
    }

    fn with_prefixed_authorization(self, prefix: &str, matcher: Matcher) -> Self {
        let matcher = matcher.with_prefix(prefix);
        self.with_header(AUTHORIZATION, has_exactly([starts_with(prefix), matcher]))
    }
}

impl Serialize for Request {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("method", &self.method)?;
        map.serialize_entry(self.url_matcher.strategy().as_str(), self.url_matcher.value())?;
        if let Some(scheme) = &self.scheme {
            map.serialize_entry("scheme", scheme)?;
        }
        if let Some(host) = &self.host {
            map.serialize_entry("host", host)?;
        }
        if let Some(port) = &self.port {
            map.serialize_entry("port", port)?;
        }
        let params = [
            ("headers", &self.headers),
            ("queryParameters", &self.query_params),
            ("pathParameters", &self.path_params),
            ("formParameters", &self.form_params),
            ("cookies", &self.cookies),
        ];
        for (key, matchers) in params {
            if !matchers.is_empty() {
                map.serialize_entry(key, matchers)?;
            }
        }
        if !self.body_patterns.is_empty() {
            map.serialize_entry("bodyPatterns", &self.body_patterns)?;
        }
        if !self.multipart_patterns.is_empty() {
            map.serialize_entry("multipartPatterns", &self.multipart_patterns)?;
        }
        if let Some(credentials) = &self.basic_auth {
            map.serialize_entry("basicAuthCredentials", credentials)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{absent, contains, equal_to, matching, not};
    use crate::url_matcher::{url_path_equal_to, url_path_template};
    use serde_json::json;

    fn authorization(request: &Request) -> serde_json::Value {
        serde_json::to_value(request).unwrap()["headers"]["Authorization"].clone()
    }

    #[test]
    fn test_minimal_request_has_no_empty_blocks() {
        let request = Request::new("GET", url_path_equal_to("/ping"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"method": "GET", "urlPath": "/ping"})
        );
    }

    #[test]
    fn test_all_parameter_blocks() {
        let request = Request::new("POST", url_path_template("/contacts/{id}"))
            .with_scheme("https")
            .with_host(equal_to("example.com"))
            .with_port(8443)
            .with_path_param("id", equal_to("12"))
            .with_form_param("tos", equal_to("yes"))
            .with_cookie("session", absent())
            .with_basic_auth("user", "secret");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "POST",
                "urlPathTemplate": "/contacts/{id}",
                "scheme": "https",
                "host": {"equalTo": "example.com"},
                "port": 8443,
                "pathParameters": {"id": {"equalTo": "12"}},
                "formParameters": {"tos": {"equalTo": "yes"}},
                "cookies": {"session": {"absent": true}},
                "basicAuthCredentials": {"username": "user", "password": "secret"}
            })
        );
    }

    #[test]
    fn test_bearer_token_ands_with_prefix_check() {
        let request = Request::new("GET", url_path_equal_to("/"))
            .with_bearer_token(equal_to("token123"));
        assert_eq!(
            authorization(&request),
            json!({"and": [{"matches": "^Bearer "}, {"equalTo": "Bearer token123"}]})
        );
    }

    #[test]
    fn test_bearer_token_with_regex() {
        let request =
            Request::new("GET", url_path_equal_to("/")).with_bearer_token(matching("^\\w+$"));
        assert_eq!(
            authorization(&request),
            json!({"and": [{"matches": "^Bearer "}, {"matches": "^Bearer \\w+$"}]})
        );
    }

    #[test]
    fn test_auth_token_uses_has_exactly() {
        let request =
            Request::new("GET", url_path_equal_to("/")).with_auth_token(equal_to("x"));
        assert_eq!(
            authorization(&request),
            json!({"hasExactly": [{"matches": "^Token "}, {"equalTo": "Token x"}]})
        );
    }

    #[test]
    fn test_digest_auth_recurses_into_logical() {
        let request = Request::new("GET", url_path_equal_to("/"))
            .with_digest_auth(contains("realm").and(not(matching("nonce"))));
        assert_eq!(
            authorization(&request),
            json!({"hasExactly": [
                {"matches": "^Digest "},
                {"and": [{"contains": "realm"}, {"not": {"matches": "^Digest nonce"}}]}
            ]})
        );
    }
}
