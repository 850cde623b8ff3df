use super::response::ResponseBuilder;
use crate::matcher::{equal_to_json, Matcher};
use crate::{post, url_path_equal_to, Error, Result, StubRule};
use serde::Serialize;

/// Builds a stub for one gRPC method; the service name is supplied at [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct StubRuleBuilder {
    method: String,
    response: Option<ResponseBuilder>,
    body_patterns: Vec<Matcher>,
}

/// Starts a stub for the gRPC method `name`.
pub fn method(name: impl Into<String>) -> StubRuleBuilder {
    StubRuleBuilder {
        method: name.into(),
        response: None,
        body_patterns: Vec::new(),
    }
}

/// Matches a request message equal to `message` once serialized to JSON.
///
/// # Errors
///
/// Returns [`Error::InvalidMatcher`] if `message` cannot be serialized.
pub fn equal_to_message<T: Serialize + ?Sized>(message: &T) -> Result<Matcher> {
    let json = serde_json::to_string(message)
        .map_err(|e| Error::InvalidMatcher(format!("gRPC message: {}", e)))?;
    Ok(equal_to_json(json, &[]))
}

impl StubRuleBuilder {
    pub fn with_request_message(mut self, matcher: impl Into<Matcher>) -> Self {
        self.body_patterns.push(matcher.into());
        self
    }

    pub fn will_return(mut self, response: ResponseBuilder) -> Self {
        self.response = Some(response);
        self
    }

    /// Produces a `POST /{service}/{method}` stub. Without a response the stub
    /// answers `OK` with an empty message.
    pub fn build(self, service_name: &str) -> StubRule {
        let rule = post(url_path_equal_to(format!(
            "/{}/{}",
            service_name, self.method
        )));

        let rule = self
            .body_patterns
            .into_iter()
            .fold(rule, |rule, pattern| rule.with_body_pattern(pattern));

        let response = self.response.unwrap_or_else(|| ResponseBuilder::json(""));
        rule.will_return_response(response.build())
    }
}
