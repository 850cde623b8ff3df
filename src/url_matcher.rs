//! URL matchers. A request block carries exactly one.

use crate::matching::UrlMatchingStrategy;

/// How a stub matches the request URL.
///
/// Serialized by the request block under the strategy's own key, e.g.
/// `{"urlPath": "/example"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatcher {
    strategy: UrlMatchingStrategy,
    value: String,
}

impl UrlMatcher {
    pub fn new(strategy: UrlMatchingStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn strategy(&self) -> UrlMatchingStrategy {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Exact match on path and query string.
pub fn url_equal_to(url: impl Into<String>) -> UrlMatcher {
    UrlMatcher::new(UrlMatchingStrategy::EqualTo, url)
}

/// Exact match on the path, ignoring the query string.
pub fn url_path_equal_to(path: impl Into<String>) -> UrlMatcher {
    UrlMatcher::new(UrlMatchingStrategy::PathEqualTo, path)
}

/// Regex match on the path.
pub fn url_path_matching(pattern: impl Into<String>) -> UrlMatcher {
    UrlMatcher::new(UrlMatchingStrategy::PathMatching, pattern)
}

/// Regex match on path and query string.
pub fn url_matching(pattern: impl Into<String>) -> UrlMatcher {
    UrlMatcher::new(UrlMatchingStrategy::Matching, pattern)
}

/// Path template such as `/contacts/{contactId}`; pair with
/// [`Request::with_path_param`](crate::Request::with_path_param).
pub fn url_path_template(template: impl Into<String>) -> UrlMatcher {
    UrlMatcher::new(UrlMatchingStrategy::PathTemplate, template)
}
