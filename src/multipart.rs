//! Matching of individual parts in a `multipart/*` request body.

use crate::matcher::{contains, Matcher};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether any part or every part must satisfy a [`MultipartPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MultipartMatchingType {
    #[default]
    Any,
    All,
}

/// A matcher for parts of a multipart request body.
///
/// # Examples
///
/// ```
/// use wiremock_client::{MultipartPattern, matcher::{contains, equal_to_json}};
///
/// let pattern = MultipartPattern::new()
///     .with_name("info")
///     .with_header("Content-Type", contains("charset"))
///     .with_body_pattern(equal_to_json("{}", &[]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipartPattern {
    matching_type: MultipartMatchingType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, Matcher>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    body_patterns: Vec<Matcher>,
}

impl MultipartPattern {
    /// Creates an empty pattern matching `ANY` part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches the part whose `Content-Disposition` names it `name`.
    pub fn with_name(self, name: &str) -> Self {
        self.with_header("Content-Disposition", contains(format!("name=\"{name}\"")))
    }

    pub fn with_matching_type(mut self, matching_type: MultipartMatchingType) -> Self {
        self.matching_type = matching_type;
        self
    }

    pub fn with_all_matching_type(self) -> Self {
        self.with_matching_type(MultipartMatchingType::All)
    }

    pub fn with_any_matching_type(self) -> Self {
        self.with_matching_type(MultipartMatchingType::Any)
    }

    pub fn with_body_pattern(mut self, matcher: impl Into<Matcher>) -> Self {
        self.body_patterns.push(matcher.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.headers.insert(header.into(), matcher.into());
        self
    }
}
