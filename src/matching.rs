//! Wire tags for the comparison operators understood by the mock server.
//!
//! Value strategies and URL strategies are kept as separate types so a URL
//! strategy can never end up inside a header matcher and vice versa.

use serde::Serialize;
use std::fmt;

/// A comparison operator for a single string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchingStrategy {
    #[serde(rename = "equalTo")]
    EqualTo,
    #[serde(rename = "matches")]
    Matches,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "equalToXml")]
    EqualToXml,
    #[serde(rename = "equalToJson")]
    EqualToJson,
    #[serde(rename = "matchesXPath")]
    MatchesXPath,
    #[serde(rename = "matchesJsonPath")]
    MatchesJsonPath,
    #[serde(rename = "absent")]
    Absent,
    #[serde(rename = "doesNotMatch")]
    DoesNotMatch,
    #[serde(rename = "doesNotContain")]
    DoesNotContain,
    #[serde(rename = "matchesJsonSchema")]
    MatchesJsonSchema,
}

impl MatchingStrategy {
    /// The JSON key this strategy is serialized under.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingStrategy::EqualTo => "equalTo",
            MatchingStrategy::Matches => "matches",
            MatchingStrategy::Contains => "contains",
            MatchingStrategy::EqualToXml => "equalToXml",
            MatchingStrategy::EqualToJson => "equalToJson",
            MatchingStrategy::MatchesXPath => "matchesXPath",
            MatchingStrategy::MatchesJsonPath => "matchesJsonPath",
            MatchingStrategy::Absent => "absent",
            MatchingStrategy::DoesNotMatch => "doesNotMatch",
            MatchingStrategy::DoesNotContain => "doesNotContain",
            MatchingStrategy::MatchesJsonSchema => "matchesJsonSchema",
        }
    }

    /// Strategies whose value is compared literally, so a prefix can simply be prepended.
    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            MatchingStrategy::EqualTo
                | MatchingStrategy::EqualToJson
                | MatchingStrategy::EqualToXml
                | MatchingStrategy::MatchesJsonPath
                | MatchingStrategy::MatchesXPath
        )
    }

    /// Strategies whose value is a regular expression.
    pub fn is_regex(&self) -> bool {
        matches!(
            self,
            MatchingStrategy::Matches | MatchingStrategy::DoesNotMatch
        )
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the request URL is compared. Each strategy is also the JSON key the
/// URL is emitted under in the request block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UrlMatchingStrategy {
    /// Exact match on path and query.
    #[serde(rename = "url")]
    EqualTo,
    /// Exact match on path only.
    #[serde(rename = "urlPath")]
    PathEqualTo,
    /// Regex match on path only.
    #[serde(rename = "urlPathPattern")]
    PathMatching,
    /// Regex match on path and query.
    #[serde(rename = "urlPattern")]
    Matching,
    /// Path template such as `/contacts/{contactId}`.
    #[serde(rename = "urlPathTemplate")]
    PathTemplate,
}

impl UrlMatchingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlMatchingStrategy::EqualTo => "url",
            UrlMatchingStrategy::PathEqualTo => "urlPath",
            UrlMatchingStrategy::PathMatching => "urlPathPattern",
            UrlMatchingStrategy::Matching => "urlPattern",
            UrlMatchingStrategy::PathTemplate => "urlPathTemplate",
        }
    }
}

impl fmt::Display for UrlMatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategies for parameters that may carry several values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MultiValueMatchingStrategy {
    #[serde(rename = "hasExactly")]
    HasExactly,
    #[serde(rename = "includes")]
    Includes,
}

impl MultiValueMatchingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MultiValueMatchingStrategy::HasExactly => "hasExactly",
            MultiValueMatchingStrategy::Includes => "includes",
        }
    }
}

/// Leniency flags for JSON equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualFlag {
    IgnoreArrayOrder,
    IgnoreExtraElements,
}

impl EqualFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EqualFlag::IgnoreArrayOrder => "ignoreArrayOrder",
            EqualFlag::IgnoreExtraElements => "ignoreExtraElements",
        }
    }
}

/// JSON Schema draft used by `matchesJsonSchema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SchemaVersion {
    V4,
    V6,
    V7,
    V201909,
    V202012,
}
