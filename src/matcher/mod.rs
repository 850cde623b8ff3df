//! The matcher algebra: value matchers and the combinators built on top of them.
//!
//! Every matcher is a [`Matcher`], a closed enum over the four shapes the server
//! understands. Matchers serialize straight to the server's JSON and can be chained
//! with [`Matcher::and`] and [`Matcher::or`]:
//!
//! ```
//! use wiremock_client::matcher::{equal_to, not, contains};
//!
//! let first_name = equal_to("John").or(equal_to("Jack")).or(equal_to("Jim"));
//! assert_eq!(
//!     serde_json::to_value(&first_name).unwrap(),
//!     serde_json::json!({"or": [{"equalTo": "John"}, {"equalTo": "Jack"}, {"equalTo": "Jim"}]})
//! );
//!
//! let no_admin = not(contains("admin"));
//! assert_eq!(
//!     serde_json::to_value(&no_admin).unwrap(),
//!     serde_json::json!({"not": {"contains": "admin"}})
//! );
//! ```

mod json_schema;
mod logical;
mod multi_value;
mod string_value;

pub use json_schema::JsonSchemaMatcher;
pub use logical::{LogicalMatcher, LogicalOperator};
pub use multi_value::MultiValueMatcher;
pub use string_value::StringValueMatcher;

use crate::matching::{EqualFlag, MatchingStrategy, MultiValueMatchingStrategy, SchemaVersion};
use crate::{Error, Result};
use serde::ser::{Serialize, Serializer};

/// Any matcher accepted by the request builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    StringValue(StringValueMatcher),
    Logical(LogicalMatcher),
    MultiValue(MultiValueMatcher),
    JsonSchema(JsonSchemaMatcher),
}

impl Matcher {
    /// Logical OR of this matcher and `other`.
    ///
    /// Chaining on an existing `or` node appends to it, so
    /// `a.or(b).or(c)` yields one `or` with three operands.
    pub fn or(self, other: impl Into<Matcher>) -> Matcher {
        self.combine(LogicalOperator::Or, other.into())
    }

    /// Logical AND of this matcher and `other`, flattened like [`Matcher::or`].
    pub fn and(self, other: impl Into<Matcher>) -> Matcher {
        self.combine(LogicalOperator::And, other.into())
    }

    fn combine(self, operator: LogicalOperator, other: Matcher) -> Matcher {
        let node = match self {
            Matcher::Logical(logical) => logical.combine(operator, other),
            matcher if operator == LogicalOperator::And => {
                LogicalMatcher::and(vec![matcher, other])
            }
            matcher => LogicalMatcher::or(vec![matcher, other]),
        };
        Matcher::Logical(node)
    }

    /// Rewrites the matcher so it expects `prefix` in front of the value it
    /// originally described. Logical nodes are rewritten operand by operand;
    /// shapes where a prefix has no meaning come back unchanged.
    pub(crate) fn with_prefix(self, prefix: &str) -> Matcher {
        match self {
            Matcher::StringValue(matcher) => Matcher::StringValue(matcher.with_prefix(prefix)),
            Matcher::Logical(matcher) => {
                Matcher::Logical(matcher.map_operands(|operand| operand.with_prefix(prefix)))
            }
            other => other,
        }
    }
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Matcher::StringValue(m) => m.serialize(serializer),
            Matcher::Logical(m) => m.serialize(serializer),
            Matcher::MultiValue(m) => m.serialize(serializer),
            Matcher::JsonSchema(m) => m.serialize(serializer),
        }
    }
}

impl From<StringValueMatcher> for Matcher {
    fn from(matcher: StringValueMatcher) -> Self {
        Matcher::StringValue(matcher)
    }
}

impl From<LogicalMatcher> for Matcher {
    fn from(matcher: LogicalMatcher) -> Self {
        Matcher::Logical(matcher)
    }
}

impl From<MultiValueMatcher> for Matcher {
    fn from(matcher: MultiValueMatcher) -> Self {
        Matcher::MultiValue(matcher)
    }
}

impl From<JsonSchemaMatcher> for Matcher {
    fn from(matcher: JsonSchemaMatcher) -> Self {
        Matcher::JsonSchema(matcher)
    }
}

fn string_value(strategy: MatchingStrategy, value: impl Into<String>) -> Matcher {
    StringValueMatcher::new(strategy, value, Vec::<String>::new()).into()
}

/// Matches when the value equals `value`.
pub fn equal_to(value: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::EqualTo, value)
}

/// Matches when the value equals `value`, ignoring case.
pub fn equal_to_ignore_case(value: impl Into<String>) -> Matcher {
    StringValueMatcher::new(MatchingStrategy::EqualTo, value, ["caseInsensitive"]).into()
}

/// Matches when the value matches the regular expression `pattern`.
pub fn matching(pattern: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::Matches, pattern)
}

/// Matches when the value does not match the regular expression `pattern`.
pub fn not_matching(pattern: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::DoesNotMatch, pattern)
}

/// Matches when the value contains `value`.
pub fn contains(value: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::Contains, value)
}

/// Matches when the value does not contain `value`.
pub fn not_contains(value: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::DoesNotContain, value)
}

/// Matches when the value starts with the literal `prefix`.
///
/// Expressed as an anchored regex with `prefix` escaped.
pub fn starts_with(prefix: &str) -> Matcher {
    matching(format!("^{}", regex::escape(prefix)))
}

/// Matches when the value is XML equal to `xml`.
pub fn equal_to_xml(xml: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::EqualToXml, xml)
}

/// Matches when the value is JSON equal to `json`, with optional leniency flags.
///
/// The string is not validated here; the server rejects malformed JSON.
pub fn equal_to_json(json: impl Into<String>, flags: &[EqualFlag]) -> Matcher {
    StringValueMatcher::new(
        MatchingStrategy::EqualToJson,
        json,
        flags.iter().map(EqualFlag::as_str),
    )
    .into()
}

/// Like [`equal_to_json`], but serializes `value` first.
///
/// # Errors
///
/// Returns [`Error::InvalidMatcher`] if `value` cannot be serialized to JSON.
pub fn try_equal_to_json_value<T: Serialize + ?Sized>(
    value: &T,
    flags: &[EqualFlag],
) -> Result<Matcher> {
    let json = serde_json::to_string(value)
        .map_err(|e| Error::InvalidMatcher(format!("equalToJson value: {}", e)))?;
    Ok(equal_to_json(json, flags))
}

/// Matches when the value matches the XPath expression `xpath`.
pub fn matching_xpath(xpath: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::MatchesXPath, xpath)
}

/// Matches when the value matches the JSONPath expression `path`.
pub fn matching_json_path(path: impl Into<String>) -> Matcher {
    string_value(MatchingStrategy::MatchesJsonPath, path)
}

/// Matches when the value is not present at all.
pub fn absent() -> Matcher {
    StringValueMatcher::absent().into()
}

/// Matches when the value validates against the JSON schema `schema`.
///
/// The schema is sent as-is; see [`try_matches_json_schema`] for a checked variant.
pub fn matches_json_schema(schema: impl Into<String>, version: SchemaVersion) -> Matcher {
    JsonSchemaMatcher::new(schema, Some(version)).into()
}

/// Like [`matches_json_schema`], but fails if `schema` is not valid JSON.
///
/// # Errors
///
/// Returns [`Error::InvalidMatcher`] with the parser message.
pub fn try_matches_json_schema(
    schema: impl Into<String>,
    version: SchemaVersion,
) -> Result<Matcher> {
    let schema = schema.into();
    serde_json::from_str::<serde_json::Value>(&schema)
        .map_err(|e| Error::InvalidMatcher(format!("matchesJsonSchema schema: {}", e)))?;
    Ok(matches_json_schema(schema, version))
}

/// Matches when `first` and every matcher in `rest` match.
///
/// The first operand is separate so an `and` node is never empty.
pub fn and(first: impl Into<Matcher>, rest: impl IntoIterator<Item = Matcher>) -> Matcher {
    LogicalMatcher::and(operands(first.into(), rest)).into()
}

/// Matches when `first` or any matcher in `rest` matches.
pub fn or(first: impl Into<Matcher>, rest: impl IntoIterator<Item = Matcher>) -> Matcher {
    LogicalMatcher::or(operands(first.into(), rest)).into()
}

fn operands(first: Matcher, rest: impl IntoIterator<Item = Matcher>) -> Vec<Matcher> {
    std::iter::once(first).chain(rest).collect()
}

/// Matches when `matcher` does not.
pub fn not(matcher: impl Into<Matcher>) -> Matcher {
    LogicalMatcher::not(matcher.into()).into()
}

/// Matches a multi-valued parameter whose values are exactly `matchers`.
pub fn has_exactly(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    MultiValueMatcher::new(
        MultiValueMatchingStrategy::HasExactly,
        matchers.into_iter().collect(),
    )
    .into()
}

/// Matches a multi-valued parameter that includes all of `matchers`.
pub fn includes(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    MultiValueMatcher::new(
        MultiValueMatchingStrategy::Includes,
        matchers.into_iter().collect(),
    )
    .into()
}
