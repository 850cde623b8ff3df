use crate::matching::MatchingStrategy;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single-value matcher: one strategy, one value and optional boolean flags.
///
/// Serializes to a flat object, e.g. `{"equalTo": "abc", "caseInsensitive": true}`.
/// The only matcher without a strategy is [`absent`](crate::matcher::absent), which
/// serializes to `{"absent": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValueMatcher {
    strategy: Option<MatchingStrategy>,
    value: String,
    flags: Vec<String>,
}

impl StringValueMatcher {
    /// Creates a matcher with the given strategy, value and flags.
    pub fn new<I, S>(strategy: MatchingStrategy, value: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strategy: Some(strategy),
            value: value.into(),
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn absent() -> Self {
        Self {
            strategy: None,
            value: String::new(),
            flags: vec![MatchingStrategy::Absent.as_str().to_string()],
        }
    }

    /// The strategy, or `None` for the absent matcher.
    pub fn strategy(&self) -> Option<MatchingStrategy> {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Puts `prefix` in front of whatever this matcher compares against.
    ///
    /// Regex values keep exactly one leading `^`. Substring and absence checks
    /// are returned unchanged.
    pub(crate) fn with_prefix(mut self, prefix: &str) -> Self {
        match self.strategy {
            Some(strategy) if strategy.is_equality() => {
                self.value.insert_str(0, prefix);
            }
            Some(strategy) if strategy.is_regex() => {
                let rest = self.value.strip_prefix('^').unwrap_or(&self.value);
                let anchored = format!("^{prefix}{rest}");
                self.value = anchored;
            }
            _ => {}
        }
        self
    }
}

impl Serialize for StringValueMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.flags.len() + usize::from(self.strategy.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(strategy) = self.strategy {
            map.serialize_entry(strategy.as_str(), &self.value)?;
        }
        for flag in &self.flags {
            map.serialize_entry(flag, &true)?;
        }
        map.end()
    }
}
