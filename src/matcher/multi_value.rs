use super::Matcher;
use crate::matching::MultiValueMatchingStrategy;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Matches a parameter that carries several values, e.g. a repeated query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueMatcher {
    strategy: MultiValueMatchingStrategy,
    matchers: Vec<Matcher>,
}

impl MultiValueMatcher {
    pub fn new(strategy: MultiValueMatchingStrategy, matchers: Vec<Matcher>) -> Self {
        Self { strategy, matchers }
    }

    pub fn strategy(&self) -> MultiValueMatchingStrategy {
        self.strategy
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }
}

impl Serialize for MultiValueMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.strategy.as_str(), &self.matchers)?;
        map.end()
    }
}
