use crate::matching::{MatchingStrategy, SchemaVersion};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Validates a value against a JSON schema on the server side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaMatcher {
    schema: String,
    schema_version: Option<SchemaVersion>,
}

impl JsonSchemaMatcher {
    pub fn new(schema: impl Into<String>, schema_version: Option<SchemaVersion>) -> Self {
        Self {
            schema: schema.into(),
            schema_version,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn schema_version(&self) -> Option<SchemaVersion> {
        self.schema_version
    }
}

impl Serialize for JsonSchemaMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.schema_version.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(MatchingStrategy::MatchesJsonSchema.as_str(), &self.schema)?;
        if let Some(version) = &self.schema_version {
            map.serialize_entry("schemaVersion", version)?;
        }
        map.end()
    }
}
