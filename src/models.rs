//! Dataset records and their scored form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_URL: &str = "url";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_INDUSTRY: &str = "industry";
pub const FIELD_FEATURES: &str = "features";
pub const FIELD_SOURCE: &str = "source";
/// Key the derived score is serialized under
pub const FIELD_COMPLEXITY_SCORE: &str = "complexity_score";

/// Column order used when records are written out as CSV
pub const RECORD_COLUMNS: [&str; 8] = [
    FIELD_ID,
    FIELD_NAME,
    FIELD_URL,
    FIELD_DESCRIPTION,
    FIELD_CATEGORY,
    FIELD_INDUSTRY,
    FIELD_FEATURES,
    FIELD_SOURCE,
];

/// One collected app template.
///
/// Columns are kept in file order, including ones appatlas does not know
/// about, so a record serializes back out exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Raw column lookup; `None` when the column is absent
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Column value with missing or blank values mapped to `default`
    pub fn field_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.field(key) {
            Some(v) if !v.trim().is_empty() => v,
            _ => default,
        }
    }

    pub fn id(&self) -> &str {
        self.field_or(FIELD_ID, "")
    }

    pub fn name(&self) -> &str {
        self.field_or(FIELD_NAME, "")
    }

    pub fn url(&self) -> &str {
        self.field_or(FIELD_URL, "")
    }

    pub fn description(&self) -> &str {
        self.field_or(FIELD_DESCRIPTION, "")
    }

    pub fn category(&self) -> &str {
        self.field_or(FIELD_CATEGORY, "")
    }

    pub fn features(&self) -> &str {
        self.field_or(FIELD_FEATURES, "")
    }

    /// Feature tokens: comma split, trimmed, empties dropped
    pub fn feature_list(&self) -> Vec<&str> {
        parse_features(self.features())
    }

    /// Drop a column, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Split a comma-joined feature string into trimmed, non-empty tokens
pub fn parse_features(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// A record together with its derived complexity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    pub complexity_score: f64,
}

impl ScoredRecord {
    /// Pair a record with its score. An input column that collides with
    /// the score key is dropped so the serialized object has unique keys.
    pub fn new(mut record: Record, complexity_score: f64) -> Self {
        record.remove(FIELD_COMPLEXITY_SCORE);
        Self {
            record,
            complexity_score,
        }
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }
}
