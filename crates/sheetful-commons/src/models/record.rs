//! Keyed row representation exchanged with clients.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Remote reads normally yield strings, but client payloads may carry
/// numbers or booleans and those are written through unchanged.
pub type CellValue = serde_json::Value;

/// One logical data row: an ordered mapping from header name to cell value.
///
/// Key order follows the sheet's header row when built by the record mapper,
/// and the client's JSON key order when deserialized from a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, CellValue>);

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Insert or overwrite a field.
    ///
    /// Overwriting keeps the key at its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    /// The field's stringified value; missing fields read as empty string.
    pub fn get_string(&self, key: &str) -> String {
        self.0.get(key).map(cell_to_string).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, CellValue> {
        self.0
    }
}

impl From<IndexMap<String, CellValue>> for Record {
    fn from(map: IndexMap<String, CellValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, CellValue);
    type IntoIter = indexmap::map::IntoIter<String, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Stringify a cell value for comparison and header naming.
///
/// Strings are returned as-is, numbers and booleans in their JSON text form,
/// null as empty string, arrays and objects as compact JSON.
pub fn cell_to_string(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => s.clone(),
        CellValue::Null => String::new(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
