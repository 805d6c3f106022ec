//! Query Engine: equality filtering and pagination over a record set.

use sheetful_commons::models::{cell_to_string, Record};
use sheetful_commons::{Result, SheetError};

/// Largest page a single listing may return.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Equality filter: every criterion must match exactly after stringification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    criteria: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, expected: impl Into<String>) -> Self {
        self.criteria.push((key.into(), expected.into()));
        self
    }

    /// Build from a keyed mapping, stringifying each expected value.
    pub fn from_record(record: &Record) -> Self {
        Self {
            criteria: record
                .iter()
                .map(|(k, v)| (k.to_string(), cell_to_string(v)))
                .collect(),
        }
    }

    /// Parse a JSON object such as `{"status":"1"}`.
    pub fn parse_json(text: &str) -> Result<Self> {
        let record: Record = serde_json::from_str(text).map_err(|e| {
            SheetError::InvalidInput(format!("query must be a JSON object: {}", e))
        })?;
        Ok(Self::from_record(&record))
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Missing record fields compare as empty string.
    pub fn matches(&self, record: &Record) -> bool {
        self.criteria
            .iter()
            .all(|(key, expected)| record.get_string(key) == *expected)
    }
}

/// Pagination window. `limit` is always within `[1, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    limit: usize,
}

impl Page {
    /// Validate raw query values against `max_limit` (itself capped at
    /// [`MAX_PAGE_LIMIT`]).
    pub fn new(offset: i64, limit: i64, max_limit: usize) -> Result<Self> {
        let max_limit = max_limit.clamp(1, MAX_PAGE_LIMIT);

        let offset = usize::try_from(offset).map_err(|_| {
            SheetError::InvalidInput(format!("offset must be >= 0, got {}", offset))
        })?;

        let limit = usize::try_from(limit)
            .ok()
            .filter(|l| (1..=max_limit).contains(l))
            .ok_or_else(|| {
                SheetError::InvalidInput(format!(
                    "limit must be between 1 and {}, got {}",
                    max_limit, limit
                ))
            })?;

        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Filter the whole set first, then take `[offset, offset + limit)`.
///
/// An offset past the end yields an empty page.
pub fn query(records: Vec<Record>, filter: Option<&Filter>, page: Page) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| filter.map_or(true, |f| f.matches(record)))
        .skip(page.offset)
        .take(page.limit)
        .collect()
}
