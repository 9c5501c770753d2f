//! Keyword and date-range selection over normalized memories.

use serde::{Deserialize, Serialize};

use crate::memory::Memory;
use crate::time::{instant, parse_bound};

/// Filter criteria supplied by the search panel on every change.
///
/// Empty fields impose no constraint; the keyword and the date range
/// combine with AND logic. Field names on the wire match the UI payload
/// (`startDate` / `endDate`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub keyword: String,
    #[serde(default, rename = "startDate")]
    pub start_date: String,
    #[serde(default, rename = "endDate")]
    pub end_date: String,
}

impl FilterSpec {
    /// Create an empty spec (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = end_date.into();
        self
    }

    /// True when no condition is set.
    pub fn is_empty(&self) -> bool {
        self.keyword.trim().is_empty() && self.start_date.is_empty() && self.end_date.is_empty()
    }
}

/// Select the memories matching `spec`, preserving input order.
///
/// Keyword matching is a case-insensitive substring test over the record
/// content concatenated with its tags. A record whose timestamp fails to
/// parse is excluded while any date bound is active, and included
/// otherwise. The input is never mutated; survivors are cloned into a
/// fresh collection.
pub fn filter_memories(memories: &[Memory], spec: &FilterSpec) -> Vec<Memory> {
    let kw = spec.keyword.trim().to_lowercase();
    let start = active_bound(&spec.start_date);
    let end = active_bound(&spec.end_date);

    memories
        .iter()
        .filter(|m| {
            if !kw.is_empty() {
                let haystack = format!("{} {}", m.content, m.tags.join(" ")).to_lowercase();
                if !haystack.contains(&kw) {
                    return false;
                }
            }

            if start.is_some() || end.is_some() {
                let Some(ts) = instant(&m.timestamp) else {
                    return false;
                };
                if let Some(start) = start {
                    if ts < start {
                        return false;
                    }
                }
                if let Some(end) = end {
                    if ts > end {
                        return false;
                    }
                }
            }

            true
        })
        .cloned()
        .collect()
}

/// An empty bound field is inactive; so is one that fails to parse.
fn active_bound(field: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if field.is_empty() {
        return None;
    }
    parse_bound(field)
}
