use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a memory within one normalization pass.
///
/// Source-provided ids are strings; ids synthesized by the normalizer are
/// positional indices. Stable only within a single pass: a re-fetch with
/// reordering renumbers index-derived ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryId {
    Text(String),
    Index(usize),
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryId::Text(s) => write!(f, "{s}"),
            MemoryId::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Raw timestamp as delivered by the ingestion source.
///
/// Integers and floats are epoch milliseconds; strings are ISO-8601.
/// Unvalidated here; conversion to a comparable instant happens at
/// filter time (see [`crate::time::instant`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Int(ms) => write!(f, "{ms}"),
            Timestamp::Float(ms) => write!(f, "{ms}"),
            Timestamp::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A single canonical memory record: one ingested snippet of text with
/// time, tags, and salience weight.
///
/// Produced fresh on every normalization pass; there is no persistent
/// store behind these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: MemoryId,
    pub timestamp: Timestamp,
    pub content: String,
    pub weight: f64,
    /// Ordered labels, duplicates preserved as given.
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string_json() {
        let id: MemoryId = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(id, MemoryId::Text("a".to_string()));
    }

    #[test]
    fn test_id_from_integer_json() {
        let id: MemoryId = serde_json::from_str("7").unwrap();
        assert_eq!(id, MemoryId::Index(7));
    }

    #[test]
    fn test_timestamp_variants_from_json() {
        let ts: Timestamp = serde_json::from_str("1000").unwrap();
        assert_eq!(ts, Timestamp::Int(1000));

        let ts: Timestamp = serde_json::from_str("1000.5").unwrap();
        assert_eq!(ts, Timestamp::Float(1000.5));

        let ts: Timestamp = serde_json::from_str("\"2023-01-01\"").unwrap();
        assert_eq!(ts, Timestamp::Text("2023-01-01".to_string()));
    }

    #[test]
    fn test_memory_serde_roundtrip() {
        let memory = Memory {
            id: MemoryId::Text("a".to_string()),
            timestamp: Timestamp::Int(1000),
            content: "hi there".to_string(),
            weight: 0.5,
            tags: vec!["x".to_string(), "x".to_string()],
        };

        let json = serde_json::to_string(&memory).unwrap();
        let back: Memory = serde_json::from_str(&json).unwrap();
        assert_eq!(memory, back);
    }

    #[test]
    fn test_untagged_id_serializes_bare() {
        let json = serde_json::to_string(&MemoryId::Index(3)).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&MemoryId::Text("a".to_string())).unwrap();
        assert_eq!(json, "\"a\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(MemoryId::Index(0).to_string(), "0");
        assert_eq!(MemoryId::Text("abc".to_string()).to_string(), "abc");
        assert_eq!(Timestamp::Int(1000).to_string(), "1000");
        assert_eq!(
            Timestamp::Text("2023-01-01".to_string()).to_string(),
            "2023-01-01"
        );
    }
}
