//! Normalization of raw replay payloads into canonical [`Memory`] records.
//!
//! The ingestion side emits heterogeneous JSON objects where every field
//! is optional. Normalization is total: each raw value yields exactly one
//! `Memory` or one [`RejectedRecord`], never a silent drop, and a partial
//! result is always preferred over failing the whole batch.

use serde::Deserialize;
use serde_json::Value;

use crate::constants::NO_CONTENT;
use crate::memory::{Memory, MemoryId, Timestamp};

/// One raw replay record as it appears on the wire.
///
/// Unknown extra fields are ignored; listed fields default when absent.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub uuid: Option<MemoryId>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Why a raw item was rejected during normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The value is not record-shaped (not an object, or a field has an
    /// incompatible type).
    NotRecord,
    /// Record-shaped but missing the required timestamp.
    MissingTimestamp,
}

/// A rejected raw item: its position in the input and the reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: RejectReason,
}

/// Result of one normalization pass: canonical records plus rejects.
///
/// `memories` preserves input order; `rejected` indices refer to the raw
/// input sequence.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub memories: Vec<Memory>,
    pub rejected: Vec<RejectedRecord>,
}

/// Convert raw replay values into canonical memories.
///
/// Per item at position `i`: the id is the source uuid or `i`; content is
/// the space-joined token sequence, falling back to raw text, falling back
/// to [`NO_CONTENT`]; a zero or absent weight becomes `1.0`; tags default
/// to empty. Timestamps pass through unvalidated; parsing happens at
/// filter time.
pub fn normalize(raw_items: &[Value]) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for (i, value) in raw_items.iter().enumerate() {
        if !value.is_object() {
            outcome.rejected.push(RejectedRecord {
                index: i,
                reason: RejectReason::NotRecord,
            });
            continue;
        }

        let raw: RawRecord = match serde_json::from_value(value.clone()) {
            Ok(raw) => raw,
            Err(_) => {
                outcome.rejected.push(RejectedRecord {
                    index: i,
                    reason: RejectReason::NotRecord,
                });
                continue;
            }
        };

        let Some(timestamp) = raw.timestamp else {
            outcome.rejected.push(RejectedRecord {
                index: i,
                reason: RejectReason::MissingTimestamp,
            });
            continue;
        };

        let content = if !raw.tokens.is_empty() {
            raw.tokens.join(" ")
        } else if let Some(text) = raw.text {
            text
        } else {
            NO_CONTENT.to_string()
        };

        outcome.memories.push(Memory {
            id: raw.uuid.unwrap_or(MemoryId::Index(i)),
            timestamp,
            content,
            weight: raw.weight.filter(|w| *w != 0.0).unwrap_or(1.0),
            tags: raw.tags,
        });
    }

    outcome
}
