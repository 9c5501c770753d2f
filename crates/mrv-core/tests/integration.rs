//! Integration tests exercising the full replay pipeline:
//! raw payload → normalize → filter → project.

use mrv_core::{
    FilterSpec, Memory, MemoryId, ReplayBuffer, Timestamp, Viewport, filter_memories, normalize,
    project,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn raw_payload() -> Vec<Value> {
    vec![
        json!({
            "uuid": "a",
            "timestamp": "2023-01-01T00:00:00Z",
            "tokens": ["hello", "world"],
            "weight": 0.5,
            "tags": ["greet"],
        }),
        json!({
            "timestamp": "2023-02-01T00:00:00Z",
            "text": "Another entry",
            "tags": ["test"],
        }),
        json!("malformed"),
        json!({
            "timestamp": 1_677_628_800_000i64, // 2023-03-01
            "tokens": ["march", "snapshot"],
        }),
    ]
}

/// Raw payload flows through all three stages; rejects degrade gracefully.
#[test]
fn pipeline_end_to_end() {
    let raw = raw_payload();
    let outcome = normalize(&raw);

    assert_eq!(outcome.memories.len(), 3);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 2);

    // The list view consumes the filtered subset
    let spec = FilterSpec::new()
        .with_start_date("2023-01-15")
        .with_end_date("2023-03-15");
    let kept = filter_memories(&outcome.memories, &spec);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].content, "Another entry");
    assert_eq!(kept[1].content, "march snapshot");

    // The spiral consumes the full collection, independently
    let projected = project(&outcome.memories, Viewport::new(800.0, 600.0));
    assert_eq!(projected.points.len(), 3);
    assert!(projected.dropped.is_empty());
    assert_eq!(projected.points[0].source_index, 0);
}

/// Filter and projector are independent consumers: filtering for the list
/// view leaves the collection handed to the projector untouched.
#[test]
fn filter_does_not_disturb_projection_input() {
    let outcome = normalize(&raw_payload());
    let before = outcome.memories.clone();

    let _ = filter_memories(&outcome.memories, &FilterSpec::new().with_keyword("hello"));

    assert_eq!(outcome.memories, before);
    let vp = Viewport::new(640.0, 480.0);
    assert_eq!(
        project(&outcome.memories, vp).points,
        project(&before, vp).points
    );
}

/// Replay listener flow: payloads accumulate in the bounded buffer and the
/// pipeline runs over a snapshot on each refresh.
#[test]
fn buffer_feeds_pipeline() {
    let mut buffer = ReplayBuffer::with_capacity(2);
    for value in raw_payload() {
        buffer.push(value);
    }

    // Capacity 2: only the last two payloads survive
    assert_eq!(buffer.len(), 2);
    let outcome = normalize(&buffer.to_vec());
    assert_eq!(outcome.memories.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.memories[0].content, "march snapshot");
}

/// Re-running the whole pipeline on identical input reproduces identical
/// output end to end.
#[test]
fn pipeline_deterministic() {
    let raw = raw_payload();
    let vp = Viewport::new(1024.0, 768.0);
    let spec = FilterSpec::new().with_keyword("entry");

    let run = |raw: &[Value]| {
        let outcome = normalize(raw);
        let kept = filter_memories(&outcome.memories, &spec);
        let projected = project(&outcome.memories, vp);
        (outcome.memories, kept, projected.points)
    };

    assert_eq!(run(&raw), run(&raw));
}

#[test]
fn empty_payload_is_safe_everywhere() {
    let outcome = normalize(&[]);
    assert!(outcome.memories.is_empty());
    assert!(filter_memories(&outcome.memories, &FilterSpec::new()).is_empty());
    assert!(
        project(&outcome.memories, Viewport::new(100.0, 100.0))
            .points
            .is_empty()
    );
}

// -- Property tests --

fn arb_memory() -> impl Strategy<Value = Memory> {
    (
        0usize..1000,
        0i64..4_102_444_800_000i64, // up to year 2100
        "[a-z ]{0,24}",
        prop::collection::vec("[a-z]{1,8}", 0..4),
        0.1f64..10.0,
    )
        .prop_map(|(idx, ms, content, tags, weight)| Memory {
            id: MemoryId::Index(idx),
            timestamp: Timestamp::Int(ms),
            content,
            weight,
            tags,
        })
}

fn arb_spec() -> impl Strategy<Value = FilterSpec> {
    (
        "[a-z]{0,6}",
        prop::option::of("20[0-9]{2}-0[1-9]-1[0-9]"),
        prop::option::of("20[0-9]{2}-0[1-9]-2[0-8]"),
    )
        .prop_map(|(keyword, start, end)| FilterSpec {
            keyword,
            start_date: start.unwrap_or_default(),
            end_date: end.unwrap_or_default(),
        })
}

proptest! {
    /// Empty spec is the identity filter, order preserved.
    #[test]
    fn prop_empty_spec_identity(memories in prop::collection::vec(arb_memory(), 0..40)) {
        let kept = filter_memories(&memories, &FilterSpec::new());
        prop_assert_eq!(kept, memories);
    }

    /// A combined spec keeps only records kept by both of its halves.
    #[test]
    fn prop_filter_and_semantics(
        memories in prop::collection::vec(arb_memory(), 0..40),
        spec in arb_spec(),
    ) {
        let combined = filter_memories(&memories, &spec);
        let by_keyword = filter_memories(
            &memories,
            &FilterSpec::new().with_keyword(spec.keyword.clone()),
        );
        let by_dates = filter_memories(
            &memories,
            &FilterSpec::new()
                .with_start_date(spec.start_date.clone())
                .with_end_date(spec.end_date.clone()),
        );

        for m in &combined {
            prop_assert!(by_keyword.contains(m));
            prop_assert!(by_dates.contains(m));
        }
    }

    /// Filtering never invents records and never reorders survivors.
    #[test]
    fn prop_filter_is_stable_subsequence(
        memories in prop::collection::vec(arb_memory(), 0..40),
        spec in arb_spec(),
    ) {
        let kept = filter_memories(&memories, &spec);
        prop_assert!(kept.len() <= memories.len());

        let mut cursor = 0;
        for m in &kept {
            let found = memories[cursor..].iter().position(|c| c == m);
            prop_assert!(found.is_some(), "kept record not a subsequence match");
            cursor += found.unwrap() + 1;
        }
    }

    /// Projected sizes shrink strictly with index, for any input length.
    #[test]
    fn prop_projection_sizes_shrink(n in 0usize..200) {
        let memories: Vec<Memory> = (0..n)
            .map(|i| Memory {
                id: MemoryId::Index(i),
                timestamp: Timestamp::Int(i as i64),
                content: String::new(),
                weight: 1.0,
                tags: Vec::new(),
            })
            .collect();

        let outcome = project(&memories, Viewport::new(800.0, 600.0));
        prop_assert_eq!(outcome.points.len(), n);
        for pair in outcome.points.windows(2) {
            prop_assert!(pair[1].size < pair[0].size);
        }
    }
}
