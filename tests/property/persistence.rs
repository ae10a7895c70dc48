//! Property-based tests for the persisted task blob.
//!
//! Uses proptest to verify:
//! 1. Any valid task collection survives encode → decode.
//! 2. Arbitrary text never panics `decode` (it returns `Err` or a collection).
//! 3. Validated form input always yields a trimmed, non-empty title.

use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;
use taskflow_model::codec;
use taskflow_model::{Priority, Task, TaskId, TaskInput};

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    "[a-z0-9-]{1,36}".prop_map(TaskId::new)
}

/// Strategy for generating arbitrary `Priority` values.
fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

/// Strategy for timestamps between 2000 and 2100, millisecond precision.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800_000_i64..4_102_444_800_000_i64)
        .prop_filter_map("in range", DateTime::from_timestamp_millis)
}

/// Strategy for calendar dates.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000_i32..2100, 1_u32..=12, 1_u32..=28)
        .prop_filter_map("valid date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

/// Strategy for trimmed, non-empty text (as the store always writes it).
fn arb_text() -> impl Strategy<Value = String> {
    "[^\x00]{1,64}".prop_filter_map("non-blank", |s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Strategy for generating tasks in any reachable state.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        arb_text(),
        proptest::option::of(arb_text()),
        arb_priority(),
        proptest::option::of(arb_date()),
        arb_timestamp(),
        proptest::option::of(arb_timestamp()),
    )
        .prop_map(
            |(id, title, description, priority, due_date, created_at, completed_at)| Task {
                id,
                title,
                description,
                priority,
                due_date,
                completed: completed_at.is_some(),
                created_at,
                completed_at,
            },
        )
}

proptest! {
    #[test]
    fn collection_round_trips(tasks in prop::collection::vec(arb_task(), 0..16)) {
        let blob = codec::encode(&tasks).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = codec::decode(&blob).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(tasks, decoded);
    }

    #[test]
    fn decode_never_panics(text in ".*") {
        let _ = codec::decode(&text);
    }

    #[test]
    fn decode_never_panics_on_json_shaped_text(text in r#"\[\{"(id|title|priority|createdAt)":"[^"]{0,16}"\}\]"#) {
        let _ = codec::decode(&text);
    }

    #[test]
    fn validated_title_is_trimmed_and_non_empty(title in ".{0,64}") {
        match TaskInput::titled(title.clone()).validate() {
            Ok(valid) => {
                prop_assert!(!valid.title.is_empty());
                prop_assert_eq!(valid.title.as_str(), title.trim());
            }
            Err(_) => prop_assert!(title.trim().is_empty()),
        }
    }
}
