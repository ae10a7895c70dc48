//! Property-based tests for the display projection.
//!
//! Uses proptest to verify:
//! 1. Counters are consistent: `total == completed + pending`, overdue ⊆ pending.
//! 2. The visible list is a permutation of the filtered subset.
//! 3. Incomplete tasks always precede completed ones.
//! 4. Toggling a task twice restores the collection.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use proptest::prelude::*;
use taskflow::storage::MemoryStorage;
use taskflow::tasks::view::Filter;
use taskflow::tasks::{TaskStore, aggregate_counts, filter, visible_tasks};
use taskflow_model::{Priority, Task, TaskId, TaskInput};

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    prop::sample::select(Filter::ALL.to_vec())
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default()
}

/// Tasks with due dates within a month either side of `base_day`.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            arb_priority(),
            prop::option::of(-30_i64..30),
            any::<bool>(),
            0_i64..10_000,
            "[a-z ]{1,12}",
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (priority, due, completed, minutes, title))| Task {
                id: TaskId::new(format!("t{i}")),
                title,
                description: None,
                priority,
                due_date: due.map(|d| base_day() + Duration::days(d)),
                completed,
                created_at: DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(minutes),
                completed_at: None,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn counts_are_consistent(tasks in arb_tasks()) {
        let counts = aggregate_counts(&tasks, base_day());
        prop_assert_eq!(counts.total, tasks.len());
        prop_assert_eq!(counts.total, counts.completed + counts.pending);
        prop_assert!(counts.overdue <= counts.pending);
        prop_assert!(counts.completion_percent() <= 100);
    }

    #[test]
    fn visible_is_permutation_of_filtered(tasks in arb_tasks(), active in arb_filter()) {
        let today = base_day();
        let mut expected: Vec<_> = filter(&tasks, active, today)
            .iter()
            .map(|t| t.id.as_str().to_string())
            .collect();
        let mut actual: Vec<_> = visible_tasks(&tasks, active, "", today)
            .iter()
            .map(|t| t.id.as_str().to_string())
            .collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn incomplete_precede_completed(tasks in arb_tasks()) {
        let visible = visible_tasks(&tasks, Filter::All, "", base_day());
        let first_done = visible.iter().position(|t| t.completed).unwrap_or(visible.len());
        prop_assert!(visible[first_done..].iter().all(|t| t.completed));
    }

    #[test]
    fn toggle_twice_is_identity(titles in prop::collection::vec("[a-z]{1,8}", 1..8), pick in any::<prop::sample::Index>()) {
        let mut store = TaskStore::open(MemoryStorage::new(), "tasks");
        for title in &titles {
            prop_assert!(store.add(&TaskInput::titled(title.as_str())).is_ok());
        }
        let before = store.tasks().to_vec();
        let id = before[pick.index(before.len())].id.clone();

        prop_assert!(store.toggle_completion(&id).is_ok());
        prop_assert!(store.toggle_completion(&id).is_ok());
        prop_assert_eq!(store.tasks(), before.as_slice());
    }
}
