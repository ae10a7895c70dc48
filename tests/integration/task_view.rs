//! Integration tests for filtering, search, ordering and counters.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use taskflow::markup;
use taskflow::storage::MemoryStorage;
use taskflow::tasks::view::{self, Filter, SEARCH_EMPTY_MESSAGE};
use taskflow::tasks::{DEFAULT_STORAGE_KEY, TaskStore, aggregate_counts, filter, search, visible_tasks};
use taskflow_model::{Priority, Task, TaskId, TaskInput};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn at(minutes: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).expect("ts") + Duration::minutes(minutes)
}

fn make_task(id: &str, title: &str, priority: Priority, created_min: i64) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: None,
        priority,
        due_date: None,
        completed: false,
        created_at: at(created_min),
        completed_at: None,
    }
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.as_str().to_string()).collect()
}

/// Two-task collection: a high-priority report due Mar 1 and completed milk.
fn report_and_milk() -> Vec<Task> {
    let mut report = make_task("report", "Write report", Priority::High, 0);
    report.due_date = Some(day(2025, 3, 1));
    let mut milk = make_task("milk", "Buy milk", Priority::Medium, 1);
    milk.completed = true;
    milk.completed_at = Some(at(2));
    vec![report, milk]
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn overdue_depends_on_today() {
    let tasks = report_and_milk();

    let before = visible_tasks(&tasks, Filter::Overdue, "", day(2025, 2, 28));
    assert!(before.is_empty());

    let on_day = visible_tasks(&tasks, Filter::Overdue, "", day(2025, 3, 1));
    assert!(on_day.is_empty());

    let after = visible_tasks(&tasks, Filter::Overdue, "", day(2025, 3, 2));
    assert_eq!(ids(&after), ["report"]);
}

#[test]
fn completed_tasks_are_never_overdue() {
    let mut tasks = report_and_milk();
    tasks[0].completed = true;
    let today = day(2026, 1, 1);
    assert!(filter(&tasks, Filter::Overdue, today).is_empty());
    assert_eq!(aggregate_counts(&tasks, today).overdue, 0);
}

#[test]
fn each_filter_selects_its_subset() {
    let tasks = report_and_milk();
    let today = day(2025, 3, 2);

    assert_eq!(filter(&tasks, Filter::All, today).len(), 2);
    assert_eq!(ids(&filter(&tasks, Filter::Completed, today)), ["milk"]);
    assert_eq!(ids(&filter(&tasks, Filter::Pending, today)), ["report"]);
    assert_eq!(ids(&filter(&tasks, Filter::High, today)), ["report"]);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let mut tasks = report_and_milk();
    tasks[0].description = Some("Quarterly MILKSHAKE sales".to_string());

    let found = search(&tasks, "milk");
    assert_eq!(ids(&found), ["report", "milk"]);

    let found = search(&tasks, "REPORT");
    assert_eq!(ids(&found), ["report"]);

    assert!(search(&tasks, "bread").is_empty());
    assert_eq!(search(&tasks, "").len(), 2);
}

#[test]
fn search_is_applied_after_filter() {
    let tasks = report_and_milk();
    let visible = visible_tasks(&tasks, Filter::Pending, "milk", day(2025, 1, 1));
    assert!(visible.is_empty());
    assert_eq!(
        view::empty_list_message(Filter::Pending, "milk"),
        SEARCH_EMPTY_MESSAGE
    );
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn pending_before_completed_then_priority() {
    let mut done_high = make_task("done-high", "a", Priority::High, 0);
    done_high.completed = true;
    let tasks = vec![
        done_high,
        make_task("low", "b", Priority::Low, 1),
        make_task("high", "c", Priority::High, 2),
        make_task("medium", "d", Priority::Medium, 3),
    ];

    let visible = visible_tasks(&tasks, Filter::All, "", day(2025, 1, 1));
    assert_eq!(ids(&visible), ["high", "medium", "low", "done-high"]);
}

#[test]
fn same_priority_orders_by_due_date_then_newest() {
    let mut early = make_task("early", "a", Priority::Medium, 0);
    early.due_date = Some(day(2025, 1, 5));
    let mut late = make_task("late", "b", Priority::Medium, 1);
    late.due_date = Some(day(2025, 2, 5));
    let older = make_task("older", "c", Priority::Low, 2);
    let newer = make_task("newer", "d", Priority::Low, 3);

    let tasks = vec![late, older, early, newer];
    let visible = visible_tasks(&tasks, Filter::All, "", day(2025, 1, 1));
    assert_eq!(ids(&visible), ["early", "late", "newer", "older"]);
}

#[test]
fn equal_due_dates_keep_collection_order() {
    let mut first = make_task("first", "a", Priority::High, 0);
    first.due_date = Some(day(2025, 1, 5));
    let mut second = make_task("second", "b", Priority::High, 5);
    second.due_date = Some(day(2025, 1, 5));

    let tasks = vec![first, second];
    let visible = visible_tasks(&tasks, Filter::All, "", day(2025, 1, 1));
    assert_eq!(ids(&visible), ["first", "second"]);
}

#[test]
fn mixed_dated_and_undated_does_not_panic() {
    let mut tasks = Vec::new();
    for i in 0..40 {
        let mut task = make_task(&format!("t{i}"), "x", Priority::Medium, i);
        if i % 3 == 0 {
            task.due_date = Some(day(2025, 1, 1) + Duration::days(40 - i));
        }
        tasks.push(task);
    }
    let visible = visible_tasks(&tasks, Filter::All, "", day(2025, 1, 1));
    assert_eq!(visible.len(), 40);
}

// ---------------------------------------------------------------------------
// Counters and empty states
// ---------------------------------------------------------------------------

#[test]
fn counts_cover_whole_collection() {
    let tasks = report_and_milk();
    let counts = aggregate_counts(&tasks, day(2025, 3, 2));
    assert_eq!(counts.total, 2);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.overdue, 1);
    assert_eq!(counts.completion_percent(), 50);

    let empty = aggregate_counts(&[], day(2025, 3, 2));
    assert_eq!(empty.total, 0);
    assert_eq!(empty.completion_percent(), 0);
}

#[test]
fn empty_state_messages_per_filter() {
    assert_eq!(
        view::empty_state_message(Filter::All),
        "Add your first task to get started!"
    );
    assert_eq!(
        view::empty_state_message(Filter::Completed),
        "No completed tasks yet. Keep working!"
    );
    assert_eq!(
        view::empty_state_message(Filter::Pending),
        "No pending tasks. Great job!"
    );
    assert_eq!(
        view::empty_state_message(Filter::High),
        "No high priority tasks."
    );
    assert_eq!(
        view::empty_state_message(Filter::Overdue),
        "No overdue tasks. Excellent!"
    );
}

#[test]
fn html_export_follows_view_order() {
    let tasks = report_and_milk();
    let html = markup::render_task_list(&tasks, Filter::All, "", day(2025, 3, 2));
    let report_at = html.find("Write report").expect("report row");
    let milk_at = html.find("Buy milk").expect("milk row");
    assert!(report_at < milk_at);
    assert!(html.contains("Mar 1, 2025 (Overdue)"));
}

// ---------------------------------------------------------------------------
// End to end through the store
// ---------------------------------------------------------------------------

#[test]
fn overdue_report_and_milk_scenario() {
    let today = view::today();
    let yesterday = today - Duration::days(1);
    let mut store = TaskStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY);

    let report = store
        .add(
            &TaskInput::titled("Write report")
                .with_priority(Priority::High)
                .with_due_date(yesterday),
        )
        .expect("add report");
    let milk = store
        .add(&TaskInput::titled("Buy milk").with_priority(Priority::Low))
        .expect("add milk");

    let overdue = filter(store.tasks(), Filter::Overdue, today);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, report.id);

    let counts = aggregate_counts(store.tasks(), today);
    assert_eq!(
        (counts.total, counts.completed, counts.pending, counts.overdue),
        (2, 0, 2, 1)
    );

    let found = search(store.tasks(), "milk");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, milk.id);
    assert_eq!(search(store.tasks(), "").len(), 2);

    store.toggle_completion(&report.id).expect("toggle");
    let counts = aggregate_counts(store.tasks(), today);
    assert_eq!(
        (counts.total, counts.completed, counts.pending, counts.overdue),
        (2, 1, 1, 0)
    );
}
