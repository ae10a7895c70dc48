//! Integration tests for command dispatch through a session.
//!
//! Drives full user flows (add, edit, complete, delete) the way a front
//! end would and checks store contents, view state and notifications.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use taskflow::notify::{DEFAULT_NOTIFICATION_TTL, NotificationKind};
use taskflow::session::{Command, Outcome, Session};
use taskflow::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use taskflow::tasks::view::{self, Filter};
use taskflow::tasks::{DEFAULT_STORAGE_KEY, TaskStore};
use taskflow_model::{Priority, TaskInput};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn memory_session() -> Session<MemoryStorage> {
    Session::new(
        TaskStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY),
        DEFAULT_NOTIFICATION_TTL,
    )
}

fn notification<S: KeyValueStorage>(session: &Session<S>) -> Option<(String, NotificationKind)> {
    session
        .notifier()
        .current()
        .map(|n| (n.message.clone(), n.kind))
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_with_notifications() {
    let mut session = memory_session();
    let now = Instant::now();

    let Outcome::Added(task) = session.dispatch(
        Command::Submit(TaskInput::titled("Write report").with_priority(Priority::High)),
        now,
    ) else {
        panic!("expected Added");
    };
    assert_eq!(
        notification(&session),
        Some(("Task added successfully!".to_string(), NotificationKind::Success))
    );

    let Outcome::EditStarted(mut input) = session.dispatch(Command::BeginEdit(task.id.clone()), now)
    else {
        panic!("expected EditStarted");
    };
    assert_eq!(input.priority, "high");
    input.description = "Q3 numbers".to_string();
    let outcome = session.dispatch(Command::Submit(input), now);
    assert!(matches!(outcome, Outcome::Updated(ref t) if t.description.as_deref() == Some("Q3 numbers")));

    session.dispatch(Command::Toggle(task.id.clone()), now);
    assert_eq!(
        notification(&session).map(|(m, _)| m),
        Some("Task completed! \u{1f389}".to_string())
    );
    assert_eq!(session.counts(view::today()).completed, 1);

    session.dispatch(Command::RequestDelete(task.id.clone()), now);
    assert_eq!(session.pending_delete(), Some(&task.id));
    assert_eq!(
        session.dispatch(Command::ConfirmDelete, now),
        Outcome::Removed(task.id)
    );
    assert!(session.store().is_empty());
    assert_eq!(session.empty_message(), "Add your first task to get started!");
}

#[test]
fn invalid_due_date_is_rejected_with_error_notification() {
    let mut session = memory_session();
    let mut input = TaskInput::titled("Dentist");
    input.due_date = "next tuesday".to_string();

    let outcome = session.dispatch(Command::Submit(input), Instant::now());
    assert!(matches!(outcome, Outcome::Rejected(_)));
    assert_eq!(
        notification(&session).map(|(_, k)| k),
        Some(NotificationKind::Error)
    );
    assert!(session.store().is_empty());
}

#[test]
fn latest_notification_owns_the_timer() {
    let mut session = memory_session();
    let start = Instant::now();

    session.dispatch(Command::Submit(TaskInput::titled("a")), start);
    session.dispatch(
        Command::Submit(TaskInput::titled("b")),
        start + Duration::from_secs(2),
    );

    assert!(!session.tick(start + Duration::from_secs(3)));
    assert!(session.notifier().current().is_some());
    assert!(session.tick(start + Duration::from_secs(5)));
    assert!(session.notifier().current().is_none());
}

#[test]
fn filter_and_search_state_survive_mutations() {
    let mut session = memory_session().with_filter(Filter::High);
    let now = Instant::now();
    session.dispatch(
        Command::Submit(TaskInput::titled("Buy milk").with_priority(Priority::High)),
        now,
    );
    session.dispatch(Command::Submit(TaskInput::titled("Buy bread")), now);
    session.dispatch(Command::SetSearch("buy".to_string()), now);

    let today = view::today();
    assert_eq!(session.visible(today).len(), 1);
    assert_eq!(session.filter(), Filter::High);
    assert_eq!(session.query(), "buy");

    session.dispatch(Command::SetFilter(Filter::All), now);
    assert_eq!(session.visible(today).len(), 2);
}

#[test]
fn session_over_file_storage_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = TaskStore::open(
            FileStorage::open(dir.path()).expect("open"),
            DEFAULT_STORAGE_KEY,
        );
        let mut session = Session::new(store, DEFAULT_NOTIFICATION_TTL);
        session.dispatch(Command::Submit(TaskInput::titled("persist me")), Instant::now());
    }

    let store = TaskStore::open(
        FileStorage::open(dir.path()).expect("reopen"),
        DEFAULT_STORAGE_KEY,
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].title, "persist me");
}
