//! Pure display projection over the task collection.
//!
//! Nothing here mutates a task. The current date is passed in explicitly
//! so results are deterministic for a given `today`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use taskflow_model::{Priority, Task};

/// Message shown when a non-empty search matched nothing.
pub const SEARCH_EMPTY_MESSAGE: &str = "No tasks match your search criteria.";

/// Which subset of tasks to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Completed tasks.
    Completed,
    /// Incomplete tasks.
    Pending,
    /// High-priority tasks, complete or not.
    High,
    /// Incomplete tasks whose due date has passed.
    Overdue,
}

impl Filter {
    /// All filters in tab order.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Completed,
        Self::Pending,
        Self::High,
        Self::Overdue,
    ];

    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::High => "high",
            Self::Overdue => "overdue",
        }
    }

    /// Human-readable tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::High => "High Priority",
            Self::Overdue => "Overdue",
        }
    }

    /// Position in [`Filter::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Completed => 1,
            Self::Pending => 2,
            Self::High => 3,
            Self::Overdue => 4,
        }
    }

    /// Next filter in tab order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous filter in tab order, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether `task` belongs to this filter on `today`.
    #[must_use]
    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
            Self::High => task.priority == Priority::High,
            Self::Overdue => is_overdue(task, today),
        }
    }

    /// Message for an empty list under this filter.
    #[must_use]
    pub const fn empty_state_message(self) -> &'static str {
        match self {
            Self::All => "Add your first task to get started!",
            Self::Completed => "No completed tasks yet. Keep working!",
            Self::Pending => "No pending tasks. Great job!",
            Self::High => "No high priority tasks.",
            Self::Overdue => "No overdue tasks. Excellent!",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0:?} (expected all, completed, pending, high or overdue)")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// Counters shown above the list. Always computed over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    /// Number of tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// `total - completed`.
    pub pending: usize,
    /// Incomplete tasks past their due date.
    pub overdue: usize,
}

impl TaskCounts {
    /// Completed share as a whole percentage; 0 for an empty collection.
    #[must_use]
    pub fn completion_percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        u16::try_from(self.completed * 100 / self.total).unwrap_or(100)
    }
}

/// Today's date in the local timezone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// An incomplete task whose due date is strictly before `today`.
#[must_use]
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < today)
}

/// Tasks matching `filter`, in collection order.
#[must_use]
pub fn filter(tasks: &[Task], filter: Filter, today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t, today)).collect()
}

/// Tasks whose title or description contains `query`, ignoring case.
///
/// An empty query keeps every task. A task without a description can only
/// match on its title.
#[must_use]
pub fn search<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    if query.is_empty() {
        return tasks.into_iter().collect();
    }
    let needle = query.to_lowercase();
    tasks
        .into_iter()
        .filter(|t| t.matches_lowercase(&needle))
        .collect()
}

/// Display comparison between two tasks.
///
/// 1. Incomplete before completed.
/// 2. Higher priority first.
/// 3. When both have a due date, the earlier one first (equal dates tie).
/// 4. Otherwise the more recently created first.
///
/// Step 4 also applies when only one of the two has a due date, so the
/// relation is not transitive across mixed dated/undated tasks.
#[must_use]
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(da), Some(db)) => da.cmp(&db),
            _ => b.created_at.cmp(&a.created_at),
        })
}

/// Sorts `tasks` in place by [`display_order`].
///
/// Stable insertion sort: `display_order` is not a total order, and the
/// standard library sorts may panic when handed one.
pub fn sort_for_display(tasks: &mut [&Task]) {
    for i in 1..tasks.len() {
        let mut j = i;
        while j > 0 && display_order(tasks[j - 1], tasks[j]) == Ordering::Greater {
            tasks.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// The list to render: `filter`, then `search`, then `sort_for_display`.
#[must_use]
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    active: Filter,
    query: &str,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let mut visible = search(filter(tasks, active, today), query);
    sort_for_display(&mut visible);
    visible
}

/// Global counters over the full collection.
#[must_use]
pub fn aggregate_counts(tasks: &[Task], today: NaiveDate) -> TaskCounts {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| is_overdue(t, today)).count();
    TaskCounts {
        total,
        completed,
        pending: total - completed,
        overdue,
    }
}

/// Message for an empty rendered list.
#[must_use]
pub const fn empty_state_message(filter: Filter) -> &'static str {
    filter.empty_state_message()
}

/// Message for an empty rendered list, preferring the search message when
/// a query is active.
#[must_use]
pub const fn empty_list_message(filter: Filter, query: &str) -> &'static str {
    if query.is_empty() {
        filter.empty_state_message()
    } else {
        SEARCH_EMPTY_MESSAGE
    }
}
