//! HTML rendering of the task list.
//!
//! Produces markup fragments for embedding in a page. User-supplied text is
//! always passed through [`escape_html`]. Row actions are expressed as
//! `data-action` / `data-task-id` attributes for a delegated event handler
//! to route, rather than inline script.

use std::fmt::Write as _;

use chrono::NaiveDate;
use taskflow_model::Task;

use crate::tasks::view::{self, Filter};

/// Escapes the five HTML-significant characters `& < > " '`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a due date as e.g. `Jan 5, 2025`.
#[must_use]
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Renders one task row.
#[must_use]
pub fn render_task(task: &Task, today: NaiveDate) -> String {
    let id = escape_html(task.id.as_str());
    let overdue = view::is_overdue(task, today);
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="task-item{}" data-task-id="{id}">"#,
        if task.completed { " completed" } else { "" }
    );
    let _ = write!(
        html,
        r#"<div class="task-checkbox{}" data-action="toggle" data-task-id="{id}">{}</div>"#,
        if task.completed { " checked" } else { "" },
        if task.completed { "\u{2713}" } else { "" }
    );
    html.push_str(r#"<div class="task-details">"#);
    let _ = write!(
        html,
        r#"<h3 class="task-title">{}</h3>"#,
        escape_html(&task.title)
    );
    if let Some(description) = &task.description {
        let _ = write!(
            html,
            r#"<p class="task-description">{}</p>"#,
            escape_html(description)
        );
    }

    html.push_str(r#"<div class="task-meta">"#);
    let _ = write!(
        html,
        r#"<span class="task-priority priority-{}">{}</span>"#,
        task.priority,
        task.priority.as_str().to_uppercase()
    );
    if let Some(due) = task.due_date {
        let _ = write!(
            html,
            r#"<span class="task-due-date{}">📅 {}{}</span>"#,
            if overdue { " overdue" } else { "" },
            format_due_date(due),
            if overdue { " (Overdue)" } else { "" }
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        r#"<div class="task-actions"><button class="task-btn edit" data-action="edit" data-task-id="{id}">Edit</button><button class="task-btn delete" data-action="delete" data-task-id="{id}">Delete</button></div>"#
    );
    html.push_str("</div></div>");
    html
}

/// Renders the empty-state block.
#[must_use]
pub fn render_empty_state(message: &str) -> String {
    format!(
        r#"<div class="empty-state"><h3>No Tasks Found</h3><p>{}</p></div>"#,
        escape_html(message)
    )
}

/// Renders the visible list for `filter` and `query`, or the empty state.
#[must_use]
pub fn render_task_list(tasks: &[Task], filter: Filter, query: &str, today: NaiveDate) -> String {
    let visible = view::visible_tasks(tasks, filter, query, today);
    if visible.is_empty() {
        return render_empty_state(view::empty_list_message(filter, query));
    }
    visible.iter().map(|t| render_task(t, today)).collect()
}
