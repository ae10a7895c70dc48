//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use taskflow_model::Priority;

use crate::notify::NotificationKind;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success color (completed tasks, success notifications).
pub const SUCCESS: Color = Color::Green;

/// Warning color (medium priority).
pub const WARNING: Color = Color::Yellow;

/// Error color (overdue, high priority, errors).
pub const ERROR: Color = Color::Red;

/// Info color (low priority, info notifications).
pub const INFO: Color = Color::Blue;

/// Panel title color for the form panel.
pub const FORM_TITLE: Color = Color::Magenta;

/// Panel title color for the task list panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for completed task titles.
#[must_use]
pub fn completed() -> Style {
    Style::default()
        .fg(FG_SECONDARY)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Color for a priority badge.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => INFO,
        Priority::Medium => WARNING,
        Priority::High => ERROR,
    }
}

/// Color for a notification.
#[must_use]
pub const fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => INFO,
        NotificationKind::Success => SUCCESS,
        NotificationKind::Error => ERROR,
    }
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style for a panel depending on focus.
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}
