//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
///
/// Shows the current notification if there is one, otherwise key help for
/// the focused panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("TaskFlow", theme::bold()), Span::raw(" | ")];

    if let Some(notification) = app.session.notifier().current() {
        spans.push(Span::styled(
            notification.message.as_str(),
            theme::bold().fg(theme::notification_color(notification.kind)),
        ));
    } else {
        let help_text = match app.focus {
            PanelFocus::Form => "Tab: switch panel | ↑↓: field | Enter: save | Esc: quit",
            PanelFocus::Search => "Tab: switch panel | type to filter | Enter: go to list | Esc: quit",
            PanelFocus::List => {
                "↑↓/jk: navigate | Space: toggle | e: edit | d: delete | ←→/1-5: filter | /: search"
            }
        };
        spans.push(Span::styled(help_text, theme::dimmed()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
