//! Terminal UI rendering.

pub mod form_panel;
pub mod header;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header, content, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Form
            Constraint::Percentage(65), // List
        ])
        .split(main_chunks[1]);

    header::render(frame, main_chunks[0], app);
    form_panel::render(frame, content_chunks[0], app);
    task_list::render(frame, content_chunks[1], app);
    status_bar::render(frame, main_chunks[2], app);

    if app.session.pending_delete().is_some() {
        render_delete_confirm(frame, app);
    }
}

/// Render the delete confirmation popup over the list.
fn render_delete_confirm(frame: &mut Frame, app: &App) {
    let title = app
        .session
        .pending_delete()
        .and_then(|id| app.session.store().get(id))
        .map_or("", |t| t.title.as_str());

    let area = centered(frame.area(), 44, 6);
    let text = vec![
        Line::from("Are you sure you want to delete this task?"),
        Line::from(Span::styled(title.to_string(), theme::bold())),
        Line::from(Span::styled("y: delete | n/Esc: keep", theme::dimmed())),
    ];

    let block = Block::default()
        .title("Delete Task")
        .borders(Borders::ALL)
        .border_style(theme::panel_title(theme::ERROR));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
