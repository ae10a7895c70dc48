//! Header with counters and the completion gauge.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the counters line and progress gauge.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let counts = app.session.counts(app.today);

    let block = Block::default()
        .title(Span::styled("TaskFlow", theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
        .border_style(theme::normal());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let stats = Line::from(vec![
        Span::styled("Total ", theme::dimmed()),
        Span::styled(counts.total.to_string(), theme::bold()),
        Span::raw("  "),
        Span::styled("Completed ", theme::dimmed()),
        Span::styled(counts.completed.to_string(), theme::bold().fg(theme::SUCCESS)),
        Span::raw("  "),
        Span::styled("Pending ", theme::dimmed()),
        Span::styled(counts.pending.to_string(), theme::bold().fg(theme::WARNING)),
        Span::raw("  "),
        Span::styled("Overdue ", theme::dimmed()),
        Span::styled(counts.overdue.to_string(), theme::bold().fg(theme::ERROR)),
    ]);
    frame.render_widget(Paragraph::new(stats), chunks[0]);

    let percent = counts.completion_percent();
    let gauge = Gauge::default()
        .gauge_style(theme::normal().fg(theme::SUCCESS))
        .percent(percent)
        .label(format!("{percent}% complete"));
    frame.render_widget(gauge, chunks[1]);
}
