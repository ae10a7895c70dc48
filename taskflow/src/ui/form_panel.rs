//! Add/edit form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use taskflow_model::Priority;

use super::theme;
use crate::app::{App, FormField, PanelFocus, TextField};

/// Render the form with its four fields.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Form;
    let form = &app.form;
    let active = |field: FormField| is_focused && form.active == field;

    let mut lines = Vec::new();
    lines.push(label("Title", active(FormField::Title)));
    lines.push(text_line(&form.title, active(FormField::Title), "What needs doing?"));
    lines.push(Line::default());
    lines.push(label("Description", active(FormField::Description)));
    lines.push(text_line(&form.description, active(FormField::Description), "Optional"));
    lines.push(Line::default());
    lines.push(label("Priority", active(FormField::Priority)));
    lines.push(priority_line(form.priority));
    lines.push(Line::default());
    lines.push(label("Due date", active(FormField::DueDate)));
    lines.push(text_line(&form.due_date, active(FormField::DueDate), "YYYY-MM-DD"));
    lines.push(Line::default());

    let submit = if app.session.editing().is_some() {
        "Enter/Ctrl-S: update task | Esc: cancel edit"
    } else {
        "Enter/Ctrl-S: add task"
    };
    lines.push(Line::from(Span::styled(submit, theme::dimmed())));

    let title = if app.session.editing().is_some() {
        "Edit Task"
    } else {
        "Add Task"
    };
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn label(text: &str, active: bool) -> Line<'_> {
    let style = if active { theme::highlighted() } else { theme::dimmed() };
    Line::from(Span::styled(text, style))
}

/// One input line; the active field shows a block cursor.
pub fn text_line<'a>(field: &'a TextField, active: bool, placeholder: &'a str) -> Line<'a> {
    if !active {
        return if field.value().is_empty() {
            Line::from(Span::styled(placeholder, theme::dimmed()))
        } else {
            Line::from(Span::styled(field.value(), theme::normal()))
        };
    }

    let mut display = field.value().to_string();
    let at = display
        .char_indices()
        .nth(field.cursor())
        .map_or(display.len(), |(i, _)| i);
    display.insert(at, '█');
    Line::from(Span::styled(display, theme::normal()))
}

fn priority_line(current: Priority) -> Line<'static> {
    let mut spans = Vec::new();
    for priority in Priority::ALL {
        let style = if priority == current {
            theme::bold().fg(theme::priority_color(priority))
        } else {
            theme::dimmed()
        };
        let marker = if priority == current { "(•) " } else { "( ) " };
        spans.push(Span::styled(format!("{marker}{}", priority.as_str()), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}
