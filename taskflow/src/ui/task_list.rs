//! Filter tabs, search box and the task list.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use taskflow_model::Task;

use super::{form_panel, theme};
use crate::app::{App, PanelFocus};
use crate::markup::format_due_date;
use crate::tasks::view::{self, Filter};

/// Render the list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    render_tabs(frame, chunks[0], app);
    render_search(frame, chunks[1], app);
    render_tasks(frame, chunks[2], app);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = Filter::ALL
        .iter()
        .zip(1..)
        .map(|(filter, n)| Line::from(format!("{n} {}", filter.label())));
    let tabs = Tabs::new(titles)
        .select(app.session.filter().index())
        .style(theme::dimmed())
        .highlight_style(theme::highlighted());
    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Search;
    let block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    let line = form_panel::text_line(&app.search, is_focused, "Type to search tasks...");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_tasks(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let visible = app.visible();

    let block = Block::default()
        .title(Span::styled(
            format!("Tasks ({})", visible.len()),
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    if visible.is_empty() {
        let text = vec![
            Line::from(Span::styled("No Tasks Found", theme::bold())),
            Line::from(Span::styled(app.session.empty_message(), theme::dimmed())),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .centered()
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| task_item(task, app.today))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            theme::selected()
        } else {
            theme::normal()
        })
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item(task: &Task, today: chrono::NaiveDate) -> ListItem<'_> {
    let (checkbox, title_style) = if task.completed {
        ("[✓]", theme::completed())
    } else {
        ("[ ]", theme::normal())
    };

    let mut first = vec![
        Span::styled(checkbox, title_style),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority.as_str().to_uppercase()),
            theme::bold().fg(theme::priority_color(task.priority)),
        ),
    ];
    if let Some(due) = task.due_date {
        let overdue = view::is_overdue(task, today);
        let text = if overdue {
            format!(" {} (Overdue)", format_due_date(due))
        } else {
            format!(" {}", format_due_date(due))
        };
        let style = if overdue {
            theme::bold().fg(theme::ERROR)
        } else {
            theme::dimmed()
        };
        first.push(Span::styled(text, style));
    }

    let mut lines = vec![Line::from(first)];
    if let Some(description) = &task.description {
        lines.push(Line::from(Span::styled(
            format!("    {description}"),
            theme::dimmed(),
        )));
    }
    ListItem::new(lines)
}
