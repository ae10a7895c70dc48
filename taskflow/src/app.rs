//! Application state and key handling for the terminal front end.
//!
//! Key events are translated into [`Command`]s and routed through the
//! [`Session`]; this module never touches the store directly.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskflow_model::{Priority, Task, TaskId, TaskInput};

use crate::session::{Command, Outcome, Session};
use crate::storage::KeyValueStorage;
use crate::tasks::TaskStore;
use crate::tasks::view::{self, Filter};

/// Storage type used by the terminal app.
pub type DynStorage = Box<dyn KeyValueStorage>;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The add/edit form (default).
    Form,
    /// The search box.
    Search,
    /// The task list.
    List,
}

/// Which form field has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title input.
    Title,
    /// Description input.
    Description,
    /// Priority selector.
    Priority,
    /// Due date input.
    DueDate,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::DueDate,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::DueDate => Self::Priority,
        }
    }
}

/// A single-line text input with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position as a character index.
    cursor: usize,
}

impl TextField {
    /// Creates a field holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of the cursor.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns `true` if one was deleted.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.value.remove(at);
        true
    }

    /// Moves the cursor left.
    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Applies an editing key. Returns `true` if the text changed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Left => {
                self.left();
                false
            }
            KeyCode::Right => {
                self.right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            _ => false,
        }
    }
}

/// The add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Title input.
    pub title: TextField,
    /// Description input.
    pub description: TextField,
    /// Selected priority.
    pub priority: Priority,
    /// Due date input (`YYYY-MM-DD`).
    pub due_date: TextField,
    /// Field with the cursor.
    pub active: FormField,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: TextField::default(),
            description: TextField::default(),
            priority: Priority::default(),
            due_date: TextField::default(),
            active: FormField::Title,
        }
    }
}

impl TaskForm {
    /// Builds the payload for a `Submit` command.
    #[must_use]
    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.value().to_string(),
            description: self.description.value().to_string(),
            priority: self.priority.to_string(),
            due_date: self.due_date.value().to_string(),
        }
    }

    /// Refills the form from a task's fields.
    pub fn load(&mut self, input: &TaskInput) {
        self.title = TextField::with_value(input.title.clone());
        self.description = TextField::with_value(input.description.clone());
        self.priority = input.priority.parse().unwrap_or_default();
        self.due_date = TextField::with_value(input.due_date.clone());
        self.active = FormField::Title;
    }

    /// Empties every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (self.active, key.code) {
            (_, KeyCode::Up) => self.active = self.active.prev(),
            (_, KeyCode::Down) => self.active = self.active.next(),
            (FormField::Priority, KeyCode::Left) => {
                self.priority = self.priority.next().next();
            }
            (FormField::Priority, KeyCode::Right | KeyCode::Char(' ')) => {
                self.priority = self.priority.next();
            }
            (FormField::Priority, KeyCode::Char(c)) => {
                if let Some(p) = Priority::ALL
                    .into_iter()
                    .find(|p| p.as_str().starts_with(c.to_ascii_lowercase()))
                {
                    self.priority = p;
                }
            }
            (FormField::Title, _) => {
                self.title.handle_key(key);
            }
            (FormField::Description, _) => {
                self.description.handle_key(key);
            }
            (FormField::DueDate, _) => {
                self.due_date.handle_key(key);
            }
            (FormField::Priority, _) => {}
        }
    }
}

/// Main application state.
pub struct App {
    /// Store, view state and notifications.
    pub session: Session<DynStorage>,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// The add/edit form.
    pub form: TaskForm,
    /// Search input; mirrored into the session on every change.
    pub search: TextField,
    /// Selected row in the visible list.
    pub selected: usize,
    /// Date used for overdue checks; refreshed on every tick.
    pub today: NaiveDate,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app over an opened store.
    #[must_use]
    pub fn new(store: TaskStore<DynStorage>, notification_ttl: Duration, filter: Filter) -> Self {
        Self {
            session: Session::new(store, notification_ttl).with_filter(filter),
            focus: PanelFocus::Form,
            form: TaskForm::default(),
            search: TextField::default(),
            selected: 0,
            today: view::today(),
            should_quit: false,
        }
    }

    /// Tasks currently shown, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.session.visible(self.today)
    }

    /// ID of the selected visible task.
    #[must_use]
    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible().get(self.selected).map(|t| t.id.clone())
    }

    /// Advances timers: notification expiry and the current date.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.today = view::today();
        self.clamp_selection();
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.session.pending_delete().is_some() {
            self.handle_confirm_key(key, now);
            return;
        }

        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.submit(now);
                return;
            }
            (KeyCode::Esc, _) => {
                if self.session.editing().is_some() {
                    self.dispatch(Command::CancelEdit, now);
                } else {
                    self.should_quit = true;
                }
                return;
            }
            (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                return;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Form => self.handle_form_key(key, now),
            PanelFocus::Search => self.handle_search_key(key, now),
            PanelFocus::List => self.handle_list_key(key, now),
        }
    }

    /// Routes a command through the session and applies UI side effects.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Outcome {
        let edit_target = self.session.editing().cloned();
        let outcome = self.session.dispatch(command, now);
        match &outcome {
            Outcome::Added(_) | Outcome::Updated(_) | Outcome::EditCancelled => {
                self.form.reset();
            }
            Outcome::Removed(id) if edit_target.as_ref() == Some(id) => {
                self.form.reset();
            }
            Outcome::EditStarted(input) => {
                self.form.load(input);
                self.focus = PanelFocus::Form;
            }
            Outcome::ViewChanged => self.selected = 0,
            _ => {}
        }
        self.clamp_selection();
        outcome
    }

    fn submit(&mut self, now: Instant) {
        let input = self.form.to_input();
        self.dispatch(Command::Submit(input), now);
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                self.dispatch(Command::ConfirmDelete, now);
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.dispatch(Command::CancelDelete, now);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Enter {
            self.submit(now);
        } else {
            self.form.handle_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter | KeyCode::Down => self.focus = PanelFocus::List,
            _ => {
                if self.search.handle_key(key) {
                    let query = self.search.value().to_string();
                    self.dispatch(Command::SetSearch(query), now);
                }
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Command::Toggle(id), now);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Command::BeginEdit(id), now);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Command::RequestDelete(id), now);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let filter = self.session.filter().prev();
                self.dispatch(Command::SetFilter(filter), now);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let filter = self.session.filter().next();
                self.dispatch(Command::SetFilter(filter), now);
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some((filter, _)) = Filter::ALL.into_iter().zip('1'..='5').find(|(_, k)| *k == c) {
                    self.dispatch(Command::SetFilter(filter), now);
                }
            }
            KeyCode::Char('/') => self.focus = PanelFocus::Search,
            KeyCode::Char('a') => {
                self.focus = PanelFocus::Form;
                self.form.active = FormField::Title;
            }
            _ => {}
        }
    }

    /// Cycle focus forward: Form -> Search -> List -> Form.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Form => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::List,
            PanelFocus::List => PanelFocus::Form,
        };
    }

    /// Cycle focus backward: Form -> List -> Search -> Form.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Form => PanelFocus::List,
            PanelFocus::List => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::Form,
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
