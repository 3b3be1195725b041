// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::collections::BTreeMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tablero_app::{
    CommitPlan, EditMode, Record, RecordId, Value, WorkbenchCommand, WorkbenchState, infer_schema,
};

/// The remote collaborator as the UI sees it. The CLI wires this to the REST
/// client, tests and demo mode to the in-memory backend.
pub trait AppRuntime {
    fn list_tables(&mut self) -> Result<Vec<String>>;
    fn create_table(&mut self, name: &str) -> Result<()>;
    fn delete_table(&mut self, name: &str) -> Result<()>;
    fn create_index(&mut self, table: &str, field: &str) -> Result<()>;
    fn list_records(&mut self, table: &str) -> Result<Vec<Record>>;
    fn create_record(&mut self, table: &str, fields: &BTreeMap<String, Value>) -> Result<()>;
    fn update_record(
        &mut self,
        table: &str,
        id: RecordId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<()>;
    fn delete_record(&mut self, table: &str, id: RecordId) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub confirm_destructive: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            confirm_destructive: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Tables,
    Records,
    Staging,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Tables => Self::Records,
            Self::Records => Self::Staging,
            Self::Staging => Self::Tables,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Tables => Self::Staging,
            Self::Records => Self::Tables,
            Self::Staging => Self::Records,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Records => "records",
            Self::Staging => "staging",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PromptKind {
    NewTable,
    IndexField,
    FieldName,
    FieldValue { name: String },
    StagedValue { name: String },
}

#[derive(Debug, Clone, PartialEq)]
struct PromptUiState {
    kind: PromptKind,
    buffer: String,
    // Cycles through the inferred schema on Tab, mirroring the "pick an
    // existing field" selector next to the manual name entry.
    suggestion: Option<usize>,
}

impl PromptUiState {
    fn open(kind: PromptKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            suggestion: None,
        }
    }

    fn with_buffer(kind: PromptKind, buffer: String) -> Self {
        Self {
            kind,
            buffer,
            suggestion: None,
        }
    }

    fn title(&self) -> String {
        match &self.kind {
            PromptKind::NewTable => "new table name".to_owned(),
            PromptKind::IndexField => "index field".to_owned(),
            PromptKind::FieldName => "field name (Tab: existing fields)".to_owned(),
            PromptKind::FieldValue { name } => format!("value for '{name}'"),
            PromptKind::StagedValue { name } => format!("edit '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ConfirmAction {
    DeleteTable(String),
    DeleteRecord(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
struct ConfirmUiState {
    action: ConfirmAction,
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    tables: Vec<String>,
    table_cursor: usize,
    records: Vec<Record>,
    schema: Vec<String>,
    record_cursor: usize,
    staged_cursor: usize,
    prompt: Option<PromptUiState>,
    confirm: Option<ConfirmUiState>,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let mut focus = Focus::Tables;
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_tables(runtime, &mut view_data) {
        state.dispatch(WorkbenchCommand::SetStatus(format!(
            "table list failed: {error}"
        )));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data, focus)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(
                        state,
                        runtime,
                        &mut view_data,
                        &mut focus,
                        &internal_tx,
                        options,
                        key,
                    ) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut WorkbenchState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(WorkbenchCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut WorkbenchState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(WorkbenchCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_tables<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.tables = runtime.list_tables()?;
    if view_data.table_cursor >= view_data.tables.len() {
        view_data.table_cursor = view_data.tables.len().saturating_sub(1);
    }
    Ok(())
}

/// Re-fetches the active table's records and re-infers the schema. The new
/// schema replaces the old one outright; it is never merged.
fn refresh_records<R: AppRuntime>(
    state: &WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let Some(table) = &state.active_table else {
        view_data.records.clear();
        view_data.schema.clear();
        view_data.record_cursor = 0;
        return Ok(());
    };

    view_data.records = runtime.list_records(table)?;
    view_data.schema = infer_schema(&view_data.records).into_iter().collect();
    if view_data.record_cursor >= view_data.records.len() {
        view_data.record_cursor = view_data.records.len().saturating_sub(1);
    }
    Ok(())
}

fn select_table<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    name: String,
) {
    state.dispatch(WorkbenchCommand::SelectTable(name.clone()));
    if let Err(error) = refresh_records(state, runtime, view_data) {
        view_data.records.clear();
        view_data.schema.clear();
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("load '{name}' failed: {error}"),
        );
    }
}

/// Issues the planned remote call, then clears staging and refreshes. On a
/// remote failure nothing after the call runs: the staged data stays put so
/// the operator can retry.
fn commit<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let plan = match state.plan_commit() {
        Ok(plan) => plan,
        Err(error) => {
            emit_status(state, view_data, internal_tx, error.to_string());
            return;
        }
    };

    let (result, done_message) = match &plan {
        CommitPlan::Create { table, payload } => {
            (runtime.create_record(table, payload), "record inserted")
        }
        CommitPlan::Replace { table, id, payload } => {
            (runtime.update_record(table, *id, payload), "record saved")
        }
    };

    match result {
        Ok(()) => {
            state.dispatch(WorkbenchCommand::FinishCommit);
            if let Err(error) = refresh_records(state, runtime, view_data) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("refresh failed: {error}"),
                );
            } else {
                emit_status(state, view_data, internal_tx, done_message);
            }
        }
        Err(error) => {
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("commit failed: {error}"),
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_key_event<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    focus: &mut Focus,
    internal_tx: &Sender<InternalEvent>,
    options: UiOptions,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    if view_data.prompt.is_some() {
        handle_prompt_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.confirm.is_some() {
        handle_confirm_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => *focus = focus.next(),
        KeyCode::BackTab => *focus = focus.prev(),
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Up | KeyCode::Char('k') => move_cursor(state, view_data, *focus, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(state, view_data, *focus, 1),
        KeyCode::Char('r') => {
            if let Err(error) = refresh_tables(runtime, view_data)
                .and_then(|()| refresh_records(state, runtime, view_data))
            {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("refresh failed: {error}"),
                );
            }
        }
        KeyCode::Enter => handle_enter(state, runtime, view_data, internal_tx, *focus),
        KeyCode::Char('e') if *focus == Focus::Records => {
            begin_edit(state, view_data);
        }
        KeyCode::Char('n') if *focus == Focus::Tables => {
            view_data.prompt = Some(PromptUiState::open(PromptKind::NewTable));
        }
        KeyCode::Char('a') => {
            view_data.prompt = Some(PromptUiState::open(PromptKind::FieldName));
        }
        KeyCode::Char('x') => {
            if state.active_table.is_none() {
                emit_status(state, view_data, internal_tx, "select a table first");
            } else {
                view_data.prompt = Some(PromptUiState::open(PromptKind::IndexField));
            }
        }
        KeyCode::Char('c') => commit(state, runtime, view_data, internal_tx),
        KeyCode::Char('d') => handle_delete(state, runtime, view_data, internal_tx, options, *focus),
        KeyCode::Esc => {
            if state.mode != EditMode::Inserting {
                state.dispatch(WorkbenchCommand::CancelEdit);
                emit_status(state, view_data, internal_tx, "edit cancelled");
            } else {
                state.dispatch(WorkbenchCommand::ClearStatus);
            }
        }
        _ => {}
    }
    false
}

fn move_cursor(state: &WorkbenchState, view_data: &mut ViewData, focus: Focus, delta: isize) {
    let (cursor, len) = match focus {
        Focus::Tables => (&mut view_data.table_cursor, view_data.tables.len()),
        Focus::Records => (&mut view_data.record_cursor, view_data.records.len()),
        Focus::Staging => (&mut view_data.staged_cursor, state.staging.len()),
    };
    if len == 0 {
        return;
    }
    let current = *cursor as isize;
    *cursor = (current + delta).rem_euclid(len as isize) as usize;
}

fn handle_enter<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    focus: Focus,
) {
    match focus {
        Focus::Tables => {
            let Some(name) = view_data.tables.get(view_data.table_cursor).cloned() else {
                return;
            };
            select_table(state, runtime, view_data, internal_tx, name);
        }
        Focus::Records => begin_edit(state, view_data),
        Focus::Staging => {
            let Some((name, value)) = staged_entry_at(state, view_data.staged_cursor) else {
                return;
            };
            view_data.prompt = Some(PromptUiState::with_buffer(
                PromptKind::StagedValue { name },
                value.to_string(),
            ));
        }
    }
}

fn staged_entry_at(state: &WorkbenchState, index: usize) -> Option<(String, Value)> {
    state
        .staging
        .iter()
        .nth(index.min(state.staging.len().saturating_sub(1)))
        .map(|(name, value)| (name.clone(), value.clone()))
}

fn begin_edit(state: &mut WorkbenchState, view_data: &mut ViewData) {
    let Some(record) = view_data.records.get(view_data.record_cursor).cloned() else {
        return;
    };
    state.dispatch(WorkbenchCommand::BeginEdit(record));
    view_data.staged_cursor = 0;
}

fn handle_delete<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: UiOptions,
    focus: Focus,
) {
    match focus {
        Focus::Tables => {
            let Some(name) = view_data.tables.get(view_data.table_cursor).cloned() else {
                return;
            };
            let action = ConfirmAction::DeleteTable(name.clone());
            if options.confirm_destructive {
                view_data.confirm = Some(ConfirmUiState {
                    message: format!("delete table '{name}'? this cannot be undone (y/n)"),
                    action,
                });
            } else {
                perform_confirmed(state, runtime, view_data, internal_tx, action);
            }
        }
        Focus::Records => {
            let Some(record) = view_data.records.get(view_data.record_cursor) else {
                return;
            };
            let action = ConfirmAction::DeleteRecord(record.id);
            if options.confirm_destructive {
                view_data.confirm = Some(ConfirmUiState {
                    message: format!("delete record {}? (y/n)", record.id.get()),
                    action,
                });
            } else {
                perform_confirmed(state, runtime, view_data, internal_tx, action);
            }
        }
        Focus::Staging => {
            if let Some((name, _)) = staged_entry_at(state, view_data.staged_cursor) {
                state.staging.remove_field(&name);
                view_data.staged_cursor = view_data.staged_cursor.saturating_sub(1);
            }
        }
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(confirm) = view_data.confirm.take() {
                perform_confirmed(state, runtime, view_data, internal_tx, confirm.action);
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => view_data.confirm = None,
        _ => {}
    }
}

fn perform_confirmed<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: ConfirmAction,
) {
    match action {
        ConfirmAction::DeleteTable(name) => match runtime.delete_table(&name) {
            Ok(()) => {
                if state.active_table.as_deref() == Some(name.as_str()) {
                    state.dispatch(WorkbenchCommand::DeselectTable);
                    view_data.records.clear();
                    view_data.schema.clear();
                }
                if let Err(error) = refresh_tables(runtime, view_data) {
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        format!("table list failed: {error}"),
                    );
                } else {
                    emit_status(state, view_data, internal_tx, format!("table '{name}' deleted"));
                }
            }
            Err(error) => emit_status(
                state,
                view_data,
                internal_tx,
                format!("delete table failed: {error}"),
            ),
        },
        ConfirmAction::DeleteRecord(id) => {
            let Some(table) = state.active_table.clone() else {
                return;
            };
            match runtime.delete_record(&table, id) {
                Ok(()) => {
                    if let Err(error) = refresh_records(state, runtime, view_data) {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("refresh failed: {error}"),
                        );
                    } else {
                        emit_status(state, view_data, internal_tx, "record deleted");
                    }
                }
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("delete record failed: {error}"),
                ),
            }
        }
    }
}

fn handle_prompt_key<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(mut prompt) = view_data.prompt.take() else {
        return;
    };

    match key.code {
        KeyCode::Esc => return,
        KeyCode::Enter => {
            submit_prompt(state, runtime, view_data, internal_tx, prompt);
            return;
        }
        KeyCode::Backspace => {
            prompt.buffer.pop();
            prompt.suggestion = None;
            if let PromptKind::StagedValue { name } = &prompt.kind {
                state.staging.overwrite_value(name, &prompt.buffer);
            }
        }
        KeyCode::Tab if prompt.kind == PromptKind::FieldName => {
            if !view_data.schema.is_empty() {
                let next = match prompt.suggestion {
                    Some(index) => (index + 1) % view_data.schema.len(),
                    None => 0,
                };
                prompt.suggestion = Some(next);
                prompt.buffer = view_data.schema[next].clone();
            }
        }
        KeyCode::Char(ch) => {
            prompt.buffer.push(ch);
            prompt.suggestion = None;
            // Staged values re-coerce on every keystroke, so the buffer
            // representation tracks live input.
            if let PromptKind::StagedValue { name } = &prompt.kind {
                state.staging.overwrite_value(name, &prompt.buffer);
            }
        }
        _ => {}
    }

    view_data.prompt = Some(prompt);
}

fn submit_prompt<R: AppRuntime>(
    state: &mut WorkbenchState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    prompt: PromptUiState,
) {
    match prompt.kind {
        PromptKind::NewTable => {
            let name = prompt.buffer.trim().to_owned();
            if name.is_empty() {
                emit_status(state, view_data, internal_tx, "table name required");
                return;
            }
            match runtime.create_table(&name) {
                Ok(()) => {
                    if let Err(error) = refresh_tables(runtime, view_data) {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("table list failed: {error}"),
                        );
                    } else {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("table '{name}' created"),
                        );
                    }
                }
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("create table failed: {error}"),
                ),
            }
        }
        PromptKind::IndexField => {
            let field = prompt.buffer.trim().to_owned();
            if field.is_empty() {
                emit_status(state, view_data, internal_tx, "field name required");
                return;
            }
            let Some(table) = state.active_table.clone() else {
                emit_status(state, view_data, internal_tx, "select a table first");
                return;
            };
            match runtime.create_index(&table, &field) {
                Ok(()) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("index on '{field}' created (applies where the field exists)"),
                ),
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("create index failed: {error}"),
                ),
            }
        }
        PromptKind::FieldName => {
            let name = prompt.buffer.trim().to_owned();
            if name.is_empty() {
                emit_status(state, view_data, internal_tx, "field name required");
                return;
            }
            view_data.prompt = Some(PromptUiState::open(PromptKind::FieldValue { name }));
        }
        PromptKind::FieldValue { name } => {
            if let Err(error) = state.staging.stage_field(&name, &prompt.buffer) {
                emit_status(state, view_data, internal_tx, error.to_string());
            }
        }
        // Edits were applied live on each keystroke; Enter only closes.
        PromptKind::StagedValue { .. } => {}
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &WorkbenchState,
    view_data: &ViewData,
    focus: Focus,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(title_text(state))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("tablero").borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(layout[1]);

    render_tables_pane(frame, body[0], view_data, focus);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body[1]);

    render_records_pane(frame, right[0], state, view_data, focus);
    render_staging_pane(frame, right[1], state, view_data, focus);

    let status = Paragraph::new(status_text(state, focus))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(prompt) = &view_data.prompt {
        let area = centered_rect(60, 20, frame.area());
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(format!("{}\u{2588}", prompt.buffer)).block(
            Block::default()
                .title(prompt.title())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(widget, area);
    }

    if let Some(confirm) = &view_data.confirm {
        let area = centered_rect(52, 20, frame.area());
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(confirm.message.clone()).block(
            Block::default()
                .title("confirm")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(widget, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn title_text(state: &WorkbenchState) -> String {
    let table = state
        .active_table
        .as_deref()
        .unwrap_or("no table selected");
    format!("{} | {}", table, mode_label(state.mode))
}

fn mode_label(mode: EditMode) -> String {
    match mode {
        EditMode::Inserting => "insert record".to_owned(),
        EditMode::Editing(id) => format!("edit record {}", id.get()),
    }
}

fn render_tables_pane(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view_data: &ViewData,
    focus: Focus,
) {
    let mut lines = Vec::new();
    if view_data.tables.is_empty() {
        lines.push("(no tables)".to_owned());
    }
    for (index, name) in view_data.tables.iter().enumerate() {
        let marker = if index == view_data.table_cursor {
            "\u{25b8} "
        } else {
            "  "
        };
        lines.push(format!("{marker}{name}"));
    }

    let widget = Paragraph::new(lines.join("\n")).block(pane_block("tablas", focus == Focus::Tables));
    frame.render_widget(widget, area);
}

fn render_records_pane(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &WorkbenchState,
    view_data: &ViewData,
    focus: Focus,
) {
    let block = pane_block("records", focus == Focus::Records);

    if state.active_table.is_none() {
        let widget = Paragraph::new("select a table to see its records").block(block);
        frame.render_widget(widget, area);
        return;
    }

    if view_data.records.is_empty() {
        // Placeholder header: an empty table has no inferable columns.
        let widget = Paragraph::new("id | (no fields)\n\n(no records)").block(block);
        frame.render_widget(widget, area);
        return;
    }

    let mut header_cells = vec![Cell::from("id")];
    header_cells.extend(view_data.schema.iter().map(|name| Cell::from(name.clone())));
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view_data.records.iter().enumerate().map(|(index, record)| {
        let mut cells = vec![Cell::from(record.id.get().to_string())];
        cells.extend(view_data.schema.iter().map(|column| {
            Cell::from(
                record
                    .fields
                    .get(column)
                    .map(Value::to_string)
                    .unwrap_or_default(),
            )
        }));
        let row = Row::new(cells);
        if index == view_data.record_cursor {
            row.style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            row
        }
    });

    let column_count = view_data.schema.len() + 1;
    let widths = vec![Constraint::Ratio(1, column_count as u32); column_count];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_staging_pane(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &WorkbenchState,
    view_data: &ViewData,
    focus: Focus,
) {
    let mut lines = Vec::new();
    if state.staging.is_empty() {
        lines.push("(nothing staged -- press 'a' to add a field)".to_owned());
    }
    let cursor = view_data
        .staged_cursor
        .min(state.staging.len().saturating_sub(1));
    for (index, (name, value)) in state.staging.iter().enumerate() {
        let marker = if index == cursor { "\u{25b8} " } else { "  " };
        let kind = if value.is_numeric() { "number" } else { "text" };
        lines.push(format!("{marker}{name} = {value} ({kind})"));
    }

    let widget = Paragraph::new(lines.join("\n"))
        .block(pane_block(&mode_label(state.mode), focus == Focus::Staging));
    frame.render_widget(widget, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    Block::default()
        .title(title.to_owned())
        .borders(Borders::ALL)
        .style(style)
}

fn status_text(state: &WorkbenchState, focus: Focus) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    format!(
        "[{}] Tab: pane | Enter: open/edit | a: stage field | c: commit | d: delete | x: index | n: new table | ?: help | q: quit",
        focus.label()
    )
}

fn help_overlay_text() -> String {
    [
        "Tab / Shift-Tab  switch pane",
        "j/k or arrows    move cursor",
        "Enter            tables: open -- records: edit -- staging: edit value",
        "e                edit the selected record",
        "a                stage a field (Tab cycles existing field names)",
        "d                delete table/record, or unstage a field",
        "c                commit: insert, or save when editing",
        "Esc              cancel the edit in progress",
        "x                create an index on the active table",
        "n                create a table",
        "r                refresh tables and records",
        "q / Ctrl-q       quit",
        "",
        "Values that parse as numbers are stored as numbers; anything",
        "else is stored as text. Empty input stays an empty string.",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
