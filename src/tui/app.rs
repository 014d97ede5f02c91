use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;

use crate::color::{ColorEngine, ColorError, ObjectKind};
use crate::io::task_cmd::{TaskAction, TaskError, TaskTool};
use crate::model::{Config, Record, RecordStore};
use crate::ops::command::{Command, Setting, parse_command};
use crate::ops::{search, sort};
use crate::template::{RenderContext, Template, VarValue, VariableTable, compile, evaluate_line};

use super::input;
use super::keys::{Action, KeyMap};
use super::render;

pub const PROGRAM_NAME: &str = "tasknc";
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROGRAM_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Color rules installed before the user's own
const DEFAULT_COLORS: &[(ObjectKind, Option<&str>, &str, &str)] = &[
    (ObjectKind::Header, None, "black", "blue"),
    (ObjectKind::Error, None, "red", "default"),
    (ObjectKind::Task, Some("~t"), "green", "default"),
    (ObjectKind::Task, Some("~r 'H'"), "red", "default"),
    (ObjectKind::Task, Some("~s"), "black", "cyan"),
];

/// What the bottom line is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Add,
    Modify,
    Annotate,
    Filter,
    Search,
    Sort,
    Command,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Add => "add: ",
            PromptKind::Modify => "modify: ",
            PromptKind::Annotate => "annotate: ",
            PromptKind::Filter => "filter: ",
            PromptKind::Search => "/",
            PromptKind::Sort => "sort: ",
            PromptKind::Command => ":",
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt(PromptKind),
    Pager,
    Help,
}

/// One-line message in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Scrollable text overlay (task info)
#[derive(Debug, Clone, Default)]
pub struct PagerState {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

/// Main application state
pub struct App {
    pub tool: TaskTool,
    pub store: RecordStore,
    pub colors: ColorEngine,
    pub vars: VariableTable,
    pub keymap: KeyMap,
    pub mode: Mode,
    pub should_quit: bool,
    pub title_format: String,
    pub task_format: String,
    title_template: Template,
    task_template: Template,
    pub filter: String,
    pub sort: String,
    /// Index of the selected record
    pub selected: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// Height of the task list at the last draw
    pub list_height: usize,
    pub prompt_input: String,
    pub last_search: Option<String>,
    pub status: Option<StatusMessage>,
    pub pager: Option<PagerState>,
    pub task_version: String,
    /// Task waiting for an interactive edit, handled by the event loop
    pub pending_edit: Option<String>,
}

impl App {
    pub fn new(config: &Config, tool: TaskTool) -> Self {
        let (keymap, rejected) = KeyMap::with_overrides(&config.keys);

        let mut app = App {
            tool,
            store: RecordStore::default(),
            colors: ColorEngine::new(config.general.palette_size),
            vars: VariableTable::new(),
            keymap,
            mode: Mode::Normal,
            should_quit: false,
            title_format: config.format.title.clone(),
            task_format: config.format.task.clone(),
            title_template: Template::default(),
            task_template: Template::default(),
            filter: config.general.filter.clone(),
            sort: config.general.sort.clone(),
            selected: 0,
            scroll_offset: 0,
            list_height: 0,
            prompt_input: String::new(),
            last_search: None,
            status: None,
            pager: None,
            task_version: String::new(),
            pending_edit: None,
        };

        for key in rejected {
            tracing::warn!(binding = %key, "ignoring key binding");
            app.set_error(format!("bad key binding: {}", key));
        }

        for &(kind, rule, fg, bg) in DEFAULT_COLORS {
            if let Err(e) = app.colors.add_rule_named(kind, rule, fg, bg) {
                tracing::warn!(error = %e, "could not install default color");
            }
        }
        for rule in &config.colors {
            let result = rule
                .object
                .parse::<ObjectKind>()
                .and_then(|kind| app.add_color_rule(kind, rule.rule.as_deref(), &rule.fg, &rule.bg));
            if let Err(e) = result {
                tracing::warn!(object = %rule.object, error = %e, "ignoring color rule");
                app.set_error(format!("color rule: {}", e));
            }
        }

        app.refresh_vars();
        app.recompile_templates();
        app
    }

    /// Fetch the tool version and the task list
    pub fn start(&mut self) {
        match self.tool.version() {
            Ok(v) => self.task_version = v,
            Err(e) => tracing::warn!(error = %e, "could not read task version"),
        }
        self.reload();
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Re-export every task matching the filter, reporting failure in the
    /// status row
    pub fn reload(&mut self) {
        if let Err(e) = self.try_reload() {
            self.set_error(e.to_string());
        }
    }

    /// Re-export every task matching the filter
    pub fn try_reload(&mut self) -> Result<(), TaskError> {
        let keep = self.selected_record().map(|r| r.uuid.clone());
        let records = self.tool.export(&self.filter)?;
        tracing::info!(count = records.len(), filter = %self.filter, "loaded tasks");
        self.set_records(records);
        if let Some(idx) = keep.and_then(|uuid| self.store.position(&uuid)) {
            self.selected = idx;
        }
        Ok(())
    }

    /// Replace the list, sorted, with the selection clamped
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.store.replace_all(records);
        sort::sort_records(self.store.as_mut_slice(), &self.sort);
        self.clamp_selection();
    }

    /// Re-export one task after it changed
    fn reload_one(&mut self, uuid: &str) {
        match self.tool.export_one(uuid) {
            Ok(Some(record)) => self.store.upsert(record),
            Ok(None) => {
                self.store.remove(uuid);
            }
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        }
        self.resort();
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.store.get(self.selected)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }

    /// Sort again, keeping the same record selected
    fn resort(&mut self) {
        let keep = self.selected_record().map(|r| r.uuid.clone());
        sort::sort_records(self.store.as_mut_slice(), &self.sort);
        if let Some(idx) = keep.and_then(|uuid| self.store.position(&uuid)) {
            self.selected = idx;
        }
        self.clamp_selection();
    }

    pub fn set_sort(&mut self, keys: &str) {
        if !sort::is_known_sequence(keys) {
            tracing::warn!(keys, "sort sequence has unknown keys");
        }
        self.sort = keys.to_string();
        self.resort();
    }

    // ------------------------------------------------------------------
    // Colors and templates
    // ------------------------------------------------------------------

    /// Add or update a color rule. Task line caches are cleared before the
    /// next draw.
    pub fn add_color_rule(
        &mut self,
        kind: ObjectKind,
        rule: Option<&str>,
        fg: &str,
        bg: &str,
    ) -> Result<(), ColorError> {
        self.colors.add_rule_named(kind, rule, fg, bg)?;
        if kind == ObjectKind::Task {
            self.store.invalidate_colors();
        }
        Ok(())
    }

    pub fn remove_color_rule(&mut self, kind: ObjectKind, rule: Option<&str>) -> bool {
        let removed = self.colors.remove_rule(kind, rule);
        if removed && kind == ObjectKind::Task {
            self.store.invalidate_colors();
        }
        removed
    }

    /// Update template variables from the current state
    pub fn refresh_vars(&mut self) {
        let selected_line = if self.store.is_empty() {
            0
        } else {
            self.selected + 1
        };
        let vars = &mut self.vars;
        vars.set("program_name", VarValue::Str(PROGRAM_NAME.into()));
        vars.set("program_version", VarValue::Str(PROGRAM_VERSION.into()));
        vars.set("program_author", VarValue::Str(PROGRAM_AUTHOR.into()));
        vars.set("task_version", VarValue::Str(self.task_version.clone()));
        vars.set("task_count", VarValue::Int(self.store.len() as i64));
        vars.set("selected_line", VarValue::Int(selected_line as i64));
        vars.set("filter_string", VarValue::Str(self.filter.clone()));
        vars.set("sort_mode", VarValue::Str(self.sort.clone()));
        vars.set(
            "search_string",
            VarValue::Str(self.last_search.clone().unwrap_or_default()),
        );
    }

    pub fn recompile_templates(&mut self) {
        self.title_template = compile(&self.title_format, &self.vars);
        self.task_template = compile(&self.task_format, &self.vars);
    }

    /// Context for one render pass: one clock reading and one scan of the
    /// store for the project column width
    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.vars, self.store.max_project_width())
    }

    /// Title line text and style for a screen `width`
    pub fn title_line(&self, ctx: &RenderContext, width: usize) -> (String, Style) {
        let text = evaluate_line(&self.title_template, None, ctx, width);
        (text, self.colors.style(ObjectKind::Header, None, false))
    }

    /// Text and style of the task line at `idx`
    pub fn task_line(
        &self,
        ctx: &RenderContext,
        idx: usize,
        width: usize,
    ) -> Option<(String, Style)> {
        let record = self.store.get(idx)?;
        let text = evaluate_line(&self.task_template, Some(record), ctx, width);
        let style = self
            .colors
            .style(ObjectKind::Task, Some(record), idx == self.selected);
        Some((text, style))
    }

    pub fn error_style(&self) -> Style {
        self.colors.style(ObjectKind::Error, None, false)
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(message = %text, "error shown to user");
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Run a key-bound action in normal mode
    pub fn perform(&mut self, action: Action) {
        let page = self.list_height.max(1);
        match action {
            Action::ScrollUp => self.move_selection(-1),
            Action::ScrollDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-(page as isize)),
            Action::PageDown => self.move_selection(page as isize),
            Action::Home => self.selected = 0,
            Action::End => self.selected = self.store.len().saturating_sub(1),
            Action::Complete => self.apply_to_selected(TaskAction::Complete),
            Action::Delete => self.apply_to_selected(TaskAction::Delete),
            Action::ToggleStart => {
                let action = match self.selected_record() {
                    Some(r) if r.is_started() => TaskAction::Stop,
                    _ => TaskAction::Start,
                };
                self.apply_to_selected(action);
            }
            Action::Undo => match self.tool.undo() {
                Ok(_) => {
                    self.reload();
                    self.set_status("undo complete");
                }
                Err(e) => self.set_error(e.to_string()),
            },
            Action::Add => self.open_prompt(PromptKind::Add, ""),
            Action::Modify => {
                if self.selected_record().is_some() {
                    self.open_prompt(PromptKind::Modify, "");
                }
            }
            Action::Annotate => {
                if self.selected_record().is_some() {
                    self.open_prompt(PromptKind::Annotate, "");
                }
            }
            Action::Edit => {
                self.pending_edit = self.selected_record().map(|r| r.uuid.clone());
            }
            Action::View => self.view_info(),
            Action::Reload => {
                self.reload();
                self.set_status("tasks reloaded");
            }
            Action::Filter => {
                let current = self.filter.clone();
                self.open_prompt(PromptKind::Filter, &current);
            }
            Action::Search => self.open_prompt(PromptKind::Search, ""),
            Action::SearchNext => self.search_next(),
            Action::Sort => {
                let current = self.sort.clone();
                self.open_prompt(PromptKind::Sort, &current);
            }
            Action::Command => self.open_prompt(PromptKind::Command, ""),
            Action::Help => self.mode = Mode::Help,
            Action::Quit => self.should_quit = true,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.store.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    fn apply_to_selected(&mut self, action: TaskAction) {
        let Some(uuid) = self.selected_record().map(|r| r.uuid.clone()) else {
            self.set_error("no task selected");
            return;
        };
        match self.tool.apply(&uuid, &action) {
            Ok(_) => {
                tracing::info!(%uuid, ?action, "task updated");
                if action.removes_task() {
                    self.store.remove(&uuid);
                    self.clamp_selection();
                } else {
                    self.reload_one(&uuid);
                }
                self.set_status(action.done_message());
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Called by the event loop after an interactive edit returns
    pub fn finish_edit(&mut self, uuid: &str, result: Result<std::process::ExitStatus, String>) {
        match result {
            Ok(status) if status.success() => {
                self.reload_one(uuid);
                self.set_status("task edited");
            }
            Ok(status) => self.set_error(format!("edit exited with {}", status)),
            Err(e) => self.set_error(e),
        }
    }

    fn view_info(&mut self) {
        let Some(uuid) = self.selected_record().map(|r| r.uuid.clone()) else {
            return;
        };
        match self.tool.info(&uuid) {
            Ok(text) => {
                self.pager = Some(PagerState {
                    title: format!(" task info: {} ", uuid),
                    lines: text.lines().map(String::from).collect(),
                    scroll: 0,
                });
                self.mode = Mode::Pager;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Jump to the first match of a new search pattern
    pub fn search(&mut self, pattern: &str) {
        self.last_search = (!pattern.is_empty()).then(|| pattern.to_string());
        self.search_next();
    }

    pub fn search_next(&mut self) {
        let Some(pattern) = self.last_search.clone() else {
            self.set_error("no search pattern");
            return;
        };
        let Some(re) = search::search_regex(&pattern) else {
            return;
        };
        match search::find_next(self.store.as_slice(), &re, self.selected) {
            Some(idx) => self.selected = idx,
            None => self.set_error(format!("no matches for {}", pattern)),
        }
    }

    // ------------------------------------------------------------------
    // Prompts and commands
    // ------------------------------------------------------------------

    pub fn open_prompt(&mut self, kind: PromptKind, initial: &str) {
        self.prompt_input = initial.to_string();
        self.status = None;
        self.mode = Mode::Prompt(kind);
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt_input.clear();
        self.mode = Mode::Normal;
    }

    /// Act on the prompt text and return to normal mode
    pub fn submit_prompt(&mut self) {
        let Mode::Prompt(kind) = self.mode else {
            return;
        };
        let input = std::mem::take(&mut self.prompt_input);
        self.mode = Mode::Normal;

        match kind {
            PromptKind::Add => {
                if input.trim().is_empty() {
                    return;
                }
                match self.tool.add(&input) {
                    Ok(_) => {
                        self.reload();
                        self.set_status("task added");
                    }
                    Err(e) => self.set_error(e.to_string()),
                }
            }
            PromptKind::Modify if !input.trim().is_empty() => {
                self.apply_to_selected(TaskAction::Modify(input))
            }
            PromptKind::Annotate if !input.trim().is_empty() => {
                self.apply_to_selected(TaskAction::Annotate(input))
            }
            PromptKind::Modify | PromptKind::Annotate => {}
            PromptKind::Filter => {
                self.filter = input.trim().to_string();
                self.reload();
            }
            PromptKind::Search => self.search(&input),
            PromptKind::Sort => self.set_sort(input.trim()),
            PromptKind::Command => self.execute_command(&input),
        }
    }

    /// Run a `:` command line
    pub fn execute_command(&mut self, line: &str) {
        let command = match parse_command(line) {
            Ok(c) => c,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };
        tracing::debug!(?command, "running command");
        match command {
            Command::Quit => self.should_quit = true,
            Command::Reload => self.reload(),
            Command::Set { setting, value } => match setting {
                Setting::Filter => {
                    self.filter = value;
                    self.reload();
                }
                Setting::Sort => self.set_sort(&value),
                Setting::TitleFormat => {
                    self.title_format = value;
                    self.recompile_templates();
                }
                Setting::TaskFormat => {
                    self.task_format = value;
                    self.recompile_templates();
                }
            },
            Command::Color { kind, fg, bg, rule } => {
                if let Err(e) = self.add_color_rule(kind, rule.as_deref(), &fg, &bg) {
                    self.set_error(e.to_string());
                }
            }
            Command::Uncolor { kind, rule } => {
                if !self.remove_color_rule(kind, rule.as_deref()) {
                    self.set_error(format!("no {} color rule to remove", kind));
                }
            }
        }
    }

    /// Keep the selection inside the visible window of `height` rows
    pub fn adjust_scroll(&mut self, height: usize) {
        self.list_height = height;
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
        let max_offset = self.store.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tool = TaskTool::new(config.general.task_bin.clone());
    let mut app = App::new(config, tool);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.refresh_vars();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(500))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(uuid) = app.pending_edit.take() {
            // Hand the terminal to the editor for the duration of the edit
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            let result = app.tool.edit(&uuid).map_err(|e| e.to_string());
            enable_raw_mode()?;
            execute!(terminal.backend_mut(), EnterAlternateScreen)?;
            terminal.clear()?;
            app.finish_edit(&uuid, result);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
