use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::{self, EmployeeFilter, StatusFilter};
use crate::model::{EmployeeInput, Task, TaskInput, TaskStatus};
use crate::sync::{MutationError, Snapshot, SyncController};

use super::editor::{
    EditorAction, EditorState, EditorSubmit, EmployeePicker, EmployeePickerAction, StatusPicker,
    StatusPickerAction,
};
use super::view;

const NARROW_WIDTH: u16 = 90;
const EVENT_POLL_MS: u64 = 120;

/// Work items for the sync worker thread.
enum SyncRequest {
    Reload,
    CreateTask(TaskInput),
    UpdateTask(i64, TaskInput),
    DeleteTask(i64),
    CreateEmployee(EmployeeInput),
}

/// Results flowing back from the worker to the UI loop.
enum UiMsg {
    SnapshotLoaded(Box<Snapshot>),
    LoadError(String),
    MutationApplied(String, Box<Snapshot>),
    MutationFailed(String),
    /// The write landed but the follow-up refresh failed.
    RefreshFailed(String),
}

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum HelpContext {
    None,
    List,
    Editor,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Overview,
    Tasks,
    Employees,
}

#[derive(Clone, Copy)]
pub(crate) enum StatusPickerMode {
    Filter,
    Change,
}

pub(crate) struct StatusPickerState {
    pub(crate) picker: StatusPicker,
    pub(crate) mode: StatusPickerMode,
}

#[derive(Clone, Copy)]
pub(crate) enum EmployeePickerMode {
    Filter,
    Assign,
}

pub(crate) struct EmployeePickerState {
    pub(crate) picker: EmployeePicker,
    pub(crate) mode: EmployeePickerMode,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: i64,
    pub(crate) title: String,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) snapshot: Option<Snapshot>,
    pub(crate) filtered: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) filter: String,
    pub(crate) filter_active: bool,
    pub(crate) employee_filter: EmployeeFilter,
    pub(crate) status_filter: StatusFilter,
    pub(crate) tab: Tab,
    pub(crate) editor: Option<EditorState>,
    pub(crate) status_picker: Option<StatusPickerState>,
    pub(crate) employee_picker: Option<EmployeePickerState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) help_context: HelpContext,
    pub(crate) loading: bool,
    pub(crate) load_error: Option<String>,
    pub(crate) recent_limit: usize,
    info_message: Option<String>,
    status_message: Option<String>,
    viewport: Viewport,
    pub(crate) show_detail: bool,
}

impl AppState {
    fn new(recent_limit: usize) -> Self {
        Self {
            snapshot: None,
            filtered: Vec::new(),
            selected: None,
            filter: String::new(),
            filter_active: false,
            employee_filter: EmployeeFilter::All,
            status_filter: StatusFilter::All,
            tab: Tab::Overview,
            editor: None,
            status_picker: None,
            employee_picker: None,
            delete_confirm: None,
            help_context: HelpContext::None,
            loading: true,
            load_error: None,
            recent_limit,
            info_message: None,
            status_message: None,
            viewport: Viewport::default(),
            show_detail: false,
        }
    }

    fn update_viewport(&mut self, width: u16, height: u16) {
        let changed = self.viewport.width != width || self.viewport.height != height;
        self.viewport = Viewport { width, height };
        if changed && width >= NARROW_WIDTH {
            self.show_detail = true;
        }
    }

    pub(crate) fn is_narrow(&self) -> bool {
        self.viewport.width > 0 && self.viewport.width < NARROW_WIDTH
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.tasks.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|idx| self.tasks().get(idx))
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.status_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        if !self.filter.is_empty() {
            return Some((format!("filter: {}", self.filter), StatusKind::Info));
        }
        let mut segments = Vec::new();
        if let EmployeeFilter::Employee(id) = self.employee_filter {
            let name = self
                .snapshot
                .as_ref()
                .and_then(|snapshot| {
                    snapshot
                        .employees
                        .iter()
                        .find(|employee| employee.id == id)
                })
                .map(|employee| employee.name.clone())
                .unwrap_or_else(|| format!("#{id}"));
            segments.push(format!("employee: {name}"));
        }
        if let StatusFilter::Status(status) = self.status_filter {
            segments.push(format!("status: {status}"));
        }
        if !segments.is_empty() {
            return Some((segments.join("  "), StatusKind::Info));
        }
        None
    }

    pub(crate) fn toggle_help(&mut self, context: HelpContext) {
        self.help_context = if self.help_context == context {
            HelpContext::None
        } else {
            context
        };
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.status_picker.is_some() {
            return "j/k move  enter apply  esc cancel".to_string();
        }
        if self.employee_picker.is_some() {
            return "type to filter  j/k move  enter apply  esc cancel".to_string();
        }
        if self.delete_confirm.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        if let Some(editor) = self.editor.as_ref() {
            if editor.confirming() {
                return "enter/c confirm  ? help  esc/q cancel".to_string();
            }
            return "enter/c confirm  tab next  p pick in list fields  ? help  esc cancel"
                .to_string();
        }
        if self.filter_active {
            return "type filter  backspace delete  tab status  enter done  esc clear".to_string();
        }
        match self.tab {
            Tab::Overview => {
                "1/2/3 tabs  r refresh  n new task  o new employee  ? help  q quit".to_string()
            }
            Tab::Tasks => {
                "j/k move  / filter  a assignee  s status  n new  e edit  d delete  r refresh  q quit"
                    .to_string()
            }
            Tab::Employees => {
                "j/k move  o new employee  r refresh  1/2/3 tabs  q quit".to_string()
            }
        }
    }

    pub(crate) fn summary_line(&self) -> String {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return if self.loading {
                "loading...".to_string()
            } else {
                "no data".to_string()
            };
        };
        let dashboard = &snapshot.dashboard;
        format!(
            "total: {}  completed: {}  in progress: {}  pending: {}",
            dashboard.total_tasks,
            dashboard.completed_tasks,
            dashboard.in_progress_tasks,
            crate::views::pending_count(dashboard),
        )
    }

    fn apply_filter(&mut self, previous_id: Option<i64>) {
        self.filtered = filter::filter_task_indices(
            self.tasks(),
            &self.filter,
            self.employee_filter,
            self.status_filter,
        );
        self.selected = filter::select_by_id(self.tasks(), &self.filtered, previous_id);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let current_pos = self
            .selected
            .and_then(|idx| self.filtered.iter().position(|candidate| *candidate == idx))
            .unwrap_or(0);
        let max = self.filtered.len().saturating_sub(1);
        let next = (current_pos as isize + delta).clamp(0, max as isize) as usize;
        self.selected = Some(self.filtered[next]);
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.info_message = None;
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.status_message = None;
    }

    fn commit_snapshot(&mut self, snapshot: Snapshot) {
        let previous_id = self.selected_task().map(|task| task.id);
        self.snapshot = Some(snapshot);
        self.loading = false;
        self.load_error = None;
        self.apply_filter(previous_id);
    }

    fn list_jump(&self) -> isize {
        let mut height = self.viewport.height.saturating_sub(4);
        if self.filter_active || !self.filter.is_empty() {
            height = height.saturating_sub(2);
        }
        let jump = (height / 2).max(1);
        jump as isize
    }
}

/// Open the interactive dashboard against the configured API.
pub fn run(config: Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let (ui_tx, ui_rx) = mpsc::channel();
    let (req_tx, req_rx) = mpsc::channel();

    spawn_sync_worker(client, req_rx, ui_tx);

    if req_tx.send(SyncRequest::Reload).is_err() {
        return Err(Error::OperationFailed(
            "failed to start sync worker".to_string(),
        ));
    }

    let mut app = AppState::new(config.ui.recent_limit);
    run_terminal(&mut app, ui_rx, req_tx)
}

fn run_terminal(
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<SyncRequest>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app, ui_rx, req_tx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<SyncRequest>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(msg) = ui_rx.try_recv() {
            handle_ui_msg(app, msg);
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key, &req_tx) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_ui_msg(app: &mut AppState, msg: UiMsg) {
    match msg {
        UiMsg::SnapshotLoaded(snapshot) => {
            app.commit_snapshot(*snapshot);
        }
        UiMsg::LoadError(err) => {
            // Prior snapshot is retained, but the error view takes over
            // until a retry succeeds.
            app.loading = false;
            app.load_error = Some(err);
        }
        UiMsg::MutationApplied(message, snapshot) => {
            app.commit_snapshot(*snapshot);
            app.editor = None;
            app.set_info(message);
        }
        UiMsg::MutationFailed(err) => {
            // The write was rejected, so the form stays open with its
            // input intact and the action can be retried.
            app.loading = false;
            if let Some(editor) = app.editor.as_mut() {
                editor.set_error(err);
            } else {
                app.set_error(err);
            }
        }
        UiMsg::RefreshFailed(err) => {
            // The write is already on the server; resubmitting the form
            // would duplicate it. Close the form and fall back to the
            // connection error view, where retry reloads instead.
            app.editor = None;
            app.loading = false;
            app.load_error = Some(err);
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<SyncRequest>) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.help_context != HelpContext::None {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                app.help_context = HelpContext::None;
            }
            _ => {}
        }
        return false;
    }

    if app.load_error.is_some() {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => {
                app.loading = true;
                let _ = req_tx.send(SyncRequest::Reload);
            }
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        return false;
    }

    if app.delete_confirm.is_some() {
        let confirm = match app.delete_confirm.take() {
            Some(confirm) => confirm,
            None => return false,
        };
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('y') | KeyCode::Enter => {
                app.loading = true;
                let _ = req_tx.send(SyncRequest::DeleteTask(confirm.task_id));
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.set_info("cancelled".to_string());
            }
            _ => {
                app.delete_confirm = Some(confirm);
            }
        }
        return false;
    }

    if let Some(mut state) = app.status_picker.take() {
        match state.picker.handle_key(key) {
            StatusPickerAction::None => {
                app.status_picker = Some(state);
            }
            StatusPickerAction::Cancel => {}
            StatusPickerAction::Confirm => {
                let selected = state.picker.selected_status().to_string();
                match state.mode {
                    StatusPickerMode::Filter => {
                        app.status_filter = if selected.eq_ignore_ascii_case("all") {
                            StatusFilter::All
                        } else {
                            match TaskStatus::parse(&selected) {
                                Ok(status) => StatusFilter::Status(status),
                                Err(err) => {
                                    app.set_error(err.to_string());
                                    return false;
                                }
                            }
                        };
                        let previous = app.selected_task().map(|task| task.id);
                        app.apply_filter(previous);
                    }
                    StatusPickerMode::Change => {
                        if let Some(editor) = app.editor.as_mut() {
                            match TaskStatus::parse(&selected) {
                                Ok(status) => editor.set_status(status),
                                Err(err) => app.set_error(err.to_string()),
                            }
                        }
                    }
                }
            }
        }
        return false;
    }

    if let Some(mut state) = app.employee_picker.take() {
        match state.picker.handle_key(key) {
            EmployeePickerAction::None => {
                app.employee_picker = Some(state);
            }
            EmployeePickerAction::Cancel => {}
            EmployeePickerAction::Confirm => {
                let selection = state.picker.selection().cloned();
                let Some(option) = selection else {
                    return false;
                };
                match state.mode {
                    EmployeePickerMode::Filter => {
                        app.employee_filter = match option.id {
                            Some(id) => EmployeeFilter::Employee(id),
                            None => EmployeeFilter::All,
                        };
                        let previous = app.selected_task().map(|task| task.id);
                        app.apply_filter(previous);
                    }
                    EmployeePickerMode::Assign => {
                        if let (Some(editor), Some(id)) = (app.editor.as_mut(), option.id) {
                            editor.set_employee(id);
                        }
                    }
                }
            }
        }
        return false;
    }

    if app.editor.is_some() {
        return handle_editor_key(app, key, req_tx);
    }

    if app.filter_active {
        match key.code {
            KeyCode::Esc => {
                app.filter.clear();
                app.filter_active = false;
            }
            KeyCode::Enter => app.filter_active = false,
            KeyCode::Tab => {
                open_status_filter_picker(app);
            }
            KeyCode::Backspace => {
                app.filter.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                if !ch.is_control() {
                    app.filter.push(ch);
                }
            }
            _ => {}
        }
        let previous = app.selected_task().map(|task| task.id);
        app.apply_filter(previous);
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('1') => {
            app.tab = Tab::Overview;
            false
        }
        KeyCode::Char('2') => {
            app.tab = Tab::Tasks;
            false
        }
        KeyCode::Char('3') => {
            app.tab = Tab::Employees;
            false
        }
        KeyCode::Char('?') => {
            app.toggle_help(HelpContext::List);
            false
        }
        KeyCode::Char('r') => {
            app.loading = true;
            let _ = req_tx.send(SyncRequest::Reload);
            false
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(app.list_jump());
            false
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(-app.list_jump());
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Char('/') if app.tab == Tab::Tasks => {
            app.filter_active = true;
            false
        }
        KeyCode::Char('s') if app.tab == Tab::Tasks => {
            open_status_filter_picker(app);
            false
        }
        KeyCode::Char('a') if app.tab == Tab::Tasks => {
            let employees = app
                .snapshot
                .as_ref()
                .map(|snapshot| snapshot.employees.clone())
                .unwrap_or_default();
            app.employee_picker = Some(EmployeePickerState {
                picker: EmployeePicker::for_filter(&employees),
                mode: EmployeePickerMode::Filter,
            });
            false
        }
        KeyCode::Char('n') => {
            app.editor = Some(EditorState::new_task());
            false
        }
        KeyCode::Char('o') => {
            app.editor = Some(EditorState::new_employee());
            false
        }
        KeyCode::Char('e') if app.tab == Tab::Tasks => {
            let Some(task) = app.selected_task() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            app.editor = Some(EditorState::edit_task(task));
            false
        }
        KeyCode::Char('d') if app.tab == Tab::Tasks => {
            let Some(task) = app.selected_task() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            app.delete_confirm = Some(DeleteConfirmState {
                task_id: task.id,
                title: task.title.clone(),
            });
            false
        }
        KeyCode::Enter => {
            if app.is_narrow() && app.tab == Tab::Tasks {
                app.show_detail = !app.show_detail;
            }
            false
        }
        _ => false,
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<SyncRequest>) -> bool {
    if key.code == KeyCode::Char('?') {
        app.toggle_help(HelpContext::Editor);
        return false;
    }

    // Pickers from inside the form for the constrained fields.
    if key.code == KeyCode::Char('p') {
        let field_id = app.editor.as_ref().and_then(|editor| editor.active_field_id());
        match field_id {
            Some(super::editor::EditorFieldId::Employee) => {
                let employees = app
                    .snapshot
                    .as_ref()
                    .map(|snapshot| snapshot.employees.clone())
                    .unwrap_or_default();
                if employees.is_empty() {
                    if let Some(editor) = app.editor.as_mut() {
                        editor.set_error("no employees to pick from".to_string());
                    }
                    return false;
                }
                app.employee_picker = Some(EmployeePickerState {
                    picker: EmployeePicker::for_assignment(&employees),
                    mode: EmployeePickerMode::Assign,
                });
                return false;
            }
            Some(super::editor::EditorFieldId::Status) => {
                let options = TaskStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect();
                app.status_picker = Some(StatusPickerState {
                    picker: StatusPicker::new(options, None),
                    mode: StatusPickerMode::Change,
                });
                return false;
            }
            _ => {}
        }
    }

    let Some(editor) = app.editor.as_mut() else {
        return false;
    };
    match editor.handle_key(key) {
        EditorAction::None => {}
        EditorAction::Cancel => {
            app.editor = None;
            app.set_info("cancelled".to_string());
        }
        EditorAction::Submit => match editor.build_submit() {
            Ok(EditorSubmit::Task { id: None, input }) => {
                app.loading = true;
                let _ = req_tx.send(SyncRequest::CreateTask(input));
            }
            Ok(EditorSubmit::Task { id: Some(id), input }) => {
                app.loading = true;
                let _ = req_tx.send(SyncRequest::UpdateTask(id, input));
            }
            Ok(EditorSubmit::Employee(input)) => {
                app.loading = true;
                let _ = req_tx.send(SyncRequest::CreateEmployee(input));
            }
            Err(message) => editor.set_error(message),
        },
    }
    false
}

fn open_status_filter_picker(app: &mut AppState) {
    let current = match app.status_filter {
        StatusFilter::All => "all".to_string(),
        StatusFilter::Status(status) => status.as_str().to_string(),
    };
    let mut options = vec!["all".to_string()];
    options.extend(TaskStatus::ALL.iter().map(|status| status.as_str().to_string()));
    app.status_picker = Some(StatusPickerState {
        picker: StatusPicker::new(options, Some(&current)),
        mode: StatusPickerMode::Filter,
    });
}

/// Run the synchronization controller on its own thread.
///
/// The worker owns a current-thread runtime; requests are processed one
/// at a time, so at most one refresh is in flight and the last applied
/// snapshot always wins.
fn spawn_sync_worker(client: ApiClient, req_rx: Receiver<SyncRequest>, ui_tx: Sender<UiMsg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiMsg::LoadError(format!("runtime start failed: {err}")));
                return;
            }
        };
        let mut controller = SyncController::new(client);

        while let Ok(req) = req_rx.recv() {
            match req {
                SyncRequest::Reload => {
                    match runtime.block_on(controller.load_all()) {
                        Ok(snapshot) => {
                            let _ = ui_tx.send(UiMsg::SnapshotLoaded(Box::new(snapshot.clone())));
                        }
                        Err(err) => {
                            let _ = ui_tx.send(UiMsg::LoadError(err.to_string()));
                        }
                    }
                }
                SyncRequest::CreateTask(input) => {
                    debug!("worker: create task");
                    send_mutation_result(
                        &ui_tx,
                        runtime.block_on(controller.create_task(&input)),
                        "task created",
                    );
                }
                SyncRequest::UpdateTask(id, input) => {
                    debug!(id, "worker: update task");
                    send_mutation_result(
                        &ui_tx,
                        runtime.block_on(controller.update_task(id, &input)),
                        "task updated",
                    );
                }
                SyncRequest::DeleteTask(id) => {
                    debug!(id, "worker: delete task");
                    send_mutation_result(
                        &ui_tx,
                        runtime.block_on(controller.delete_task(id)),
                        "task deleted",
                    );
                }
                SyncRequest::CreateEmployee(input) => {
                    debug!("worker: create employee");
                    send_mutation_result(
                        &ui_tx,
                        runtime.block_on(controller.create_employee(&input)),
                        "employee created",
                    );
                }
            }
        }
    });
}

fn send_mutation_result(
    ui_tx: &Sender<UiMsg>,
    result: std::result::Result<&Snapshot, MutationError>,
    message: &str,
) {
    match result {
        Ok(snapshot) => {
            let _ = ui_tx.send(UiMsg::MutationApplied(
                message.to_string(),
                Box::new(snapshot.clone()),
            ));
        }
        Err(MutationError::Write(err)) => {
            let _ = ui_tx.send(UiMsg::MutationFailed(err.to_string()));
        }
        Err(MutationError::Refresh(err)) => {
            let _ = ui_tx.send(UiMsg::RefreshFailed(err.to_string()));
        }
    }
}
