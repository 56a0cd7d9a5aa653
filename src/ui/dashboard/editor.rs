use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{parse_due_date, Employee, EmployeeInput, Task, TaskInput, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
    NewEmployee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Title,
    Description,
    Employee,
    Status,
    DueDate,
    Name,
    Email,
    Department,
    Position,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

/// Validated form result handed back to the app loop.
#[derive(Debug, Clone)]
pub enum EditorSubmit {
    Task { id: Option<i64>, input: TaskInput },
    Employee(EmployeeInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// Modal form state for task and employee creation/editing.
///
/// Fields are plain text buffers; validation happens once on submit so
/// a failed mutation leaves the user's input intact for retry.
#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    active: usize,
    confirming: bool,
    error: Option<String>,
    task_id: Option<i64>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: task_fields(None),
            active: 0,
            confirming: false,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            fields: task_fields(Some(task)),
            active: 0,
            confirming: false,
            error: None,
            task_id: Some(task.id),
        }
    }

    pub fn new_employee() -> Self {
        Self {
            kind: EditorKind::NewEmployee,
            fields: vec![
                field(EditorFieldId::Name, "Name", String::new(), true),
                field(EditorFieldId::Email, "Email", String::new(), true),
                field(EditorFieldId::Department, "Department", String::new(), false),
                field(EditorFieldId::Position, "Position", String::new(), false),
            ],
            active: 0,
            confirming: false,
            error: None,
            task_id: None,
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    /// Replace the employee field from a picker selection.
    pub fn set_employee(&mut self, id: i64) {
        if let Some(field) = self.field_mut(EditorFieldId::Employee) {
            field.value = id.to_string();
        }
        self.error = None;
    }

    /// Replace the status field from a picker selection.
    pub fn set_status(&mut self, status: TaskStatus) {
        if let Some(field) = self.field_mut(EditorFieldId::Status) {
            field.value = status.as_str().to_string();
        }
        self.error = None;
    }

    pub fn active_field_id(&self) -> Option<EditorFieldId> {
        self.fields.get(self.active).map(|field| field.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if self.confirming {
            return self.handle_confirm_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Enter => {
                self.confirming = true;
                EditorAction::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1) % self.fields.len();
                EditorAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = (self.active + self.fields.len() - 1) % self.fields.len();
                EditorAction::None
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                    self.error = None;
                }
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('y') => EditorAction::Submit,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('n') => {
                self.confirming = false;
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }

    /// Validate the form and build the submit payload.
    pub fn build_submit(&self) -> Result<EditorSubmit, String> {
        match self.kind {
            EditorKind::NewTask | EditorKind::EditTask => {
                let title = self.value(EditorFieldId::Title).trim().to_string();
                if title.is_empty() {
                    return Err("title is required".to_string());
                }
                let employee_raw = self.value(EditorFieldId::Employee);
                let employee_id: i64 = employee_raw
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid employee id '{}'", employee_raw.trim()))?;
                let status = TaskStatus::parse(&self.value(EditorFieldId::Status))
                    .map_err(|err| err.to_string())?;
                let due_raw = self.value(EditorFieldId::DueDate);
                let due_date = if due_raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_due_date(&due_raw).map_err(|err| err.to_string())?)
                };
                Ok(EditorSubmit::Task {
                    id: self.task_id,
                    input: TaskInput {
                        title,
                        description: self.value(EditorFieldId::Description).trim().to_string(),
                        employee_id,
                        status,
                        due_date,
                    },
                })
            }
            EditorKind::NewEmployee => {
                let name = self.value(EditorFieldId::Name).trim().to_string();
                if name.is_empty() {
                    return Err("name is required".to_string());
                }
                let email = self.value(EditorFieldId::Email).trim().to_string();
                if email.is_empty() {
                    return Err("email is required".to_string());
                }
                Ok(EditorSubmit::Employee(EmployeeInput {
                    name,
                    email,
                    department: self.value(EditorFieldId::Department).trim().to_string(),
                    position: self.value(EditorFieldId::Position).trim().to_string(),
                }))
            }
        }
    }

    fn value(&self, id: EditorFieldId) -> String {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }

    fn field_mut(&mut self, id: EditorFieldId) -> Option<&mut EditorField> {
        self.fields.iter_mut().find(|field| field.id == id)
    }
}

fn field(id: EditorFieldId, label: &'static str, value: String, required: bool) -> EditorField {
    EditorField {
        id,
        label,
        value,
        required,
    }
}

fn task_fields(task: Option<&Task>) -> Vec<EditorField> {
    vec![
        field(
            EditorFieldId::Title,
            "Title",
            task.map(|t| t.title.clone()).unwrap_or_default(),
            true,
        ),
        field(
            EditorFieldId::Description,
            "Description",
            task.map(|t| t.description.clone()).unwrap_or_default(),
            false,
        ),
        field(
            EditorFieldId::Employee,
            "Employee id",
            task.map(|t| t.employee_id.to_string()).unwrap_or_default(),
            true,
        ),
        field(
            EditorFieldId::Status,
            "Status",
            task.map(|t| t.status.as_str().to_string())
                .unwrap_or_else(|| TaskStatus::Pending.as_str().to_string()),
            true,
        ),
        field(
            EditorFieldId::DueDate,
            "Due (YYYY-MM-DD)",
            task.and_then(|t| t.due_date).map(|d| d.to_string()).unwrap_or_default(),
            false,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPickerAction {
    None,
    Cancel,
    Confirm,
}

/// Vertical list picker over status values, optionally with an "all"
/// entry for filtering.
#[derive(Debug, Clone)]
pub struct StatusPicker {
    options: Vec<String>,
    selected: usize,
}

impl StatusPicker {
    pub fn new(options: Vec<String>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|value| options.iter().position(|option| option == value))
            .unwrap_or(0);
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_status(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|option| option.as_str())
            .unwrap_or("all")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> StatusPickerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => StatusPickerAction::Cancel,
            KeyCode::Enter => StatusPickerAction::Confirm,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.options.len() {
                    self.selected += 1;
                }
                StatusPickerAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                StatusPickerAction::None
            }
            _ => StatusPickerAction::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeOption {
    pub id: Option<i64>,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeePickerAction {
    None,
    Cancel,
    Confirm,
}

/// Filterable picker over employees, with an "all employees" entry at
/// the top when used as a filter.
#[derive(Debug, Clone)]
pub struct EmployeePicker {
    options: Vec<EmployeeOption>,
    query: String,
    selected: usize,
}

impl EmployeePicker {
    pub fn for_filter(employees: &[Employee]) -> Self {
        let mut options = vec![EmployeeOption {
            id: None,
            label: "All employees".to_string(),
        }];
        options.extend(employee_options(employees));
        Self {
            options,
            query: String::new(),
            selected: 0,
        }
    }

    pub fn for_assignment(employees: &[Employee]) -> Self {
        Self {
            options: employee_options(employees),
            query: String::new(),
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&EmployeeOption> {
        let query = self.query.trim().to_ascii_lowercase();
        self.options
            .iter()
            .filter(|option| {
                query.is_empty() || option.label.to_ascii_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selection(&self) -> Option<&EmployeeOption> {
        self.visible().get(self.selected).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EmployeePickerAction {
        match key.code {
            KeyCode::Esc => EmployeePickerAction::Cancel,
            KeyCode::Enter => EmployeePickerAction::Confirm,
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.visible().len().saturating_sub(1);
                if self.selected < max {
                    self.selected += 1;
                }
                EmployeePickerAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                EmployeePickerAction::None
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.selected = 0;
                EmployeePickerAction::None
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EmployeePickerAction::None;
                }
                if !ch.is_control() {
                    self.query.push(ch);
                    self.selected = 0;
                }
                EmployeePickerAction::None
            }
            _ => EmployeePickerAction::None,
        }
    }
}

fn employee_options(employees: &[Employee]) -> Vec<EmployeeOption> {
    employees
        .iter()
        .map(|employee| EmployeeOption {
            id: Some(employee.id),
            label: format!("#{} {}", employee.id, employee.name),
        })
        .collect()
}
