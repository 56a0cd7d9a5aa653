//! crewboard task subcommands
//!
//! List, create, update, and delete tasks against the tracker API.
//! Mutations go through the synchronization controller so a successful
//! write is always followed by a full refresh.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::{self, EmployeeFilter, StatusFilter};
use crate::model::{parse_due_date, Task, TaskInput, TaskStatus};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::sync::SyncController;

/// Options for `task ls`
pub struct LsOptions {
    pub config: Config,
    pub output: OutputOptions,
    pub employee: Option<i64>,
    pub status: Option<String>,
    pub query: Option<String>,
}

/// Options for `task add`
pub struct AddOptions {
    pub config: Config,
    pub output: OutputOptions,
    pub title: String,
    pub employee: i64,
    pub description: String,
    pub status: String,
    pub due: Option<String>,
}

/// Options for `task set`
pub struct SetOptions {
    pub config: Config,
    pub output: OutputOptions,
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub employee: Option<i64>,
    pub status: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
}

/// Options for `task rm`
pub struct RmOptions {
    pub config: Config,
    pub output: OutputOptions,
    pub id: i64,
}

#[derive(serde::Serialize)]
struct TaskRow {
    id: i64,
    title: String,
    employee_id: i64,
    employee_name: String,
    status: &'static str,
    due_date: Option<String>,
}

#[derive(serde::Serialize)]
struct TaskListReport {
    total: usize,
    shown: usize,
    tasks: Vec<TaskRow>,
}

#[derive(serde::Serialize)]
struct MutationReport {
    total_tasks: u64,
    completed_tasks: u64,
}

pub fn run_ls(options: LsOptions) -> Result<()> {
    let client = ApiClient::new(&options.config.api)?;
    let tasks = super::block_on(client.list_tasks())?;

    let employee_filter = match options.employee {
        Some(id) => EmployeeFilter::Employee(id),
        None => EmployeeFilter::All,
    };
    let status_filter = match options.status.as_deref() {
        Some(value) => StatusFilter::Status(TaskStatus::parse(value)?),
        None => StatusFilter::All,
    };
    let query = options.query.unwrap_or_default();

    let indices = filter::filter_task_indices(&tasks, &query, employee_filter, status_filter);
    let rows: Vec<TaskRow> = indices.iter().map(|&idx| task_row(&tasks[idx])).collect();

    let report = TaskListReport {
        total: tasks.len(),
        shown: rows.len(),
        tasks: rows,
    };

    let mut human = HumanOutput::new(format!(
        "crewboard task ls: {} of {} tasks",
        report.shown, report.total
    ));
    for row in &report.tasks {
        let due = row.due_date.as_deref().unwrap_or("-");
        human.push_detail(format!(
            "#{} [{}] {} ({}, due {due})",
            row.id, row.status, row.title, row.employee_name
        ));
    }
    if report.tasks.is_empty() {
        human.push_detail("no tasks found".to_string());
    }

    emit_success(options.output, "task ls", &report, Some(&human))?;
    Ok(())
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let title = options.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    let status = TaskStatus::parse(&options.status)?;
    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;

    let input = TaskInput {
        title: title.clone(),
        description: options.description,
        employee_id: options.employee,
        status,
        due_date,
    };

    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let snapshot = super::block_on(async {
        controller.client().ensure_employee(input.employee_id).await?;
        let snapshot = controller.create_task(&input).await.map_err(Error::from)?;
        Ok(snapshot.clone())
    })?;

    let report = MutationReport {
        total_tasks: snapshot.dashboard.total_tasks,
        completed_tasks: snapshot.dashboard.completed_tasks,
    };

    let mut human = HumanOutput::new(format!("crewboard task add: created '{title}'"));
    human.push_summary("assignee", options.employee.to_string());
    human.push_summary("status", status.as_str());
    human.push_summary("tasks total", snapshot.dashboard.total_tasks.to_string());
    human.push_next_step("crewboard task ls".to_string());

    emit_success(options.output, "task add", &report, Some(&human))?;
    Ok(())
}

pub fn run_set(options: SetOptions) -> Result<()> {
    if options.title.is_none()
        && options.description.is_none()
        && options.employee.is_none()
        && options.status.is_none()
        && options.due.is_none()
        && !options.clear_due
    {
        return Err(Error::InvalidArgument(
            "nothing to change; pass at least one of --title, --description, --employee, --status, --due, --clear-due".to_string(),
        ));
    }

    let status = options.status.as_deref().map(TaskStatus::parse).transpose()?;
    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;

    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let id = options.id;

    let snapshot = super::block_on(async {
        // The server expects the full task shape on update, so merge the
        // requested changes over the current record.
        let current = controller.client().get_task(id).await?;
        let mut input = TaskInput::from_task(&current);
        if let Some(title) = options.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(Error::InvalidArgument("title cannot be empty".to_string()));
            }
            input.title = title;
        }
        if let Some(description) = options.description {
            input.description = description;
        }
        if let Some(employee_id) = options.employee {
            controller.client().ensure_employee(employee_id).await?;
            input.employee_id = employee_id;
        }
        if let Some(status) = status {
            input.status = status;
        }
        if options.clear_due {
            input.due_date = None;
        } else if let Some(date) = due_date {
            input.due_date = Some(date);
        }
        let snapshot = controller.update_task(id, &input).await.map_err(Error::from)?;
        Ok(snapshot.clone())
    })?;

    let updated = snapshot.tasks.iter().find(|task| task.id == id);

    let report = MutationReport {
        total_tasks: snapshot.dashboard.total_tasks,
        completed_tasks: snapshot.dashboard.completed_tasks,
    };

    let mut human = HumanOutput::new(format!("crewboard task set: updated #{id}"));
    if let Some(task) = updated {
        human.push_summary("title", task.title.clone());
        human.push_summary("status", task.status.as_str());
        human.push_summary("assignee", task.employee_name.clone());
    }
    emit_success(options.output, "task set", &report, Some(&human))?;
    Ok(())
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let id = options.id;

    let snapshot = super::block_on(async {
        let snapshot = controller.delete_task(id).await.map_err(Error::from)?;
        Ok::<_, Error>(snapshot.clone())
    })?;

    let report = MutationReport {
        total_tasks: snapshot.dashboard.total_tasks,
        completed_tasks: snapshot.dashboard.completed_tasks,
    };

    let mut human = HumanOutput::new(format!("crewboard task rm: deleted #{id}"));
    human.push_summary("tasks total", snapshot.dashboard.total_tasks.to_string());
    emit_success(options.output, "task rm", &report, Some(&human))?;
    Ok(())
}

fn task_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id,
        title: task.title.clone(),
        employee_id: task.employee_id,
        employee_name: task.employee_name.clone(),
        status: task.status.as_str(),
        due_date: task.due_date.map(|date| date.to_string()),
    }
}
