//! Data model for the task tracker API
//!
//! Wire shapes mirror the server's JSON. Ids are server-assigned
//! integers; `due_date` is a plain date without a time component.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Task workflow status.
///
/// The server stores statuses as plain strings; this client treats the
/// set as closed and rejects anything outside it at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Completed,
        TaskStatus::InProgress,
        TaskStatus::Pending,
    ];

    /// Wire value as sent to the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Human label for list and chart rows.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(Error::InvalidArgument(format!(
                "invalid status '{other}' (expected pending|in_progress|completed)"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Employee record as returned by the server.
///
/// Employees are create-only in this client; there is no edit call.
/// `created_at` is a server-formatted timestamp passed through for
/// display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Task record as returned by the server.
///
/// `employee_name` is a denormalized display copy joined in server-side;
/// `employee_id` is the authoritative link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for task create and update calls. The server expects the
/// full task shape on both, minus `id` and `employee_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub employee_id: i64,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskInput {
    /// Resubmission shape for an existing task, used when a partial edit
    /// must be sent as a full update body.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            employee_id: task.employee_id,
            status: task.status,
            due_date: task.due_date,
        }
    }
}

/// Payload for employee create calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
}

/// Per-employee row of the server dashboard aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaskCount {
    pub employee_id: i64,
    pub employee_name: String,
    pub task_count: u64,
}

/// Server-computed dashboard aggregate.
///
/// The server also sends a `pending_tasks` field; it is accepted for
/// wire compatibility but the pending bucket is always re-derived
/// client-side from the other three counters (see `views`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub in_progress_tasks: u64,
    #[serde(default)]
    pub pending_tasks: u64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub tasks_by_employee: Vec<EmployeeTaskCount>,
}

/// Parse a `YYYY-MM-DD` due date from user input.
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid date '{value}' (expected YYYY-MM-DD)"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()).expect("parse"), status);
        }
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let err = TaskStatus::parse("done").expect_err("unknown status");
        match err {
            Error::InvalidArgument(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn task_deserializes_server_shape() {
        let raw = r#"{
            "id": 3,
            "title": "Quarterly report",
            "description": "",
            "employee_id": 1,
            "employee_name": "Alice Chen",
            "status": "in_progress",
            "due_date": "2025-11-30"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("task json");
        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2025, 11, 30).expect("date"))
        );
    }

    #[test]
    fn task_due_date_may_be_null_or_absent() {
        let raw = r#"{"id":1,"title":"t","employee_id":2,"status":"pending","due_date":null}"#;
        let task: Task = serde_json::from_str(raw).expect("task json");
        assert!(task.due_date.is_none());

        let raw = r#"{"id":1,"title":"t","employee_id":2,"status":"pending"}"#;
        let task: Task = serde_json::from_str(raw).expect("task json");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn dashboard_tolerates_missing_optional_fields() {
        let raw = r#"{"total_tasks":4,"completed_tasks":1,"in_progress_tasks":2}"#;
        let dashboard: DashboardSummary = serde_json::from_str(raw).expect("dashboard json");
        assert_eq!(dashboard.total_tasks, 4);
        assert_eq!(dashboard.pending_tasks, 0);
        assert!(dashboard.tasks_by_employee.is_empty());
    }

    #[test]
    fn parse_due_date_accepts_iso_dates_only() {
        assert!(parse_due_date("2026-01-15").is_ok());
        assert!(parse_due_date("15/01/2026").is_err());
        assert!(parse_due_date("").is_err());
    }

    #[test]
    fn task_input_mirrors_existing_task() {
        let task = Task {
            id: 9,
            title: "Audit".to_string(),
            description: "Annual".to_string(),
            employee_id: 4,
            employee_name: "Dana".to_string(),
            status: TaskStatus::Completed,
            due_date: None,
            created_at: None,
            updated_at: None,
        };
        let input = TaskInput::from_task(&task);
        assert_eq!(input.title, "Audit");
        assert_eq!(input.employee_id, 4);
        assert_eq!(input.status, TaskStatus::Completed);
    }
}
