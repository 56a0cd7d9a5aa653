//! Derived views over the synchronized snapshot
//!
//! Read-only projections for charts, summaries, and list panels. None
//! of these functions mutate the snapshot; they are recomputed from
//! scratch on every call.

use serde::Serialize;

use crate::model::{DashboardSummary, Employee, Task, TaskStatus};

/// One bucket of the status chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub label: &'static str,
    pub status: TaskStatus,
    pub count: u64,
}

/// One bar of the per-employee workload chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeBar {
    pub name: String,
    pub tasks: u64,
}

/// Per-employee statistics for the employee screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeStats {
    pub employee_id: i64,
    pub name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

/// Pending bucket inferred from the aggregate counters.
///
/// The server's own pending counter is ignored; the chart always shows
/// `total - completed - in_progress`, clamped so it can never go
/// negative even on inconsistent aggregates.
pub fn pending_count(dashboard: &DashboardSummary) -> u64 {
    dashboard
        .total_tasks
        .saturating_sub(dashboard.completed_tasks)
        .saturating_sub(dashboard.in_progress_tasks)
}

/// Status chart buckets, or an empty sequence when no dashboard has
/// been loaded yet.
pub fn status_chart(dashboard: Option<&DashboardSummary>) -> Vec<StatusBucket> {
    let Some(dashboard) = dashboard else {
        return Vec::new();
    };
    vec![
        StatusBucket {
            label: TaskStatus::Completed.label(),
            status: TaskStatus::Completed,
            count: dashboard.completed_tasks,
        },
        StatusBucket {
            label: TaskStatus::InProgress.label(),
            status: TaskStatus::InProgress,
            count: dashboard.in_progress_tasks,
        },
        StatusBucket {
            label: TaskStatus::Pending.label(),
            status: TaskStatus::Pending,
            count: pending_count(dashboard),
        },
    ]
}

/// Per-employee workload bars, order preserved from the server.
pub fn employee_chart(dashboard: Option<&DashboardSummary>) -> Vec<EmployeeBar> {
    let Some(dashboard) = dashboard else {
        return Vec::new();
    };
    dashboard
        .tasks_by_employee
        .iter()
        .map(|row| EmployeeBar {
            name: row.employee_name.clone(),
            tasks: row.task_count,
        })
        .collect()
}

/// Task totals per employee, computed by linear scan.
///
/// One pass over the task list per employee; fine at this scale and
/// keeps the projection free of index state.
pub fn employee_stats(employees: &[Employee], tasks: &[Task]) -> Vec<EmployeeStats> {
    employees
        .iter()
        .map(|employee| {
            let total_tasks = tasks
                .iter()
                .filter(|task| task.employee_id == employee.id)
                .count();
            let completed_tasks = tasks
                .iter()
                .filter(|task| {
                    task.employee_id == employee.id && task.status == TaskStatus::Completed
                })
                .count();
            EmployeeStats {
                employee_id: employee.id,
                name: employee.name.clone(),
                total_tasks,
                completed_tasks,
            }
        })
        .collect()
}

/// The first `limit` tasks in snapshot order. The server already sorts
/// newest first; the client does not re-sort.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> &[Task] {
    &tasks[..tasks.len().min(limit)]
}

/// Completion rate formatted for display, one decimal place.
pub fn completion_rate_label(dashboard: &DashboardSummary) -> String {
    format!("{:.1}%", dashboard.completion_rate)
}
