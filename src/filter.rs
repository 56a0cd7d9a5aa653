//! Task list filtering
//!
//! Pure predicate evaluation over the task collection. Filters never
//! mutate the snapshot; they return indices into it so selection can
//! survive refreshes.

use crate::model::{Task, TaskStatus};

/// Employee dimension of the task filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeFilter {
    #[default]
    All,
    Employee(i64),
}

/// Status dimension of the task filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(TaskStatus),
}

impl EmployeeFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            EmployeeFilter::All => true,
            EmployeeFilter::Employee(id) => task.employee_id == *id,
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => task.status == *status,
        }
    }
}

fn normalize_text(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Indices of tasks passing the two-dimensional filter plus an optional
/// free-text query over title, description, and employee name.
///
/// With both dimensions at `All` and an empty query, the result is the
/// identity over the input order.
pub fn filter_task_indices(
    tasks: &[Task],
    query: &str,
    employee_filter: EmployeeFilter,
    status_filter: StatusFilter,
) -> Vec<usize> {
    let query_norm = normalize_text(query);
    let mut indices = Vec::new();

    for (idx, task) in tasks.iter().enumerate() {
        if !employee_filter.matches(task) {
            continue;
        }
        if !status_filter.matches(task) {
            continue;
        }
        if !query_norm.is_empty() {
            let haystack = format!(
                "{} {} {}",
                normalize_text(&task.title),
                normalize_text(&task.description),
                normalize_text(&task.employee_name),
            );
            if !haystack.contains(&query_norm) {
                continue;
            }
        }
        indices.push(idx);
    }

    indices
}

/// Keep the previously selected task after a refresh when it is still
/// visible; otherwise fall back to the first filtered entry.
pub fn select_by_id(tasks: &[Task], filtered: &[usize], previous_id: Option<i64>) -> Option<usize> {
    if let Some(id) = previous_id {
        for &idx in filtered {
            if tasks.get(idx).map(|task| task.id) == Some(id) {
                return Some(idx);
            }
        }
    }
    filtered.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, employee_id: i64, status: TaskStatus, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            employee_id,
            employee_name: String::new(),
            status,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task(1, 3, TaskStatus::Completed, "Close books"),
            task(2, 3, TaskStatus::Pending, "File report"),
            task(3, 5, TaskStatus::Completed, "Ship release"),
        ]
    }

    #[test]
    fn all_all_is_identity() {
        let tasks = sample_tasks();
        let indices =
            filter_task_indices(&tasks, "", EmployeeFilter::All, StatusFilter::All);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn both_dimensions_intersect() {
        let tasks = sample_tasks();
        let indices = filter_task_indices(
            &tasks,
            "",
            EmployeeFilter::Employee(3),
            StatusFilter::Status(TaskStatus::Completed),
        );
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn employee_dimension_alone() {
        let tasks = sample_tasks();
        let indices =
            filter_task_indices(&tasks, "", EmployeeFilter::Employee(5), StatusFilter::All);
        assert_eq!(indices, vec![2]);
    }

    #[test]
    fn status_dimension_alone() {
        let tasks = sample_tasks();
        let indices = filter_task_indices(
            &tasks,
            "",
            EmployeeFilter::All,
            StatusFilter::Status(TaskStatus::Completed),
        );
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let tasks = sample_tasks();
        let indices =
            filter_task_indices(&tasks, "SHIP", EmployeeFilter::All, StatusFilter::All);
        assert_eq!(indices, vec![2]);
    }

    #[test]
    fn empty_result_is_valid() {
        let tasks = sample_tasks();
        let indices = filter_task_indices(
            &tasks,
            "",
            EmployeeFilter::Employee(5),
            StatusFilter::Status(TaskStatus::Pending),
        );
        assert!(indices.is_empty());
    }

    #[test]
    fn selection_sticks_to_id_across_refresh() {
        let tasks = sample_tasks();
        let filtered = vec![0, 1, 2];
        assert_eq!(select_by_id(&tasks, &filtered, Some(2)), Some(1));
        assert_eq!(select_by_id(&tasks, &filtered, Some(99)), Some(0));
        assert_eq!(select_by_id(&tasks, &filtered, None), Some(0));
        assert_eq!(select_by_id(&tasks, &[], Some(2)), None);
    }
}
