//! crewboard dashboard command implementation
//!
//! One-shot summary of the tracker state: status buckets, per-employee
//! workload, and the most recent tasks.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::model::Task;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::sync::SyncController;
use crate::views::{self, EmployeeBar, StatusBucket};

/// Options for the dashboard command
pub struct DashboardOptions {
    pub config: Config,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct DashboardReport {
    total_tasks: u64,
    completion_rate: String,
    status_chart: Vec<StatusBucket>,
    workload: Vec<EmployeeBar>,
    recent_tasks: Vec<RecentTask>,
}

#[derive(serde::Serialize)]
struct RecentTask {
    id: i64,
    title: String,
    employee_name: String,
    status: &'static str,
}

pub fn run(options: DashboardOptions) -> Result<()> {
    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let snapshot = super::block_on(async { controller.load_all().await.map(|s| s.clone()) })?;

    let status_chart = views::status_chart(Some(&snapshot.dashboard));
    let workload = views::employee_chart(Some(&snapshot.dashboard));
    let recent = views::recent_tasks(&snapshot.tasks, options.config.ui.recent_limit);

    let report = DashboardReport {
        total_tasks: snapshot.dashboard.total_tasks,
        completion_rate: views::completion_rate_label(&snapshot.dashboard),
        status_chart: status_chart.clone(),
        workload: workload.clone(),
        recent_tasks: recent.iter().map(recent_row).collect(),
    };

    let mut human = HumanOutput::new(format!(
        "crewboard dashboard: {} tasks, {} complete",
        snapshot.dashboard.total_tasks,
        views::completion_rate_label(&snapshot.dashboard)
    ));
    for bucket in &status_chart {
        human.push_summary(bucket.label, bucket.count.to_string());
    }
    for bar in &workload {
        human.push_detail(format!("{}: {} tasks", bar.name, bar.tasks));
    }
    for task in recent {
        human.push_detail(format!(
            "recent #{} {} ({}) [{}]",
            task.id, task.title, task.employee_name, task.status
        ));
    }
    if snapshot.employees.is_empty() {
        human.push_warning("no employees registered".to_string());
        human.push_next_step("crewboard employee add <name> --email <email>".to_string());
    }
    if snapshot.tasks.is_empty() {
        human.push_next_step("crewboard task add <title> --employee <id>".to_string());
    }

    emit_success(options.output, "dashboard", &report, Some(&human))?;

    Ok(())
}

fn recent_row(task: &Task) -> RecentTask {
    RecentTask {
        id: task.id,
        title: task.title.clone(),
        employee_name: task.employee_name.clone(),
        status: task.status.as_str(),
    }
}
