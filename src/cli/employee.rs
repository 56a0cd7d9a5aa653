//! crewboard employee subcommands
//!
//! Employees are create-only in the tracker API; there is no edit or
//! delete call to wrap.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::EmployeeInput;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::sync::SyncController;
use crate::views;

/// Options for `employee ls`
pub struct LsOptions {
    pub config: Config,
    pub output: OutputOptions,
}

/// Options for `employee add`
pub struct AddOptions {
    pub config: Config,
    pub output: OutputOptions,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
}

#[derive(serde::Serialize)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    department: String,
    position: String,
    total_tasks: usize,
    completed_tasks: usize,
}

#[derive(serde::Serialize)]
struct EmployeeListReport {
    total: usize,
    employees: Vec<EmployeeRow>,
}

#[derive(serde::Serialize)]
struct EmployeeAddReport {
    employees_total: usize,
}

pub fn run_ls(options: LsOptions) -> Result<()> {
    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let snapshot = super::block_on(async { controller.load_all().await.map(|s| s.clone()) })?;

    let stats = views::employee_stats(&snapshot.employees, &snapshot.tasks);
    let rows: Vec<EmployeeRow> = snapshot
        .employees
        .iter()
        .zip(stats.iter())
        .map(|(employee, stat)| EmployeeRow {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            total_tasks: stat.total_tasks,
            completed_tasks: stat.completed_tasks,
        })
        .collect();

    let report = EmployeeListReport {
        total: rows.len(),
        employees: rows,
    };

    let mut human = HumanOutput::new(format!(
        "crewboard employee ls: {} employees",
        report.total
    ));
    for row in &report.employees {
        human.push_detail(format!(
            "#{} {} <{}> ({}/{} tasks done)",
            row.id, row.name, row.email, row.completed_tasks, row.total_tasks
        ));
    }
    if report.employees.is_empty() {
        human.push_detail("no employees registered".to_string());
        human.push_next_step("crewboard employee add <name> --email <email>".to_string());
    }

    emit_success(options.output, "employee ls", &report, Some(&human))?;
    Ok(())
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidArgument("name cannot be empty".to_string()));
    }
    let email = options.email.trim().to_string();
    if email.is_empty() {
        return Err(Error::InvalidArgument("email cannot be empty".to_string()));
    }

    let input = EmployeeInput {
        name: name.clone(),
        email,
        department: options.department,
        position: options.position,
    };

    let client = ApiClient::new(&options.config.api)?;
    let mut controller = SyncController::new(client);
    let snapshot = super::block_on(async {
        let snapshot = controller.create_employee(&input).await.map_err(Error::from)?;
        Ok::<_, Error>(snapshot.clone())
    })?;

    let report = EmployeeAddReport {
        employees_total: snapshot.employees.len(),
    };

    let mut human = HumanOutput::new(format!("crewboard employee add: created '{name}'"));
    human.push_summary("employees total", snapshot.employees.len().to_string());
    human.push_next_step("crewboard employee ls".to_string());

    emit_success(options.output, "employee add", &report, Some(&human))?;
    Ok(())
}
