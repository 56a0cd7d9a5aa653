//! HTTP client for the task tracker API
//!
//! Thin wrapper around `reqwest` that maps every call onto the server's
//! `/api` endpoints. Any non-success status is collapsed into a single
//! failure kind regardless of body content; structured error payloads
//! are never parsed. No retries and no caching live here.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::model::{DashboardSummary, Employee, EmployeeInput, Task, TaskInput};

/// Client for the task tracker REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
        })
    }

    /// Build a client with default transport settings for a bare URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Fetch all employees, ordered by name server-side.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let endpoint = "/api/employees";
        let response = self.http.get(self.url(endpoint)).send().await?;
        let response = check_status(endpoint, response)?;
        Ok(response.json().await?)
    }

    /// Fetch all tasks, newest first server-side.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let endpoint = "/api/tasks";
        let response = self.http.get(self.url(endpoint)).send().await?;
        let response = check_status(endpoint, response)?;
        Ok(response.json().await?)
    }

    /// Fetch the server-computed dashboard aggregate.
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let endpoint = "/api/dashboard";
        let response = self.http.get(self.url(endpoint)).send().await?;
        let response = check_status(endpoint, response)?;
        Ok(response.json().await?)
    }

    pub async fn create_task(&self, input: &TaskInput) -> Result<()> {
        let endpoint = "/api/tasks";
        debug!(title = %input.title, "creating task");
        let response = self.http.post(self.url(endpoint)).json(input).send().await?;
        check_status(endpoint, response)?;
        Ok(())
    }

    pub async fn update_task(&self, id: i64, input: &TaskInput) -> Result<()> {
        let endpoint = format!("/api/tasks/{id}");
        debug!(id, "updating task");
        let response = self.http.put(self.url(&endpoint)).json(input).send().await?;
        check_status(&endpoint, response)?;
        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let endpoint = format!("/api/tasks/{id}");
        debug!(id, "deleting task");
        let response = self.http.delete(self.url(&endpoint)).send().await?;
        check_status(&endpoint, response)?;
        Ok(())
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> Result<()> {
        let endpoint = "/api/employees";
        debug!(name = %input.name, "creating employee");
        let response = self.http.post(self.url(endpoint)).json(input).send().await?;
        check_status(endpoint, response)?;
        Ok(())
    }

    /// Verify an employee id exists before a task write, so a bad
    /// assignee is reported as a user error rather than a server
    /// rejection.
    pub async fn ensure_employee(&self, id: i64) -> Result<()> {
        let employees = self.list_employees().await?;
        if employees.iter().any(|employee| employee.id == id) {
            Ok(())
        } else {
            Err(Error::EmployeeNotFound(id))
        }
    }

    /// Fetch a single task by id. A 404 surfaces as a user error.
    pub async fn get_task(&self, id: i64) -> Result<Task> {
        let endpoint = format!("/api/tasks/{id}");
        let response = self.http.get(self.url(&endpoint)).send().await?;
        let response = check_status(&endpoint, response)?;
        Ok(response.json().await?)
    }
}

fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // 404 on a task path means the id was bad, everything else is the
    // coarse "request failed" bucket.
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = task_id_from_endpoint(endpoint) {
            return Err(Error::TaskNotFound(id));
        }
    }
    Err(Error::Api {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
    })
}

fn task_id_from_endpoint(endpoint: &str) -> Option<i64> {
    endpoint
        .strip_prefix("/api/tasks/")
        .and_then(|rest| rest.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_endpoint() {
        let client = ApiClient::with_base_url("http://localhost:5000/");
        assert_eq!(client.url("/api/tasks"), "http://localhost:5000/api/tasks");
    }

    #[test]
    fn task_id_extracted_from_item_endpoints_only() {
        assert_eq!(task_id_from_endpoint("/api/tasks/42"), Some(42));
        assert_eq!(task_id_from_endpoint("/api/tasks"), None);
        assert_eq!(task_id_from_endpoint("/api/employees"), None);
    }
}
