//! Synchronization core
//!
//! Owns the single authoritative snapshot of employees, tasks, and the
//! dashboard aggregate. `load_all` fetches the three server views
//! concurrently and commits them all together or not at all; every
//! successful mutation discards the snapshot and re-fetches, so the
//! three collections are always mutually consistent as of the last
//! successful load. There is no incremental patching.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::model::{DashboardSummary, Employee, EmployeeInput, Task, TaskInput};

/// Which phase of a write-then-refresh cycle failed.
///
/// A rejected write leaves the server unchanged, so resubmitting the
/// same request is safe. A failed refresh after a successful write
/// means the change is already on the server and only the local
/// snapshot is stale; resubmitting would duplicate the write, so
/// callers should retry the load instead.
#[derive(Debug)]
pub enum MutationError {
    Write(Error),
    Refresh(Error),
}

impl MutationError {
    pub fn into_inner(self) -> Error {
        match self {
            MutationError::Write(err) | MutationError::Refresh(err) => err,
        }
    }
}

impl From<MutationError> for Error {
    fn from(err: MutationError) -> Self {
        err.into_inner()
    }
}

/// One consistent copy of the three server-side views.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub tasks: Vec<Task>,
    pub dashboard: DashboardSummary,
    pub fetched_at: DateTime<Utc>,
}

/// Fetch, mutate, and refresh controller for the tracker API.
///
/// Holds the previous snapshot across failed loads so consumers keep
/// seeing pre-failure state.
#[derive(Debug)]
pub struct SyncController {
    client: ApiClient,
    snapshot: Option<Snapshot>,
}

impl SyncController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            snapshot: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current snapshot, if at least one load has succeeded.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Fetch employees, tasks, and dashboard concurrently and replace
    /// the snapshot with all three.
    ///
    /// All-or-nothing: if any of the three reads fails, nothing is
    /// committed and the previous snapshot stays untouched.
    pub async fn load_all(&mut self) -> Result<&Snapshot> {
        let result = tokio::try_join!(
            self.client.list_employees(),
            self.client.list_tasks(),
            self.client.dashboard(),
        );
        match result {
            Ok((employees, tasks, dashboard)) => {
                debug!(
                    employees = employees.len(),
                    tasks = tasks.len(),
                    "snapshot refreshed"
                );
                Ok(self.snapshot.insert(Snapshot {
                    employees,
                    tasks,
                    dashboard,
                    fetched_at: Utc::now(),
                }))
            }
            Err(err) => {
                warn!(error = %err, "snapshot refresh failed, keeping prior state");
                Err(err)
            }
        }
    }

    /// Create a task, then resynchronize.
    ///
    /// The refresh runs only when the write succeeds; a failed write
    /// leaves the snapshot exactly as it was. The error reports which
    /// phase failed so a refresh failure is not retried as a write.
    pub async fn create_task(
        &mut self,
        input: &TaskInput,
    ) -> std::result::Result<&Snapshot, MutationError> {
        self.client
            .create_task(input)
            .await
            .map_err(MutationError::Write)?;
        self.load_all().await.map_err(MutationError::Refresh)
    }

    /// Update a task, then resynchronize.
    pub async fn update_task(
        &mut self,
        id: i64,
        input: &TaskInput,
    ) -> std::result::Result<&Snapshot, MutationError> {
        self.client
            .update_task(id, input)
            .await
            .map_err(MutationError::Write)?;
        self.load_all().await.map_err(MutationError::Refresh)
    }

    /// Delete a task, then resynchronize.
    pub async fn delete_task(&mut self, id: i64) -> std::result::Result<&Snapshot, MutationError> {
        self.client
            .delete_task(id)
            .await
            .map_err(MutationError::Write)?;
        self.load_all().await.map_err(MutationError::Refresh)
    }

    /// Create an employee, then resynchronize.
    pub async fn create_employee(
        &mut self,
        input: &EmployeeInput,
    ) -> std::result::Result<&Snapshot, MutationError> {
        self.client
            .create_employee(input)
            .await
            .map_err(MutationError::Write)?;
        self.load_all().await.map_err(MutationError::Refresh)
    }
}
