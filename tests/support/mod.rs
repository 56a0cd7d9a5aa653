//! In-process stub of the employee task tracker API for tests.
//!
//! Mirrors the wire contract the client depends on: employees ordered
//! by name, tasks newest first with a denormalized `employee_name`, and
//! a dashboard aggregate. Per-endpoint failure toggles and hit counters
//! let tests drive error paths and count refreshes.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
struct EmployeeRecord {
    id: i64,
    name: String,
    email: String,
    department: String,
    position: String,
}

#[derive(Debug, Clone)]
struct TaskRecord {
    id: i64,
    title: String,
    description: String,
    employee_id: i64,
    status: String,
    due_date: Option<String>,
}

#[derive(Default)]
pub struct StubState {
    employees: Mutex<Vec<EmployeeRecord>>,
    tasks: Mutex<Vec<TaskRecord>>,
    next_employee_id: AtomicI64,
    next_task_id: AtomicI64,
    pub employee_list_hits: AtomicUsize,
    pub task_list_hits: AtomicUsize,
    pub dashboard_hits: AtomicUsize,
    pub fail_employee_list: AtomicBool,
    pub fail_task_list: AtomicBool,
    pub fail_dashboard: AtomicBool,
    pub fail_writes: AtomicBool,
}

pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubServer {
    /// Bind the stub on an ephemeral port and serve it in the background.
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());
        state.next_employee_id.store(1, Ordering::SeqCst);
        state.next_task_id.store(1, Ordering::SeqCst);

        let router = Router::new()
            .route("/api/employees", get(list_employees).post(create_employee))
            .route("/api/tasks", get(list_tasks).post(create_task))
            .route(
                "/api/tasks/:id",
                get(get_task).put(update_task).delete(delete_task),
            )
            .route("/api/dashboard", get(dashboard))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Seed one employee and return its id.
    pub fn seed_employee(&self, name: &str, email: &str) -> i64 {
        let id = self.state.next_employee_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .employees
            .lock()
            .expect("employees lock")
            .push(EmployeeRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                department: String::new(),
                position: String::new(),
            });
        id
    }

    /// Seed one task and return its id. Tasks are stored newest first.
    pub fn seed_task(&self, title: &str, employee_id: i64, status: &str) -> i64 {
        let id = self.state.next_task_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .tasks
            .lock()
            .expect("tasks lock")
            .insert(
                0,
                TaskRecord {
                    id,
                    title: title.to_string(),
                    description: String::new(),
                    employee_id,
                    status: status.to_string(),
                    due_date: None,
                },
            );
        id
    }

    pub fn task_titles(&self) -> Vec<String> {
        self.state
            .tasks
            .lock()
            .expect("tasks lock")
            .iter()
            .map(|task| task.title.clone())
            .collect()
    }
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "injected"}))).into_response()
}

fn employee_name(state: &StubState, employee_id: i64) -> String {
    state
        .employees
        .lock()
        .expect("employees lock")
        .iter()
        .find(|employee| employee.id == employee_id)
        .map(|employee| employee.name.clone())
        .unwrap_or_default()
}

fn task_json(state: &StubState, task: &TaskRecord) -> Value {
    json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "employee_id": task.employee_id,
        "employee_name": employee_name(state, task.employee_id),
        "status": task.status,
        "due_date": task.due_date,
        "created_at": "2026-01-01 09:00:00",
        "updated_at": "2026-01-01 09:00:00",
    })
}

async fn list_employees(State(state): State<Arc<StubState>>) -> Response {
    state.employee_list_hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_employee_list.load(Ordering::SeqCst) {
        return failure();
    }
    let mut employees = state.employees.lock().expect("employees lock").clone();
    employees.sort_by(|left, right| left.name.cmp(&right.name));
    let body: Vec<Value> = employees
        .iter()
        .map(|employee| {
            json!({
                "id": employee.id,
                "name": employee.name,
                "email": employee.email,
                "department": employee.department,
                "position": employee.position,
                "created_at": "2026-01-01 09:00:00",
            })
        })
        .collect();
    Json(body).into_response()
}

async fn create_employee(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return failure();
    }
    let id = state.next_employee_id.fetch_add(1, Ordering::SeqCst);
    let record = EmployeeRecord {
        id,
        name: body["name"].as_str().unwrap_or_default().to_string(),
        email: body["email"].as_str().unwrap_or_default().to_string(),
        department: body["department"].as_str().unwrap_or_default().to_string(),
        position: body["position"].as_str().unwrap_or_default().to_string(),
    };
    state.employees.lock().expect("employees lock").push(record);
    (StatusCode::CREATED, Json(json!({"id": id}))).into_response()
}

async fn list_tasks(State(state): State<Arc<StubState>>) -> Response {
    state.task_list_hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_task_list.load(Ordering::SeqCst) {
        return failure();
    }
    let tasks = state.tasks.lock().expect("tasks lock").clone();
    let body: Vec<Value> = tasks.iter().map(|task| task_json(&state, task)).collect();
    Json(body).into_response()
}

async fn get_task(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let tasks = state.tasks.lock().expect("tasks lock");
    match tasks.iter().find(|task| task.id == id) {
        Some(task) => Json(task_json(&state, task)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
    }
}

async fn create_task(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return failure();
    }
    let id = state.next_task_id.fetch_add(1, Ordering::SeqCst);
    let record = TaskRecord {
        id,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        employee_id: body["employee_id"].as_i64().unwrap_or_default(),
        status: body["status"].as_str().unwrap_or("pending").to_string(),
        due_date: body["due_date"].as_str().map(|value| value.to_string()),
    };
    // Newest first, matching the server's created_at DESC ordering.
    state.tasks.lock().expect("tasks lock").insert(0, record);
    (StatusCode::CREATED, Json(json!({"id": id}))).into_response()
}

async fn update_task(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return failure();
    }
    let mut tasks = state.tasks.lock().expect("tasks lock");
    let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response();
    };
    task.title = body["title"].as_str().unwrap_or_default().to_string();
    task.description = body["description"].as_str().unwrap_or_default().to_string();
    task.employee_id = body["employee_id"].as_i64().unwrap_or(task.employee_id);
    task.status = body["status"].as_str().unwrap_or("pending").to_string();
    task.due_date = body["due_date"].as_str().map(|value| value.to_string());
    Json(json!({"message": "Task updated"})).into_response()
}

async fn delete_task(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return failure();
    }
    let mut tasks = state.tasks.lock().expect("tasks lock");
    let before = tasks.len();
    tasks.retain(|task| task.id != id);
    if tasks.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response();
    }
    Json(json!({"message": "Task deleted"})).into_response()
}

async fn dashboard(State(state): State<Arc<StubState>>) -> Response {
    state.dashboard_hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_dashboard.load(Ordering::SeqCst) {
        return failure();
    }
    let tasks = state.tasks.lock().expect("tasks lock").clone();
    let employees = state.employees.lock().expect("employees lock").clone();

    let total = tasks.len() as u64;
    let completed = tasks.iter().filter(|task| task.status == "completed").count() as u64;
    let in_progress = tasks
        .iter()
        .filter(|task| task.status == "in_progress")
        .count() as u64;
    let pending = total - completed - in_progress;
    let completion_rate = if total > 0 {
        completed as f64 * 100.0 / total as f64
    } else {
        0.0
    };

    let mut by_employee: Vec<Value> = employees
        .iter()
        .map(|employee| {
            let count = tasks
                .iter()
                .filter(|task| task.employee_id == employee.id)
                .count() as u64;
            json!({
                "employee_id": employee.id,
                "employee_name": employee.name,
                "task_count": count,
            })
        })
        .filter(|row| row["task_count"].as_u64().unwrap_or(0) > 0)
        .collect();
    by_employee.sort_by_key(|row| std::cmp::Reverse(row["task_count"].as_u64().unwrap_or(0)));

    Json(json!({
        "total_tasks": total,
        "completed_tasks": completed,
        "in_progress_tasks": in_progress,
        "pending_tasks": pending,
        "completion_rate": completion_rate,
        "tasks_by_employee": by_employee,
    }))
    .into_response()
}
