//! Wire contract between the API client and the tracker endpoints.

use std::sync::atomic::Ordering;

use crewboard::api::ApiClient;
use crewboard::model::{EmployeeInput, TaskInput, TaskStatus};
use crewboard::Error;

mod support;

use support::StubServer;

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = StubServer::spawn().await;
    server.state.fail_dashboard.store(true, Ordering::SeqCst);

    let client = ApiClient::with_base_url(server.base_url.clone());
    let err = client.dashboard().await.expect_err("injected failure");
    match err {
        Error::Api { endpoint, status } => {
            assert_eq!(endpoint, "/api/dashboard");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    // Reserved port with nothing listening.
    let client = ApiClient::with_base_url("http://127.0.0.1:9");
    let err = client.list_tasks().await.expect_err("connect failure");
    match err {
        Error::Http(_) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn delete_missing_task_maps_to_not_found() {
    let server = StubServer::spawn().await;
    let client = ApiClient::with_base_url(server.base_url.clone());

    let err = client.delete_task(41).await.expect_err("missing task");
    match err {
        Error::TaskNotFound(41) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn create_and_list_round_trip() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    let client = ApiClient::with_base_url(server.base_url.clone());

    let input = TaskInput {
        title: "Ship release".to_string(),
        description: "cut the tag".to_string(),
        employee_id: ana,
        status: TaskStatus::InProgress,
        due_date: Some(crewboard::model::parse_due_date("2026-09-15").expect("date")),
    };
    client.create_task(&input).await.expect("create");

    let tasks = client.list_tasks().await.expect("list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Ship release");
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(
        tasks[0].due_date.map(|date| date.to_string()),
        Some("2026-09-15".to_string())
    );
}

#[tokio::test]
async fn employees_sorted_by_name_server_side() {
    let server = StubServer::spawn().await;
    server.seed_employee("Zoe", "zoe@example.com");
    server.seed_employee("Ana", "ana@example.com");
    let client = ApiClient::with_base_url(server.base_url.clone());

    let employees = client.list_employees().await.expect("list");
    let names: Vec<&str> = employees.iter().map(|employee| employee.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Zoe"]);
}

#[tokio::test]
async fn create_employee_posts_full_shape() {
    let server = StubServer::spawn().await;
    let client = ApiClient::with_base_url(server.base_url.clone());

    let input = EmployeeInput {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        department: "Finance".to_string(),
        position: "Analyst".to_string(),
    };
    client.create_employee(&input).await.expect("create");

    let employees = client.list_employees().await.expect("list");
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].department, "Finance");
    assert_eq!(employees[0].position, "Analyst");
}

#[tokio::test]
async fn get_task_fetches_by_id() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    let id = server.seed_task("Close books", ana, "pending");
    server.seed_task("File report", ana, "pending");
    let client = ApiClient::with_base_url(server.base_url.clone());

    let task = client.get_task(id).await.expect("found");
    assert_eq!(task.title, "Close books");
    assert_eq!(task.employee_name, "Ana");

    let err = client.get_task(id + 100).await.expect_err("missing");
    match err {
        Error::TaskNotFound(_) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_employee_read_surfaces_endpoint() {
    let server = StubServer::spawn().await;
    server.state.fail_employee_list.store(true, Ordering::SeqCst);
    let client = ApiClient::with_base_url(server.base_url.clone());

    let err = client.list_employees().await.expect_err("injected failure");
    match err {
        Error::Api { endpoint, .. } => assert_eq!(endpoint, "/api/employees"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_assignee_is_a_user_error() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    let client = ApiClient::with_base_url(server.base_url.clone());

    client.ensure_employee(ana).await.expect("known employee");

    let err = client.ensure_employee(ana + 50).await.expect_err("unknown");
    match err {
        Error::EmployeeNotFound(id) => assert_eq!(id, ana + 50),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}
