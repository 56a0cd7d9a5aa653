//! Synchronization controller behavior against the stub API.

use std::sync::atomic::Ordering;

use crewboard::api::ApiClient;
use crewboard::model::{TaskInput, TaskStatus};
use crewboard::sync::{MutationError, SyncController};
use crewboard::views;

mod support;

use support::StubServer;

fn controller_for(server: &StubServer) -> SyncController {
    SyncController::new(ApiClient::with_base_url(server.base_url.clone()))
}

#[tokio::test]
async fn load_all_populates_snapshot() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    server.seed_task("Close books", ana, "completed");
    server.seed_task("File report", ana, "pending");

    let mut controller = controller_for(&server);
    let snapshot = controller.load_all().await.expect("load");

    assert_eq!(snapshot.employees.len(), 1);
    assert_eq!(snapshot.tasks.len(), 2);
    assert_eq!(snapshot.dashboard.total_tasks, 2);
    assert_eq!(snapshot.dashboard.completed_tasks, 1);
    // Newest task first, per server ordering.
    assert_eq!(snapshot.tasks[0].title, "File report");
    assert_eq!(snapshot.tasks[0].employee_name, "Ana");
}

#[tokio::test]
async fn failed_read_commits_nothing() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    server.seed_task("Close books", ana, "completed");

    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");
    let before = controller.snapshot().expect("snapshot").clone();

    // Tasks endpoint fails while employees and dashboard still succeed.
    server.seed_task("Should not appear", ana, "pending");
    server.state.fail_task_list.store(true, Ordering::SeqCst);

    controller.load_all().await.expect_err("partial failure");
    let after = controller.snapshot().expect("snapshot");
    assert_eq!(after.tasks, before.tasks);
    assert_eq!(after.employees, before.employees);
    assert_eq!(after.dashboard, before.dashboard);
}

#[tokio::test]
async fn first_load_failure_leaves_no_snapshot() {
    let server = StubServer::spawn().await;
    server.state.fail_dashboard.store(true, Ordering::SeqCst);

    let mut controller = controller_for(&server);
    controller.load_all().await.expect_err("load failure");
    assert!(controller.snapshot().is_none());
}

#[tokio::test]
async fn create_task_refreshes_exactly_once() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");

    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");
    let task_hits_before = server.state.task_list_hits.load(Ordering::SeqCst);
    let dashboard_hits_before = server.state.dashboard_hits.load(Ordering::SeqCst);
    let employee_hits_before = server.state.employee_list_hits.load(Ordering::SeqCst);

    let input = TaskInput {
        title: "Ship release".to_string(),
        description: String::new(),
        employee_id: ana,
        status: TaskStatus::Pending,
        due_date: None,
    };
    let snapshot = controller.create_task(&input).await.expect("create");

    // One full resynchronization: each read endpoint hit exactly once.
    assert_eq!(
        server.state.task_list_hits.load(Ordering::SeqCst),
        task_hits_before + 1
    );
    assert_eq!(
        server.state.dashboard_hits.load(Ordering::SeqCst),
        dashboard_hits_before + 1
    );
    assert_eq!(
        server.state.employee_list_hits.load(Ordering::SeqCst),
        employee_hits_before + 1
    );
    assert!(snapshot.tasks.iter().any(|task| task.title == "Ship release"));
    assert_eq!(snapshot.dashboard.total_tasks, 1);
}

#[tokio::test]
async fn failed_delete_skips_refresh_and_keeps_state() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    let task_id = server.seed_task("Close books", ana, "completed");

    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");
    let before = controller.snapshot().expect("snapshot").clone();
    let hits_before = server.state.task_list_hits.load(Ordering::SeqCst);

    server.state.fail_writes.store(true, Ordering::SeqCst);
    let err = controller.delete_task(task_id).await.expect_err("delete fails");
    assert!(matches!(err, MutationError::Write(_)));

    // No resynchronization on a failed write.
    let hits_after = server.state.task_list_hits.load(Ordering::SeqCst);
    assert_eq!(hits_after, hits_before);
    assert_eq!(controller.snapshot().expect("snapshot").tasks, before.tasks);
    assert_eq!(server.task_titles(), vec!["Close books".to_string()]);
}

#[tokio::test]
async fn resync_failure_after_write_is_a_refresh_failure() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");

    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");
    let before = controller.snapshot().expect("snapshot").clone();

    // The POST succeeds but the follow-up reload fails.
    server.state.fail_task_list.store(true, Ordering::SeqCst);
    let input = TaskInput {
        title: "Ship release".to_string(),
        description: String::new(),
        employee_id: ana,
        status: TaskStatus::Pending,
        due_date: None,
    };
    let err = controller.create_task(&input).await.expect_err("refresh fails");

    // The write landed, so this must not look like a rejected write;
    // resubmitting it would create a duplicate.
    assert!(matches!(err, MutationError::Refresh(_)));
    assert_eq!(server.task_titles(), vec!["Ship release".to_string()]);
    assert_eq!(controller.snapshot().expect("snapshot").tasks, before.tasks);

    // A plain reload picks the task up once the endpoint recovers.
    server.state.fail_task_list.store(false, Ordering::SeqCst);
    let snapshot = controller.load_all().await.expect("recovery load");
    assert!(snapshot.tasks.iter().any(|task| task.title == "Ship release"));
}

#[tokio::test]
async fn update_then_refresh_shows_new_fields() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    let bea = server.seed_employee("Bea", "bea@example.com");
    let task_id = server.seed_task("Close books", ana, "pending");

    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");

    let input = TaskInput {
        title: "Close books".to_string(),
        description: "Q3".to_string(),
        employee_id: bea,
        status: TaskStatus::Completed,
        due_date: None,
    };
    let snapshot = controller.update_task(task_id, &input).await.expect("update");

    let task = snapshot
        .tasks
        .iter()
        .find(|task| task.id == task_id)
        .expect("updated task");
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.employee_id, bea);
    assert_eq!(task.employee_name, "Bea");
    assert_eq!(snapshot.dashboard.completed_tasks, 1);
}

#[tokio::test]
async fn refresh_is_idempotent_for_derived_views() {
    let server = StubServer::spawn().await;
    let ana = server.seed_employee("Ana", "ana@example.com");
    server.seed_task("Close books", ana, "completed");
    server.seed_task("File report", ana, "in_progress");
    server.seed_task("Ship release", ana, "pending");

    let mut controller = controller_for(&server);
    let first = controller.load_all().await.expect("first load").clone();
    let second = controller.load_all().await.expect("second load").clone();

    assert_eq!(first.tasks, second.tasks);
    assert_eq!(first.employees, second.employees);
    assert_eq!(
        views::status_chart(Some(&first.dashboard)),
        views::status_chart(Some(&second.dashboard))
    );
    assert_eq!(
        views::employee_chart(Some(&first.dashboard)),
        views::employee_chart(Some(&second.dashboard))
    );
}

#[tokio::test]
async fn create_employee_refreshes_roster() {
    let server = StubServer::spawn().await;
    let mut controller = controller_for(&server);
    controller.load_all().await.expect("initial load");

    let input = crewboard::model::EmployeeInput {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        department: "Finance".to_string(),
        position: "Analyst".to_string(),
    };
    let snapshot = controller.create_employee(&input).await.expect("create");
    assert_eq!(snapshot.employees.len(), 1);
    assert_eq!(snapshot.employees[0].name, "Ana");
    assert_eq!(snapshot.employees[0].department, "Finance");
}
