use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use taskloom::auth::{AuthResponse, TokenCodec};
use taskloom::models::Task;
use taskloom::routes;
use taskloom::state::AppState;
use taskloom::storage::MemStorage;

fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemStorage::new()),
        TokenCodec::new("integration-test-secret", Duration::minutes(30)),
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(routes::health::health)
                .service(web::scope("/api").configure(routes::config)),
        )
        .await
    };
}

macro_rules! register_user {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "email": $email,
                "password": "Password123!"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let auth: AuthResponse = test::read_body_json(resp).await;
        auth.token
    }};
}

macro_rules! create_task {
    ($app:expr, $token:expr, $payload:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json($payload)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let task: Task = test::read_body_json(resp).await;
        task
    }};
}

#[actix_rt::test]
async fn test_task_lifecycle() {
    let app = test_app!(test_state());
    let token = register_user!(app, "a@x.com");

    // Create
    let task = create_task!(app, token, json!({ "title": "Buy milk" }));
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);

    // List contains exactly that task
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Buy milk");
    assert!(!tasks[0].completed);

    // Delete it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);

    // Fetching the deleted id is now a 404
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_cross_principal_access() {
    let app = test_app!(test_state());
    let token_a = register_user!(app, "alice@x.com");
    let token_b = register_user!(app, "bob@x.com");

    let task = create_task!(app, token_a, json!({ "title": "Alice's task" }));

    // B reading A's task is Forbidden
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

    // B reading a non-existent id is NotFound
    let req = test::TestRequest::get()
        .uri("/api/tasks/99999")
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    // B cannot update or delete A's task either
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

    // A still sees it untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token_a)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let unchanged: Task = test::read_body_json(resp).await;
    assert_eq!(unchanged.title, "Alice's task");
}

#[actix_rt::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = test_app!(test_state());

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "No token" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_create_validation() {
    let app = test_app!(test_state());
    let token = register_user!(app, "validator@x.com");

    // Empty title
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
    );

    // Title too long
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "a".repeat(201) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
    );

    // Description too long
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "ok", "description": "b".repeat(1001) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
    );

    // Nothing slipped through
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert!(tasks.is_empty());
}

#[actix_rt::test]
async fn test_partial_update_via_put() {
    let app = test_app!(test_state());
    let token = register_user!(app, "updater@x.com");

    let task = create_task!(
        app,
        token,
        json!({ "title": "Original", "description": "keep me" })
    );

    // Send only the title; the description must survive.
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "Renamed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert_eq!(updated.owner_id, task.owner_id);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at >= task.updated_at);
}

#[actix_rt::test]
async fn test_toggle_complete_is_an_involution() {
    let app = test_app!(test_state());
    let token = register_user!(app, "toggler@x.com");

    let task = create_task!(app, token, json!({ "title": "Flip me" }));
    assert!(!task.completed);

    std::thread::sleep(std::time::Duration::from_millis(5));
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}/complete", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let once: Task = test::read_body_json(resp).await;
    assert!(once.completed);
    assert!(once.updated_at > task.updated_at);

    std::thread::sleep(std::time::Duration::from_millis(5));
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}/complete", task.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let twice: Task = test::read_body_json(resp).await;
    assert!(!twice.completed);
    assert!(twice.updated_at > once.updated_at);
}

#[actix_rt::test]
async fn test_list_filter_and_sort() {
    let app = test_app!(test_state());
    let token = register_user!(app, "lister@x.com");

    let banana = create_task!(app, token, json!({ "title": "banana" }));
    create_task!(app, token, json!({ "title": "apple" }));
    create_task!(app, token, json!({ "title": "cherry" }));

    // Mark one completed
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}/complete", banana.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    // completed=true returns just that one
    let req = test::TestRequest::get()
        .uri("/api/tasks?completed=true")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "banana");

    // completed=false returns the other two
    let req = test::TestRequest::get()
        .uri("/api/tasks?completed=false")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 2);

    // sort=title is lexicographic
    let req = test::TestRequest::get()
        .uri("/api/tasks?sort=title")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "banana", "cherry"]);
}
