use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TaskCreate, TaskQuery, TaskUpdate},
    services::task,
    state::AppState,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `completed` (optional): filter by completion state (`true`/`false`).
/// - `sort` (optional): `created`, `title` or `due_date`. Without it, tasks
///   come back most recently created first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, all owned by the caller.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    user: CurrentUser,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = task::list(state.store.as_ref(), &user, &query).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is always the caller; nothing in the payload can assign the
/// task to anyone else.
///
/// ## Responses:
/// - `201 Created`: the new `Task` as JSON.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: title empty/too long or description too long.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_data: web::Json<TaskCreate>,
) -> Result<impl Responder, AppError> {
    let created = task::create(state.store.as_ref(), &user, task_data.into_inner()).await?;
    log::info!("Task created: '{}' by user '{}'", created.title, user.email);
    Ok(HttpResponse::Created().json(created))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the `Task` as JSON.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with that id exists.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let found = task::get(state.store.as_ref(), &user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Partially updates a task owned by the authenticated user.
///
/// Only fields present in the payload are changed; the owner is immutable.
///
/// ## Responses:
/// - `200 OK`: the updated `Task` as JSON.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with that id exists.
/// - `422 Unprocessable Entity`: a supplied field violates its bounds.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let updated = task::update(
        state.store.as_ref(),
        &user,
        task_id.into_inner(),
        task_data.into_inner(),
    )
    .await?;
    log::info!("Task updated: '{}' by user '{}'", updated.title, user.email);
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with that id exists.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    task::delete(state.store.as_ref(), &user, id).await?;
    log::info!("Task {} deleted by user '{}'", id, user.email);
    Ok(HttpResponse::NoContent().finish())
}

/// Flips the completion flag on a task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: the toggled `Task` as JSON.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with that id exists.
#[patch("/{id}/complete")]
pub async fn toggle_complete(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let toggled = task::toggle_complete(state.store.as_ref(), &user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(toggled))
}
