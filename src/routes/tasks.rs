use crate::{
    auth::extractors::AuthenticatedUserId,
    error::AppError,
    models::{PageQuery, Task, TaskInput, TaskPage, TaskUpdate},
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves one page of the authenticated user's tasks.
///
/// Tasks are ordered by creation date descending (most recent first) and
/// scoped to the caller: other users' tasks are never visible here.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page number; defaults to 1 when absent or
///   non-numeric.
/// - `limit` (optional): page size; defaults to 10 when absent or
///   non-numeric. No upper bound is enforced.
///
/// ## Responses:
/// - `200 OK`: `{totalTasks, totalPages, currentPage, tasks[]}`.
/// - `401 Unauthorized`: If the request lacks a valid token.
/// - `500 Internal Server Error`: For store failures.
#[get("")]
pub async fn list_tasks(
    store: web::Data<dyn Store>,
    query: web::Query<PageQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let page = query.page();
    let limit = query.limit();

    let (tasks, total) = store
        .find_and_count_tasks(user.0, limit, query.offset())
        .await?;

    Ok(HttpResponse::Ok().json(TaskPage::new(tasks, total, page, limit)))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is always the authenticated caller; an owner or user id supplied
/// in the payload is ignored. Omitted `status`/`priority` take the model
/// defaults (`pending`/`medium`); a value outside the enumerated set is
/// rejected at deserialization.
///
/// ## Request Body:
/// - `title`: required, non-blank.
/// - `description` (optional).
/// - `status` (optional): one of `pending`, `in_progress`, `completed`.
/// - `priority` (optional): one of `low`, `medium`, `high`, `urgent`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` as JSON.
/// - `400 Bad Request`: Missing/blank title, or invalid status/priority.
/// - `401 Unauthorized`: If the request lacks a valid token.
/// - `500 Internal Server Error`: For store failures.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    body: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    body.validate()?;

    let task = Task::new(body.into_inner(), user.0);
    let task = store.insert_task(task).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Updates a task owned by the authenticated user.
///
/// Any subset of {title, description, status, priority} may be supplied.
/// The write is a single statement conditioned on both the task id and the
/// caller's id, so a task owned by someone else reports the same 404 as a
/// missing one.
///
/// ## Responses:
/// - `200 OK`: Returns the post-update `Task` as JSON.
/// - `400 Bad Request`: Blank title, or invalid status/priority.
/// - `401 Unauthorized`: If the request lacks a valid token.
/// - `404 Not Found`: Task missing, or owned by a different user.
/// - `500 Internal Server Error`: For store failures.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn Store>,
    task_id: web::Path<Uuid>,
    body: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = store
        .update_task_where(task_id.into_inner(), user.0, body.into_inner())
        .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task owned by the authenticated user.
///
/// Deletion is permanent. The delete is conditioned on both the task id and
/// the caller's id; deleting a missing or differently-owned task yields 404.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid token.
/// - `404 Not Found`: Task missing, already deleted, or owned by a different user.
/// - `500 Internal Server Error`: For store failures.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let deleted = store
        .delete_task_where(task_id.into_inner(), user.0)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
