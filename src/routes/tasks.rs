use crate::{
    error::AppError,
    id::parse_id,
    models::{TaskInput, TaskQuery, TaskStatus},
    workspace::Workspace,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Get the tasks of a project
///
/// Newest first. Accepts `search`, `priority` and `status` query parameters; all of
/// them must match.
///
/// ## Responses:
/// - `200 OK`: the matching tasks.
/// - `400 Bad Request`: malformed project id.
/// - `404 Not Found`: unknown project.
#[get("/{project_id}/tasks")]
pub async fn get_tasks(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = workspace.tasks(parse_id(&project_id)?, &query)?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// The four board columns with the filter applied, and whether a filter is active.
#[get("/{project_id}/tasks/board")]
pub async fn get_board(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let board = workspace.board(parse_id(&project_id)?, &query)?;
    Ok(HttpResponse::Ok().json(board))
}

#[get("/{project_id}/tasks/stats")]
pub async fn get_task_stats(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let stats = workspace.task_stats(parse_id(&project_id)?)?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Create a new task
///
/// ## Responses:
/// - `201 Created`: the new task, placed first in the project's list.
/// - `422 Unprocessable Entity`: blank or oversized title.
#[post("/{project_id}/tasks")]
pub async fn create_task(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
    form: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = workspace.create_task(parse_id(&project_id)?, form.into_inner())?;
    Ok(HttpResponse::Created().json(task))
}

/// Moves a task to another board column.
#[put("/{project_id}/tasks/{task_id}/status")]
pub async fn update_task_status(
    workspace: web::Data<Workspace>,
    path: web::Path<(String, String)>,
    update: web::Json<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    let task = workspace.set_task_status(parse_id(&project_id)?, parse_id(&task_id)?, update.status)?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{project_id}/tasks/{task_id}")]
pub async fn delete_task(
    workspace: web::Data<Workspace>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    workspace.delete_task(parse_id(&project_id)?, parse_id(&task_id)?)?;
    Ok(HttpResponse::NoContent().finish())
}
