use crate::{error::AppError, id::parse_id, models::ProjectInput, workspace::Workspace};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Lists all projects, newest first.
#[get("")]
pub async fn list_projects(workspace: web::Data<Workspace>) -> impl Responder {
    HttpResponse::Ok().json(workspace.projects())
}

/// Creates a project from the "New Project" form.
///
/// ## Responses:
/// - `201 Created`: the new project.
/// - `422 Unprocessable Entity`: blank name.
/// - `500 Internal Server Error`: the project list could not be written.
#[post("")]
pub async fn create_project(
    workspace: web::Data<Workspace>,
    form: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    let project = workspace.create_project(form.into_inner())?;
    Ok(HttpResponse::Created().json(project))
}

#[get("/{project_id}")]
pub async fn get_project(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let project = workspace.project(parse_id(&project_id)?)?;
    Ok(HttpResponse::Ok().json(project))
}
