use crate::{error::AppError, id::parse_id, models::MessageInput, workspace::Workspace};
use actix_web::{get, post, web, HttpResponse, Responder};

/// The project's chat, oldest first.
#[get("/{project_id}/messages")]
pub async fn get_messages(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let messages = workspace.messages(parse_id(&project_id)?)?;
    Ok(HttpResponse::Ok().json(messages))
}

/// Appends a message signed with the current user's id and name.
#[post("/{project_id}/messages")]
pub async fn send_message(
    workspace: web::Data<Workspace>,
    project_id: web::Path<String>,
    form: web::Json<MessageInput>,
) -> Result<impl Responder, AppError> {
    let message = workspace.send_message(parse_id(&project_id)?, form.into_inner())?;
    Ok(HttpResponse::Created().json(message))
}
