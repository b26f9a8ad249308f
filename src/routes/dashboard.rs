use crate::{error::AppError, session::CurrentUser, workspace::Workspace};
use actix_web::{get, web, HttpResponse, Responder};

/// Project list with overall counters and the incomplete-profile notice.
#[get("/dashboard")]
pub async fn dashboard(
    workspace: web::Data<Workspace>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let dashboard = workspace.dashboard(&user.0)?;
    Ok(HttpResponse::Ok().json(dashboard))
}
