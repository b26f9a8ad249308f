use crate::{error::AppError, models::ProfileInput, workspace::Workspace};
use actix_web::{put, web, HttpResponse, Responder};

/// Replaces the editable profile fields of the signed-in user.
#[put("/profile")]
pub async fn update_profile(
    workspace: web::Data<Workspace>,
    form: web::Json<ProfileInput>,
) -> Result<impl Responder, AppError> {
    let user = workspace.session().update_profile(form.into_inner())?;
    Ok(HttpResponse::Ok().json(user))
}
