use crate::{
    error::AppError,
    models::{SignInInput, SignUpInput},
    workspace::Workspace,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Sign up
///
/// Fabricates a local user from the form, persists it and starts the inactivity
/// countdown. A blank full name is rejected with 422 and leaves the session signed out.
#[post("/sign-up")]
pub async fn sign_up(
    workspace: web::Data<Workspace>,
    form: web::Json<SignUpInput>,
) -> Result<impl Responder, AppError> {
    let user = workspace.session().sign_up(form.into_inner())?;
    Ok(HttpResponse::Created().json(user))
}

/// Sign in
///
/// No credentials are checked: any well-formed email and password produce a local user
/// named after the email.
#[post("/sign-in")]
pub async fn sign_in(
    workspace: web::Data<Workspace>,
    form: web::Json<SignInInput>,
) -> Result<impl Responder, AppError> {
    let user = workspace.session().sign_in(form.into_inner())?;
    Ok(HttpResponse::Ok().json(user))
}

/// Sign out
///
/// Idempotent; always answers `204 No Content` unless the stored user cannot be removed.
#[post("/sign-out")]
pub async fn sign_out(workspace: web::Data<Workspace>) -> Result<impl Responder, AppError> {
    workspace.close_project();
    workspace.session().sign_out()?;
    Ok(HttpResponse::NoContent().finish())
}
