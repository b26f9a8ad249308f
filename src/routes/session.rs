use crate::{
    error::AppError,
    session::{ActivityKind, CurrentUser},
    workspace::Workspace,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
}

/// The signed-in user. Answers 401 once the session has ended.
#[get("")]
pub async fn current_session(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user.0)
}

/// Activity report
///
/// The front end posts here from its pointer, key and touch listeners. Each report
/// restarts the 30-minute inactivity countdown.
#[post("/activity")]
pub async fn record_activity(
    workspace: web::Data<Workspace>,
    event: web::Json<ActivityEvent>,
) -> Result<impl Responder, AppError> {
    workspace.session().record_activity(event.kind)?;
    Ok(HttpResponse::NoContent().finish())
}
