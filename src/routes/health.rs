use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::workspace::Workspace;

/// Liveness of the local view-layer host.
///
/// Reachable while signed out. Reports the crate version and whether a session is
/// active, so the front end can decide between the sign-in page and the dashboard on
/// load.
#[get("/health")]
pub async fn health(workspace: web::Data<Workspace>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "signed_in": workspace.session().is_signed_in(),
        "projects": workspace.projects().len(),
    }))
}
