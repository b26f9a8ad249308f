pub mod auth;
pub mod dashboard;
pub mod health;
pub mod messages;
pub mod profile;
pub mod projects;
pub mod session;
pub mod tasks;

use actix_web::web;

/// Registers every `/api` route. The caller wraps the scope in
/// [`SessionGuard`](crate::session::SessionGuard).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::sign_up)
            .service(auth::sign_in)
            .service(auth::sign_out),
    )
    .service(
        web::scope("/session")
            .service(session::current_session)
            .service(session::record_activity),
    )
    .service(profile::update_profile)
    .service(dashboard::dashboard)
    .service(
        web::scope("/projects")
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(tasks::get_tasks)
            .service(tasks::get_board)
            .service(tasks::get_task_stats)
            .service(tasks::create_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task)
            .service(messages::get_messages)
            .service(messages::send_message),
    );
}
