use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::io;
use std::sync::Arc;

use taskflow::{
    config::Config,
    routes::{self, health},
    session::SessionGuard,
    storage::FileStorage,
    workspace::Workspace,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let storage = FileStorage::open(&config.storage_path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let workspace = Workspace::open(Arc::new(storage), config.session_options())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    if config.arm_on_restore {
        info!("Inactivity timeout is armed for restored sessions");
    }
    let workspace = web::Data::new(workspace);

    info!("Starting TaskFlow server at {}", config.server_url());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(workspace.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(SessionGuard::new(workspace.session().clone()))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
