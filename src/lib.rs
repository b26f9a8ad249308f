#![doc = "The `taskflow` library crate."]
#![doc = ""]
#![doc = "This crate contains the session lifecycle, the local key-value storage, the project,"]
#![doc = "task and message stores, and the routes and error handling of the TaskFlow view layer."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod routes;
pub mod session;
pub mod stats;
pub mod storage;
pub mod stores;
pub mod workspace;

pub use crate::error::AppError;
pub use crate::session::{Session, SessionState};
pub use crate::workspace::Workspace;
