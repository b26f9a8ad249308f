use std::env;
use std::io;
use std::path::PathBuf;

use crate::session::SessionOptions;

pub struct Config {
    pub storage_path: PathBuf,
    pub server_port: u16,
    pub server_host: String,
    /// Arm the inactivity timeout immediately for a session restored at startup.
    pub arm_on_restore: bool,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Ok(Self {
            storage_path: env::var("TASKFLOW_STORAGE_PATH")
                .unwrap_or_else(|_| "taskflow-storage.json".to_string())
                .into(),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| invalid("SERVER_PORT must be a number"))?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            arm_on_restore: env::var("TASKFLOW_ARM_ON_RESTORE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .map_err(|_| invalid("TASKFLOW_ARM_ON_RESTORE must be true or false"))?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            arm_on_restore: self.arm_on_restore,
        }
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.to_string())
}
