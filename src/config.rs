// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Message type used when a submission leaves `message_type` blank.
pub const DEFAULT_MESSAGE_TYPE: &str = "email";

pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback for `message_type` ("email", "message", ...).
    pub default_message_type: String,
    pub server_port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_message_type: DEFAULT_MESSAGE_TYPE.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let default_message_type = env::var("DEFAULT_MESSAGE_TYPE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string());

        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                // The subscriber is not installed yet, so this goes to stderr.
                eprintln!("SERVER_PORT={raw:?} is not a valid port, using {DEFAULT_SERVER_PORT}");
                DEFAULT_SERVER_PORT
            }),
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            default_message_type,
            server_port,
            rust_log,
        }
    }
}
