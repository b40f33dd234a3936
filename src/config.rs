//! Configuration management for the catalog service.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). The resulting [`Config`] is handed to [`crate::AppState::new`]
//! rather than stored in a global.

use std::env;
use std::path::PathBuf;

/// Default request body cap for uploads (16 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Content directory holding uploaded blobs, served at `/static/uploads`.
    pub upload_dir: PathBuf,
    /// Largest accepted upload request body, in bytes.
    pub max_upload_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "127.0.0.1"),
                port: env_or("PORT", "5000").parse().unwrap_or(5000),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./database.db"),
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "./static/uploads")),
                max_upload_size: env_or("MAX_UPLOAD_SIZE", &DEFAULT_MAX_UPLOAD_SIZE.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            },
            log: LogConfig {
                json: env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
