use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::identity::firebase::{emulator_url, DEFAULT_AUTH_URL};

/// Vite dev server.
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub firebase_api_key: String,
    pub firebase_auth_url: String,
    pub suggestions_path: Option<PathBuf>,
    /// The one browser origin allowed to call the API (the front end).
    pub allowed_origin: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            firebase_api_key: require_env("FIREBASE_API_KEY")?,
            firebase_auth_url: auth_url(
                optional_env("FIREBASE_AUTH_URL"),
                optional_env("FIREBASE_AUTH_EMULATOR_HOST"),
            ),
            suggestions_path: optional_env("SUGGESTIONS_PATH").map(PathBuf::from),
            allowed_origin: optional_env("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            host: optional_env("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// An explicit URL wins, then the emulator, then the public endpoint.
fn auth_url(explicit: Option<String>, emulator_host: Option<String>) -> String {
    explicit
        .or_else(|| emulator_host.map(|host| emulator_url(&host)))
        .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
