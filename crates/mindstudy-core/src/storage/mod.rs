mod config;
pub mod database;

pub use config::{AiConfig, Config, NarrationConfig, TimerConfig};
pub use database::{Database, UserRecord};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/mindstudy[-dev]/` based on MINDSTUDY_ENV.
///
/// Set MINDSTUDY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDSTUDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindstudy-dev")
    } else {
        base_dir.join("mindstudy")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
