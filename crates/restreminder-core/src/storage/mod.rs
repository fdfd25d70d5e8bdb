mod config;

pub use config::{
    Config, IntervalsSection, LockWatchSection, NotificationsSection, OverlaySection,
};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/restreminder[-dev]/` based on RESTREMINDER_ENV.
///
/// Set RESTREMINDER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESTREMINDER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("restreminder-dev")
    } else {
        base_dir.join("restreminder")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
