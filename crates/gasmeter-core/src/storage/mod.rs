mod config;
mod data_file;

pub use config::Config;
pub use data_file::DataFile;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/gasmeter[-dev]/` based on GASMETER_ENV.
///
/// Set GASMETER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GASMETER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("gasmeter-dev")
    } else {
        base_dir.join("gasmeter")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
