//! On-disk locations and configuration.

mod config;

pub use config::Config;

use std::path::PathBuf;

/// Returns the data directory (`~/.config/deskmate[-dev]/` on Linux),
/// creating it if needed.
///
/// Set DESKMATE_ENV=dev to use a separate development data directory.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));

    let env = std::env::var("DESKMATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deskmate-dev")
    } else {
        base_dir.join("deskmate")
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
