//! Path utilities for tiltguard.
//!
//! All data lives under `~/.tiltguard/`:
//! - `~/.tiltguard/config.toml` - main configuration
//! - `~/.tiltguard/tiltguard.db` - journal database

use std::path::PathBuf;

/// Returns the tiltguard home directory (`~/.tiltguard/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tiltguard")
}

/// Returns the default config file path (`~/.tiltguard/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.tiltguard/tiltguard.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("tiltguard.db")
}

/// Ensures the tiltguard home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}
