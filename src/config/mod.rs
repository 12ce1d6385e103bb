// src/config/mod.rs
// Configuration: stored defaults file and environment/secret resolution

pub mod env;
pub mod file;

pub use env::resolve_api_key;
pub use file::MuseConfig;

use std::path::PathBuf;

/// Directory holding gitmuse's config file and optional .env
pub fn muse_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gitmuse")
}
