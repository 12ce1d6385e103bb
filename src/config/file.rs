// src/config/file.rs
// Stored defaults from ~/.gitmuse/config.toml

use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Commented sample written on first run. TOML serialization can't emit
/// comments, so the file is crafted by hand here; saving defaults later
/// rewrites it without the comments.
const SAMPLE_CONFIG: &str = r#"# ------------------------------------------------------------
# gitmuse configuration -- every CLI flag has a TOML twin.
# Anything here is overridden by command-line flags at runtime.
# Set a value to 'random' to enable randomisation.
# ------------------------------------------------------------

# --- Commit defaults ----------------------------------------
default_persona = "random"   # persona, e.g. "yoda" or "gordon ramsay"
default_group = ""           # e.g. "cartoons" -- random within group
default_mood = "playful"     # "playful", "sarcastic", or "random"
default_length = "medium"    # short | medium | long
confirm = true               # true = ask before committing

# --- API key storage ----------------------------------------
pass_secret = "gemini_api_key"   # path in 'pass' -- overrides GEMINI_API_KEY

# --- Success tagline ----------------------------------------
tagline_enabled = true
tagline_persona = "yoda"         # persona for the one-liner after commit

# --- Branch-name generator ----------------------------------
branch_persona = "random"        # fixed persona OR 'random'
branch_persona_group = ""        # e.g. "trailer_park_boys"
"#;

/// Stored defaults, one TOML twin per CLI flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MuseConfig {
    pub default_persona: String,
    pub default_group: String,
    pub default_mood: String,
    pub default_length: String,
    pub confirm: bool,
    pub pass_secret: String,
    pub tagline_enabled: bool,
    pub tagline_persona: String,
    pub branch_persona: String,
    pub branch_persona_group: String,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            default_persona: "random".to_string(),
            default_group: String::new(),
            default_mood: "playful".to_string(),
            default_length: "medium".to_string(),
            confirm: true,
            pass_secret: "gemini_api_key".to_string(),
            tagline_enabled: true,
            tagline_persona: "yoda".to_string(),
            branch_persona: "random".to_string(),
            branch_persona_group: String::new(),
        }
    }
}

impl MuseConfig {
    /// Load config from ~/.gitmuse/config.toml, falling back to defaults on
    /// a missing or unparsable file.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        super::muse_dir().join("config.toml")
    }

    /// Drop the commented sample file on first run. Returns true when a new
    /// file was written.
    pub fn write_sample_if_missing(path: &Path) -> std::io::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, SAMPLE_CONFIG)?;
        Ok(true)
    }

    /// Persist the current values (comments are not preserved).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let rendered = toml::to_string_pretty(self)
            .map_err(|e| MuseError::Config(format!("could not serialize config: {e}")))?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    /// Empty-string fields mean "unset"; convert for the selector.
    pub fn opt(value: &str) -> Option<&str> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MuseConfig::default();
        assert_eq!(config.default_persona, "random");
        assert_eq!(config.default_mood, "playful");
        assert_eq!(config.default_length, "medium");
        assert!(config.confirm);
        assert!(config.tagline_enabled);
        assert_eq!(config.tagline_persona, "yoda");
    }

    #[test]
    fn test_parse_partial_config() {
        let config: MuseConfig = toml::from_str(
            r#"
default_persona = "gandalf"
confirm = false
"#,
        )
        .unwrap();
        assert_eq!(config.default_persona, "gandalf");
        assert!(!config.confirm);
        // Untouched fields keep their defaults
        assert_eq!(config.default_mood, "playful");
    }

    #[test]
    fn test_sample_parses_to_defaults() {
        let config: MuseConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        let defaults = MuseConfig::default();
        assert_eq!(config.default_persona, defaults.default_persona);
        assert_eq!(config.pass_secret, defaults.pass_secret);
        assert_eq!(config.branch_persona, defaults.branch_persona);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MuseConfig::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config.default_persona, "random");
    }

    #[test]
    fn test_load_from_garbage_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let config = MuseConfig::load_from(&path);
        assert_eq!(config.default_mood, "playful");
    }

    #[test]
    fn test_write_sample_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        assert!(MuseConfig::write_sample_if_missing(&path).unwrap());
        assert!(!MuseConfig::write_sample_if_missing(&path).unwrap());
        let config = MuseConfig::load_from(&path);
        assert_eq!(config.default_length, "medium");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = MuseConfig::default();
        config.default_group = "cartoons".to_string();
        config.default_mood = "random".to_string();
        config.save_to(&path).unwrap();

        let reloaded = MuseConfig::load_from(&path);
        assert_eq!(reloaded.default_group, "cartoons");
        assert_eq!(reloaded.default_mood, "random");
    }

    #[test]
    fn test_opt_empty_is_none() {
        assert_eq!(MuseConfig::opt(""), None);
        assert_eq!(MuseConfig::opt("  "), None);
        assert_eq!(MuseConfig::opt("cartoons"), Some("cartoons"));
    }
}
