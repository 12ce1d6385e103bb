// src/config/env.rs
// API key resolution: environment first, then the pass(1) secret store

use crate::error::{MuseError, Result};
use std::process::Command;
use tracing::debug;

/// Resolve the Gemini API key.
///
/// Order: `GEMINI_API_KEY` env var, then `GOOGLE_API_KEY`, then `pass show
/// <secret>` where the secret path comes from the CLI flag or the stored
/// config. Empty values are treated as unset.
pub fn resolve_api_key(flag_secret: Option<&str>, config_secret: &str) -> Result<String> {
    if let Some(key) = read_env("GEMINI_API_KEY").or_else(|| read_env("GOOGLE_API_KEY")) {
        debug!("API key loaded from environment");
        return Ok(key);
    }

    let secret = flag_secret
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config_secret.trim());

    if !secret.is_empty()
        && let Some(key) = pass_show(secret)
    {
        debug!(secret = %secret, "API key loaded from pass");
        return Ok(key);
    }

    Err(MuseError::Config(
        "GEMINI_API_KEY not set and no usable pass secret found".to_string(),
    ))
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

fn pass_show(secret: &str) -> Option<String> {
    let output = Command::new("pass").args(["show", secret]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!key.is_empty()).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var reads are process-global, so these tests stick to the pure
    // pieces and the failure path with everything unset.

    #[test]
    fn test_missing_everything_is_config_error() {
        if std::env::var("GEMINI_API_KEY").is_ok() || std::env::var("GOOGLE_API_KEY").is_ok() {
            return; // environment provides a key; nothing to assert here
        }
        // An empty secret never reaches pass
        let err = resolve_api_key(Some("  "), "").unwrap_err();
        assert!(matches!(err, MuseError::Config(_)));
    }

    #[test]
    fn test_read_env_filters_empty() {
        assert!(read_env("GITMUSE_TEST_UNSET_VAR_XYZ").is_none());
    }
}
