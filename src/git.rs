// src/git.rs
// Git side effects: commit and branch checkout via the git CLI

use crate::error::{MuseError, Result};
use std::path::Path;
use std::process::Command;

/// Validate that a ref name doesn't look like a CLI flag (defense-in-depth)
fn validate_ref(r: &str) -> Result<()> {
    if r.is_empty() || r.starts_with('-') {
        return Err(MuseError::Git(format!("invalid branch name: '{}'", r)));
    }
    if r.contains('\0') || r.contains('\n') || r.contains('\r') {
        return Err(MuseError::Git(
            "invalid branch name: contains forbidden characters".to_string(),
        ));
    }
    Ok(())
}

/// Run a git subcommand with stdio inherited so the user sees git's own
/// output (hooks, summaries, errors).
fn git_passthrough(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| {
            MuseError::Git(format!("failed to run git {}: {}", args.first().unwrap_or(&""), e))
        })?;

    if !status.success() {
        return Err(MuseError::Git(format!(
            "git {} exited with {}",
            args.first().unwrap_or(&""),
            status
        )));
    }
    Ok(())
}

/// Check whether `dir` is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Commit staged changes with the given message.
pub fn commit(dir: &Path, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(MuseError::Git("refusing to commit with an empty message".to_string()));
    }
    git_passthrough(dir, &["commit", "-m", message])
}

/// Create a branch with the given name and switch to it.
pub fn checkout_new_branch(dir: &Path, name: &str) -> Result<()> {
    validate_ref(name)?;
    git_passthrough(dir, &["checkout", "-b", name])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ref_rejects_flag_lookalike() {
        assert!(validate_ref("--force").is_err());
        assert!(validate_ref("-f").is_err());
    }

    #[test]
    fn test_validate_ref_rejects_control_chars() {
        assert!(validate_ref("feat\nrm-rf").is_err());
        assert!(validate_ref("feat\0x").is_err());
    }

    #[test]
    fn test_validate_ref_rejects_empty() {
        assert!(validate_ref("").is_err());
    }

    #[test]
    fn test_validate_ref_accepts_slug() {
        assert!(validate_ref("fix-the-flux-capacitor").is_ok());
    }

    #[test]
    fn test_commit_rejects_empty_message() {
        let err = commit(Path::new("."), "   ").unwrap_err();
        assert!(matches!(err, MuseError::Git(_)));
    }
}
