// src/cli/mod.rs
// CLI definition for gitmuse commands

use clap::{Parser, Subcommand};

pub mod branch;
pub mod commit;

pub use branch::run_branch;
pub use commit::run_commit;

#[derive(Parser)]
#[command(name = "gitmuse")]
#[command(about = "Rewrite git commit messages and branch names in outrageous personas")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate & apply a stylised git commit message
    Commit(commit::CommitArgs),

    /// Generate a punny branch name in character and check it out
    Branch(branch::BranchArgs),
}
