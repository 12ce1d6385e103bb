// src/cli/branch.rs
// The `gitmuse branch` flow

use crate::config::{self, MuseConfig};
use crate::error::{MuseError, Result};
use crate::flow::{ConfirmationLoop, LoopOutcome, Reply, Surface};
use crate::git;
use crate::llm::{BranchNameGenerator, GeminiClient, Length};
use crate::selector::{PersonaSelector, SelectionRequest};
use crate::slug;
use crate::styles::Catalog;
use crate::ui::TerminalSurface;
use clap::Args;

#[derive(Args)]
pub struct BranchArgs {
    /// Persona (or 'random')
    #[arg(short = 's', long)]
    pub style: Option<String>,

    /// Fully random persona
    #[arg(short = 'r', long)]
    pub random: bool,

    /// Random persona from this group
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Mood or 'random'
    #[arg(short = 'm', long)]
    pub mood: Option<String>,

    /// Slug length (long is clamped to medium)
    #[arg(short = 'l', long, value_enum, default_value_t = Length::Short)]
    pub length: Length,

    /// pass(1) secret holding the Gemini API key
    #[arg(short = 'p', long = "pass-secret")]
    pub pass_secret: Option<String>,

    /// List persona groups & exit
    #[arg(short = 'G', long = "list-groups")]
    pub list_groups: bool,

    /// Save persona/group defaults
    #[arg(short = 'S', long)]
    pub save: bool,
}

pub async fn run_branch(args: BranchArgs) -> Result<()> {
    let catalog = Catalog::builtin();

    if args.list_groups {
        println!("Available groups:");
        for name in catalog.group_names() {
            println!("  - {name}");
        }
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    if !git::is_git_repo(&cwd) {
        return Err(MuseError::Git("not inside a git repository".to_string()));
    }

    let config = MuseConfig::load();
    let api_key = config::resolve_api_key(args.pass_secret.as_deref(), &config.pass_secret)?;

    // Branch slugs only make sense short; long collapses to medium.
    let length = match args.length {
        Length::Long => Length::Medium,
        other => other,
    };

    let request = SelectionRequest::from_flags(
        args.style.as_deref(),
        args.random,
        args.group.as_deref(),
        args.mood.as_deref(),
        MuseConfig::opt(&config.branch_persona),
        MuseConfig::opt(&config.branch_persona_group),
        MuseConfig::opt(&config.default_mood),
    );

    let mut surface = TerminalSurface;
    let base = match surface.input("Base branch description")? {
        Reply::Interrupted => {
            println!("Aborted.");
            return Ok(());
        }
        Reply::Answer(text) => text,
    };
    if base.is_empty() {
        return Err(MuseError::Prompt("empty branch description".to_string()));
    }

    let generator = BranchNameGenerator::new(GeminiClient::new(api_key));
    let mut selector = PersonaSelector::new();
    let mut flow = ConfirmationLoop::new(
        &mut selector,
        &catalog,
        &request,
        length,
        "Use this branch name?",
    );

    let name = match flow.run(&generator, &mut surface, &base).await? {
        LoopOutcome::Accepted(name) => name,
        LoopOutcome::UseOriginal => {
            let name = slug::slugify(&base);
            if name.is_empty() {
                return Err(MuseError::Git(
                    "original text slugifies to nothing".to_string(),
                ));
            }
            name
        }
        LoopOutcome::Cancelled => {
            println!("Aborted.");
            return Ok(());
        }
    };

    git::checkout_new_branch(&cwd, &name)?;
    println!("Switched to new branch!");

    if args.save {
        save_defaults(&args, &config)?;
    }
    Ok(())
}

/// Persist persona/group flags as the stored branch defaults.
fn save_defaults(args: &BranchArgs, config: &MuseConfig) -> Result<()> {
    let mut updated = config.clone();
    let mut changed = false;

    if let Some(style) = &args.style {
        updated.branch_persona = style.clone();
        changed = true;
    }
    if let Some(group) = &args.group {
        updated.branch_persona_group = group.clone();
        changed = true;
    }

    if changed {
        updated.save_to(&MuseConfig::config_path())?;
        println!("Saved new defaults.");
    }
    Ok(())
}
