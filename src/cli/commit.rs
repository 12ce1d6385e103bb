// src/cli/commit.rs
// The `gitmuse commit` flow

use crate::config::{self, MuseConfig};
use crate::error::{MuseError, Result};
use crate::flow::{ConfirmationLoop, LoopOutcome, Reply, Surface};
use crate::git;
use crate::llm::{GeminiClient, Length, TextGenerator, prompt};
use crate::selector::{PersonaSelector, SelectionRequest};
use crate::styles::Catalog;
use crate::ui::TerminalSurface;
use clap::Args;
use tracing::debug;

#[derive(Args)]
pub struct CommitArgs {
    /// Persona style or 'random'
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

    /// Rewrite length
    #[arg(short = 'l', long, value_enum)]
    pub length: Option<Length>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// pass(1) secret holding the Gemini API key
    #[arg(short = 'p', long = "pass-secret")]
    pub pass_secret: Option<String>,

    /// List personas & exit
    #[arg(short = 'L', long = "list-styles")]
    pub list_styles: bool,

    /// List persona groups & exit
    #[arg(short = 'G', long = "list-groups")]
    pub list_groups: bool,

    /// Save current flags as defaults
    #[arg(short = 'S', long)]
    pub save: bool,

    /// Persona for the success tagline
    #[arg(short = 't', long = "tagline-style")]
    pub tagline_style: Option<String>,

    /// Suppress the success tagline
    #[arg(short = 'T', long = "no-tagline")]
    pub no_tagline: bool,
}

pub async fn run_commit(args: CommitArgs) -> Result<()> {
    let catalog = Catalog::builtin();

    if args.list_groups {
        println!("Available groups:");
        for name in catalog.group_names() {
            println!("  - {name}");
        }
        return Ok(());
    }
    if args.list_styles {
        println!("Available personas:");
        for persona in catalog.all_personas() {
            println!("  - {persona}");
        }
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    if !git::is_git_repo(&cwd) {
        return Err(MuseError::Git("not inside a git repository".to_string()));
    }

    let config = MuseConfig::load();
    let api_key = config::resolve_api_key(args.pass_secret.as_deref(), &config.pass_secret)?;

    let length = args
        .length
        .or_else(|| Length::parse(&config.default_length))
        .unwrap_or(Length::Medium);

    let request = SelectionRequest::from_flags(
        args.style.as_deref(),
        args.random,
        args.group.as_deref(),
        args.mood.as_deref(),
        MuseConfig::opt(&config.default_persona),
        MuseConfig::opt(&config.default_group),
        MuseConfig::opt(&config.default_mood),
    );

    let mut surface = TerminalSurface;
    let source = match surface.input("Enter your commit message")? {
        Reply::Interrupted => {
            println!("Aborted.");
            return Ok(());
        }
        Reply::Answer(text) => text,
    };
    if source.is_empty() {
        return Err(MuseError::Prompt("empty commit message".to_string()));
    }

    let generator = GeminiClient::new(api_key);
    let mut selector = PersonaSelector::new();

    let final_message = if args.yes || !config.confirm {
        // No confirmation wanted: one generation, applied as-is.
        let selection = selector.resolve(&request, &catalog);
        debug!(persona = %selection.persona, mood = %selection.mood, "Skipping confirmation");
        Some(
            generator
                .generate(&selection.persona, &selection.mood, length, &source)
                .await?,
        )
    } else {
        let mut flow = ConfirmationLoop::new(
            &mut selector,
            &catalog,
            &request,
            length,
            "Use this message?",
        );
        let outcome = flow.run(&generator, &mut surface, &source).await?;
        accepted_message(outcome, &source)
    };

    // Cancelling skips everything downstream, including --save.
    let Some(message) = final_message else {
        println!("Aborted.");
        return Ok(());
    };

    git::commit(&cwd, &message)?;
    println!("Git commit successful!");

    if !args.no_tagline && config.tagline_enabled {
        print_tagline(&generator, &args, &config).await;
    }

    if args.save {
        save_defaults(&args, &config, &MuseConfig::config_path())?;
    }
    Ok(())
}

/// The message to commit, if the loop ended with one.
fn accepted_message(outcome: LoopOutcome, original: &str) -> Option<String> {
    match outcome {
        LoopOutcome::Accepted(text) => Some(text),
        LoopOutcome::UseOriginal => Some(original.to_string()),
        LoopOutcome::Cancelled => None,
    }
}

/// Best-effort celebratory one-liner; a failed tagline never fails the commit.
async fn print_tagline(generator: &GeminiClient, args: &CommitArgs, config: &MuseConfig) {
    let persona = args
        .tagline_style
        .as_deref()
        .unwrap_or(&config.tagline_persona);
    match generator
        .generate(persona, "excited", Length::Short, prompt::TAGLINE_INSTRUCTION)
        .await
    {
        Ok(line) => println!("{persona} says: {line}"),
        Err(e) => debug!(error = %e, "Tagline generation failed, skipping"),
    }
}

/// Persist the flags the user asked to keep as stored defaults.
fn save_defaults(args: &CommitArgs, config: &MuseConfig, path: &std::path::Path) -> Result<()> {
    let mut updated = config.clone();
    let mut changed = false;

    if let Some(group) = &args.group {
        updated.default_group = group.clone();
        changed = true;
    }
    if let Some(mood) = &args.mood
        && mood.eq_ignore_ascii_case("random")
    {
        updated.default_mood = "random".to_string();
        changed = true;
    }
    if let Some(tagline) = &args.tagline_style {
        updated.tagline_persona = tagline.clone();
        changed = true;
    }

    if changed {
        updated.save_to(path)?;
        println!("Saved new defaults.");
    }
    Ok(())
}
