// src/ui.rs
// dialoguer-backed implementation of the interactive surface

use crate::error::{MuseError, Result};
use crate::flow::{Reply, Surface};
use crate::llm::Length;
use crate::selector::ResolvedSelection;
use dialoguer::{Confirm, Input, Select};

/// Terminal surface built on dialoguer prompts. Ctrl-C / end-of-input shows
/// up as `io::ErrorKind::Interrupted` and maps to `Reply::Interrupted`; any
/// other prompt failure is fatal.
pub struct TerminalSurface;

fn map_err<T>(err: dialoguer::Error) -> Result<Reply<T>> {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            Ok(Reply::Interrupted)
        }
        dialoguer::Error::IO(io) => Err(MuseError::Prompt(io.to_string())),
    }
}

impl Surface for TerminalSurface {
    fn confirm(&mut self, prompt: &str) -> Result<Reply<bool>> {
        match Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
        {
            Ok(answer) => Ok(Reply::Answer(answer)),
            Err(e) => map_err(e),
        }
    }

    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<Reply<usize>> {
        match Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
        {
            Ok(index) => Ok(Reply::Answer(index)),
            Err(e) => map_err(e),
        }
    }

    fn show(&mut self, selection: &ResolvedSelection, length: Length, text: &str) {
        println!(
            "\nGenerated ({}, {}, {}):\n\n\"{}\"\n",
            selection.persona, selection.mood, length, text
        );
    }

    fn input(&mut self, prompt: &str) -> Result<Reply<String>> {
        match Input::<String>::new().with_prompt(prompt).interact_text() {
            Ok(line) => Ok(Reply::Answer(line.trim().to_string())),
            Err(e) => map_err(e),
        }
    }
}
