// src/llm/mod.rs
// Text generation backends and the generator seam the confirmation loop consumes

mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;

use crate::error::{MuseError, Result};
use crate::slug;
use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;

/// Target length for the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Parse a stored config value. Unknown strings return None so callers
    /// can fall back to their own default.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seam to the text-generation backend. One call per generation round;
/// failures are fatal to the confirmation loop and never retried here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Rewrite `source` in the given persona and mood. Must return a
    /// non-empty string on success.
    async fn generate(
        &self,
        persona: &str,
        mood: &str,
        length: Length,
        source: &str,
    ) -> Result<String>;
}

/// Adapter that turns any generator into a branch-name generator: wraps the
/// source text in the slug instruction and slugifies the model output, so the
/// confirmation loop presents the final branch name.
pub struct BranchNameGenerator<G: TextGenerator> {
    inner: G,
}

impl<G: TextGenerator> BranchNameGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for BranchNameGenerator<G> {
    async fn generate(
        &self,
        persona: &str,
        mood: &str,
        length: Length,
        source: &str,
    ) -> Result<String> {
        let instruction = prompt::slug_prompt(persona, mood, length, source);
        let raw = self.inner.generate(persona, mood, length, &instruction).await?;
        let name = slug::slugify(&raw);
        if name.is_empty() {
            return Err(MuseError::Generation(
                "backend returned text that slugifies to nothing".to_string(),
            ));
        }
        Ok(name)
    }
}
