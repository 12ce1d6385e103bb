// src/llm/prompt.rs
// Prompt construction for the rewrite, branch-slug, and tagline requests

use super::Length;

/// Instruction sent after a successful commit to fetch the celebratory
/// one-liner.
pub const TAGLINE_INSTRUCTION: &str =
    "Celebrate the successful commit with a witty one-liner (max 12 words).";

/// Per-length constraint appended to the rewrite prompt.
fn length_rule(length: Length) -> &'static str {
    match length {
        Length::Short => "Keep it to MAX 8-12 words.",
        Length::Medium => "Aim for one punchy line (max 20 words).",
        Length::Long => "You may use up to ~40 words (two concise lines).",
    }
}

/// Build the commit-message rewrite prompt.
///
/// The "ivar aasen" persona additionally asks for a Nynorsk translation
/// before the persona is applied.
pub fn rewrite_prompt(persona: &str, mood: &str, length: Length, message: &str) -> String {
    let translate = if persona.to_lowercase().contains("ivar aasen") {
        " Translate the commit message into contemporary Nynorsk (New Norwegian) before applying the persona."
    } else {
        ""
    };

    format!(
        r#"Rewrite the following git commit message in the style of {persona} with a {mood} mood.{translate} {rule}
Respond ONLY with the final rewritten git commit message itself - no pre-amble, no bullet points, no code fences.

Commit message:
"""{message}""""#,
        rule = length_rule(length),
    )
}

/// Build the branch-slug instruction that gets rewritten by the backend.
pub fn slug_prompt(persona: &str, mood: &str, length: Length, base: &str) -> String {
    format!(
        r#"Rewrite the text below as a very short git branch slug in the style of {persona} with a {mood} vibe. Use kebab-case. Keep it {length} (max 40 chars). Respond with the slug only.
Text:
"""{base}""""#,
    )
}
