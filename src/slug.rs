// src/slug.rs
// Branch-name sanitisation

use regex::Regex;
use std::sync::LazyLock;

/// Git refs get unwieldy past this; the slug prompt asks for the same cap.
const MAX_SLUG_LEN: usize = 40;

static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: static literal pattern; compilation cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"[^a-z0-9\s-]").expect("slug strip regex")
});

/// Reduce free text to a kebab-case branch slug: lowercase, drop anything
/// outside `[a-z0-9 -]`, collapse whitespace and underscores to single
/// hyphens, cap at 40 chars, trim stray hyphens.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase().replace('_', " ");
    let cleaned = STRIP_RE.replace_all(&lowered, " ");
    let mut slug = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.len() > MAX_SLUG_LEN {
        // Only ASCII survives the strip, so a byte cut is a char cut.
        slug.truncate(MAX_SLUG_LEN);
    }
    slug.trim_matches('-').to_string()
}
