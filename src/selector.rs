// src/selector.rs
// Persona and mood resolution from layered inputs (flags, stored defaults, randomness)

use crate::styles::Catalog;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sentinel value users may put in flags or config to request randomisation.
/// CLI flags convert it to the booleans on [`SelectionRequest`] up front;
/// stored defaults keep the raw string because the config file owns that
/// format, so the resolver checks the sentinel only there.
pub const RANDOM_SENTINEL: &str = "random";

fn is_random(s: &str) -> bool {
    s.eq_ignore_ascii_case(RANDOM_SENTINEL)
}

/// Merged view of CLI flags and stored config for one invocation.
/// Built once before the confirmation loop starts; never mutated.
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    /// Explicit persona from a flag, sentinel already stripped.
    pub persona: Option<String>,
    /// True when the user explicitly asked for a random persona, or gave a
    /// group without a persona.
    pub random_persona: bool,
    pub group: Option<String>,
    /// Explicit mood from a flag, sentinel already stripped.
    pub mood: Option<String>,
    pub random_mood: bool,
    /// Stored defaults, raw (may contain the "random" sentinel).
    pub default_persona: Option<String>,
    pub default_group: Option<String>,
    pub default_mood: Option<String>,
}

impl SelectionRequest {
    /// Build a request from CLI flag values and stored defaults, converting
    /// the "random" sentinel in flags into the explicit booleans.
    #[allow(clippy::too_many_arguments)]
    pub fn from_flags(
        style: Option<&str>,
        random: bool,
        group: Option<&str>,
        mood: Option<&str>,
        default_persona: Option<&str>,
        default_group: Option<&str>,
        default_mood: Option<&str>,
    ) -> Self {
        let style = nonempty(style);
        let group = nonempty(group);
        let mood = nonempty(mood);

        let style_is_sentinel = style.as_deref().is_some_and(is_random);
        let persona = style.filter(|s| !is_random(s));
        let mood_is_sentinel = mood.as_deref().is_some_and(is_random);

        Self {
            random_persona: random
                || style_is_sentinel
                || (group.is_some() && persona.is_none()),
            persona,
            group,
            mood: mood.filter(|m| !is_random(m)),
            random_mood: mood_is_sentinel,
            default_persona: nonempty(default_persona),
            default_group: nonempty(default_group),
            default_mood: nonempty(default_mood),
        }
    }
}

fn nonempty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Concrete persona/mood pair for one round of generation.
///
/// The `*_is_random` flags record whether each field came from a random draw;
/// they are fixed for the lifetime of the confirmation loop and decide what
/// [`PersonaSelector::reroll`] is allowed to replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub persona: String,
    pub mood: String,
    pub persona_is_random: bool,
    pub mood_is_random: bool,
}

/// Resolves persona and mood with an injected random source, so tests can
/// seed the draws deterministically.
pub struct PersonaSelector<R: Rng> {
    rng: R,
}

impl PersonaSelector<SmallRng> {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for PersonaSelector<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PersonaSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Resolve a concrete persona and mood.
    ///
    /// Persona precedence, first match wins:
    /// 1. explicit persona from a flag (verbatim, not random-sourced)
    /// 2. random request: draw from the group if given and known, else from
    ///    the full persona set; an unknown group falls through
    /// 3. stored default persona, unless it is the "random" sentinel
    /// 4. stored default group, if known
    /// 5. full-catalog draw
    ///
    /// Mood precedence is independent: explicit mood, explicit random,
    /// stored default (sentinel means draw), then a random draw.
    pub fn resolve(&mut self, req: &SelectionRequest, catalog: &Catalog) -> ResolvedSelection {
        let (persona, persona_is_random) = self.resolve_persona(req, catalog);
        let (mood, mood_is_random) = self.resolve_mood(req, catalog);
        ResolvedSelection {
            persona,
            mood,
            persona_is_random,
            mood_is_random,
        }
    }

    /// Re-resolve only the fields that came from a random draw, leaving
    /// pinned fields untouched. Used between loop iterations.
    pub fn reroll(
        &mut self,
        current: &ResolvedSelection,
        req: &SelectionRequest,
        catalog: &Catalog,
    ) -> ResolvedSelection {
        let mut next = current.clone();
        if current.persona_is_random {
            next.persona = self.resolve_persona(req, catalog).0;
        }
        if current.mood_is_random {
            next.mood = self.resolve_mood(req, catalog).0;
        }
        next
    }

    fn resolve_persona(&mut self, req: &SelectionRequest, catalog: &Catalog) -> (String, bool) {
        if let Some(p) = &req.persona {
            return (p.clone(), false);
        }
        if req.random_persona {
            match &req.group {
                Some(g) => {
                    if let Some(list) = catalog.lookup(g) {
                        return (self.draw(list), true);
                    }
                    // Unknown group: not an error, fall through to defaults.
                }
                None => return (self.draw(catalog.all_personas()), true),
            }
        }
        if let Some(d) = &req.default_persona
            && !is_random(d)
        {
            return (d.clone(), false);
        }
        if let Some(g) = &req.default_group
            && let Some(list) = catalog.lookup(g)
        {
            return (self.draw(list), true);
        }
        (self.draw(catalog.all_personas()), true)
    }

    fn resolve_mood(&mut self, req: &SelectionRequest, catalog: &Catalog) -> (String, bool) {
        if let Some(m) = &req.mood {
            return (m.clone(), false);
        }
        if req.random_mood {
            return (self.draw(catalog.moods()), true);
        }
        if let Some(d) = &req.default_mood {
            if is_random(d) {
                return (self.draw(catalog.moods()), true);
            }
            return (d.clone(), false);
        }
        (self.draw(catalog.moods()), true)
    }

    /// Uniform draw; no weighting, no repetition-avoidance. Every slice that
    /// reaches here comes from a `Catalog`, which guarantees non-empty pools.
    fn draw(&mut self, items: &[String]) -> String {
        items[self.rng.random_range(0..items.len())].clone()
    }
}
