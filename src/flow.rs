// src/flow.rs
// Interactive generate-confirm-regenerate loop

use crate::error::Result;
use crate::llm::{Length, TextGenerator};
use crate::selector::{PersonaSelector, ResolvedSelection, SelectionRequest};
use crate::styles::Catalog;
use rand::Rng;

/// Secondary menu options, in presentation order.
pub const SECONDARY_MENU: &[&str] = &["Generate another", "Use my original", "Cancel"];

/// Terminal result of the confirmation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// User accepted a generated text.
    Accepted(String),
    /// User chose to keep their original text.
    UseOriginal,
    /// User cancelled; no external action should follow.
    Cancelled,
}

/// Answer from a prompt primitive. An interrupt (ctrl-C / end of input) is a
/// first-class reply, not an error; the loop maps it to a cancelled outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Answer(T),
    Interrupted,
}

/// The interactive surface the loop talks to. Implementations block until the
/// user answers. Malformed input outside the recognized answer set surfaces
/// as `MuseError::Prompt` and aborts the whole operation.
pub trait Surface {
    /// Ask a yes/no question, defaulting to yes on empty input.
    fn confirm(&mut self, prompt: &str) -> Result<Reply<bool>>;

    /// Ask the user to pick one of `options`, returning its index.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<Reply<usize>>;

    /// Present a generated candidate. Pure presentation, carries no state.
    fn show(&mut self, selection: &ResolvedSelection, length: Length, text: &str);

    /// Ask for a free-text line (the source message / branch description).
    fn input(&mut self, prompt: &str) -> Result<Reply<String>>;
}

enum State {
    Generating,
    AwaitingPrimary { text: String },
    AwaitingSecondary,
}

/// Drives generation and confirmation until the user reaches a terminal
/// choice. Unbounded in iteration count; exactly one generator call per
/// `Generating` entry and no automatic retry anywhere.
pub struct ConfirmationLoop<'a, R: Rng> {
    selector: &'a mut PersonaSelector<R>,
    catalog: &'a Catalog,
    request: &'a SelectionRequest,
    length: Length,
    confirm_prompt: &'a str,
}

impl<'a, R: Rng> ConfirmationLoop<'a, R> {
    pub fn new(
        selector: &'a mut PersonaSelector<R>,
        catalog: &'a Catalog,
        request: &'a SelectionRequest,
        length: Length,
        confirm_prompt: &'a str,
    ) -> Self {
        Self {
            selector,
            catalog,
            request,
            length,
            confirm_prompt,
        }
    }

    /// Run the loop over the same source text until a terminal outcome.
    ///
    /// A generation failure propagates immediately; it is the only way the
    /// loop exits without a [`LoopOutcome`].
    pub async fn run(
        &mut self,
        generator: &dyn TextGenerator,
        surface: &mut dyn Surface,
        source: &str,
    ) -> Result<LoopOutcome> {
        // The random-source flags are fixed here for the whole loop; reroll
        // only ever replaces fields those flags mark as random.
        let mut selection = self.selector.resolve(self.request, self.catalog);
        let mut state = State::Generating;

        loop {
            state = match state {
                State::Generating => {
                    let text = generator
                        .generate(&selection.persona, &selection.mood, self.length, source)
                        .await?;
                    surface.show(&selection, self.length, &text);
                    State::AwaitingPrimary { text }
                }

                State::AwaitingPrimary { text } => match surface.confirm(self.confirm_prompt)? {
                    Reply::Interrupted => return Ok(LoopOutcome::Cancelled),
                    Reply::Answer(true) => return Ok(LoopOutcome::Accepted(text)),
                    Reply::Answer(false) => State::AwaitingSecondary,
                },

                State::AwaitingSecondary => {
                    match surface.choose("What next?", SECONDARY_MENU)? {
                        Reply::Interrupted => return Ok(LoopOutcome::Cancelled),
                        Reply::Answer(0) => {
                            selection =
                                self.selector.reroll(&selection, self.request, self.catalog);
                            State::Generating
                        }
                        Reply::Answer(1) => return Ok(LoopOutcome::UseOriginal),
                        Reply::Answer(2) => return Ok(LoopOutcome::Cancelled),
                        Reply::Answer(i) => {
                            return Err(crate::MuseError::Prompt(format!(
                                "menu returned out-of-range index {i}"
                            )));
                        }
                    }
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MuseError;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    struct StubGenerator {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl StubGenerator {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            persona: &str,
            mood: &str,
            _length: Length,
            _source: &str,
        ) -> Result<String> {
            if self.fail {
                return Err(MuseError::Generation("backend down".to_string()));
            }
            let mut calls = self.calls.lock().unwrap();
            calls.push((persona.to_string(), mood.to_string()));
            Ok(format!("styled #{}", calls.len()))
        }
    }

    #[derive(Default)]
    struct ScriptedSurface {
        confirms: VecDeque<Reply<bool>>,
        choices: VecDeque<Reply<usize>>,
        shown: Vec<String>,
        prompts_issued: usize,
    }

    impl Surface for ScriptedSurface {
        fn confirm(&mut self, _prompt: &str) -> Result<Reply<bool>> {
            self.prompts_issued += 1;
            Ok(self.confirms.pop_front().expect("unexpected confirm"))
        }

        fn choose(&mut self, _prompt: &str, options: &[&str]) -> Result<Reply<usize>> {
            assert_eq!(options, SECONDARY_MENU);
            self.prompts_issued += 1;
            Ok(self.choices.pop_front().expect("unexpected choose"))
        }

        fn show(&mut self, _selection: &ResolvedSelection, _length: Length, text: &str) {
            self.shown.push(text.to_string());
        }

        fn input(&mut self, _prompt: &str) -> Result<Reply<String>> {
            unimplemented!("loop never asks for input")
        }
    }

    fn pinned_request() -> SelectionRequest {
        SelectionRequest::from_flags(
            Some("yoda"),
            false,
            None,
            Some("playful"),
            None,
            None,
            None,
        )
    }

    fn random_mood_request() -> SelectionRequest {
        SelectionRequest::from_flags(Some("yoda"), false, None, Some("random"), None, None, None)
    }

    async fn run_loop(
        request: &SelectionRequest,
        generator: &StubGenerator,
        surface: &mut ScriptedSurface,
    ) -> Result<LoopOutcome> {
        let catalog = Catalog::builtin();
        let mut selector = PersonaSelector::with_rng(SmallRng::seed_from_u64(7));
        let mut flow = ConfirmationLoop::new(
            &mut selector,
            &catalog,
            request,
            Length::Medium,
            "Use this message?",
        );
        flow.run(generator, surface, "fix the thing").await
    }

    // ------------------------------------------------------------------
    // Loop behavior
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_yes_on_first_prompt_accepts_first_candidate() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(true));

        let outcome = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Accepted("styled #1".to_string()));
        assert_eq!(generator.call_count(), 1);
        assert_eq!(surface.shown, vec!["styled #1"]);
    }

    #[tokio::test]
    async fn test_no_then_use_original() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(false));
        surface.choices.push_back(Reply::Answer(1));

        let outcome = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::UseOriginal);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_then_generate_another_then_yes() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(false));
        surface.choices.push_back(Reply::Answer(0));
        surface.confirms.push_back(Reply::Answer(true));

        let outcome = run_loop(&random_mood_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Accepted("styled #2".to_string()));
        assert_eq!(generator.call_count(), 2);
        // Pinned persona never changes across rerolls
        let calls = generator.calls();
        assert_eq!(calls[0].0, "yoda");
        assert_eq!(calls[1].0, "yoda");
    }

    #[tokio::test]
    async fn test_reroll_resamples_random_mood_across_generations() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        // Regenerate many times so at least two distinct moods show up
        for _ in 0..20 {
            surface.confirms.push_back(Reply::Answer(false));
            surface.choices.push_back(Reply::Answer(0));
        }
        surface.confirms.push_back(Reply::Answer(true));

        run_loop(&random_mood_request(), &generator, &mut surface)
            .await
            .unwrap();

        let moods: std::collections::HashSet<String> =
            generator.calls().into_iter().map(|(_, m)| m).collect();
        assert!(moods.len() > 1, "random mood should re-sample across rounds");
    }

    #[tokio::test]
    async fn test_no_then_cancel() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(false));
        surface.choices.push_back(Reply::Answer(2));

        let outcome = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Cancelled);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_interrupt_at_primary_prompt_cancels() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Interrupted);

        let outcome = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Cancelled);
        assert_eq!(generator.call_count(), 1);
        assert!(surface.choices.is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_at_menu_cancels() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(false));
        surface.choices.push_back(Reply::Interrupted);

        let outcome = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Cancelled);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_aborts_before_any_prompt() {
        let generator = StubGenerator::failing();
        let mut surface = ScriptedSurface::default();

        let err = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, MuseError::Generation(_)));
        assert_eq!(surface.prompts_issued, 0);
        assert!(surface.shown.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_menu_index_is_prompt_error() {
        let generator = StubGenerator::ok();
        let mut surface = ScriptedSurface::default();
        surface.confirms.push_back(Reply::Answer(false));
        surface.choices.push_back(Reply::Answer(9));

        let err = run_loop(&pinned_request(), &generator, &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, MuseError::Prompt(_)));
    }
}
