use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::corpus::PhraseCorpus;
use crate::difficulty::Difficulty;
use crate::scoring::{compute_wpm, word_count, Rules, Score, Wpm};
use crate::session::Session;
use crate::settings::{load_difficulty, save_difficulty, SettingsStore};
use crate::timer::DeferredReset;

/// Construction-time knobs for a controller
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerConfig {
    pub rules: Rules,
    /// Fixed rng seed for reproducible phrase draws
    pub seed: Option<u64>,
}

/// What a correct submission produced
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub phrase: String,
    pub words: usize,
    pub elapsed_ms: i64,
    pub wpm: Wpm,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Correct(RoundSummary),
    Incorrect { penalty: u32, score: u32 },
}

/// Owns the whole game state. Every mutation goes through its methods, one
/// event at a time.
pub struct TypingController {
    corpus: PhraseCorpus,
    rules: Rules,
    store: Box<dyn SettingsStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    difficulty: Difficulty,
    session: Session,
    score: Score,
    round: u64,
    pending_reset: Option<DeferredReset>,
}

impl TypingController {
    pub fn new(
        corpus: PhraseCorpus,
        store: Box<dyn SettingsStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self::with_config(corpus, store, clock, ControllerConfig::default())
    }

    pub fn with_config(
        corpus: PhraseCorpus,
        store: Box<dyn SettingsStore>,
        clock: Box<dyn Clock>,
        config: ControllerConfig,
    ) -> Self {
        let difficulty = load_difficulty(store.as_ref());
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Session::new(corpus.draw(difficulty, &mut rng), clock.now_ms());

        debug!(%difficulty, phrase = session.target_phrase(), "first round");

        Self {
            corpus,
            rules: config.rules,
            store,
            clock,
            rng,
            difficulty,
            session,
            score: Score::default(),
            round: 1,
            pending_reset: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.score.points()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn corpus(&self) -> &PhraseCorpus {
        &self.corpus
    }

    pub fn pending_reset(&self) -> Option<DeferredReset> {
        self.pending_reset
    }

    /// Milliseconds until the next phrase while a correct match is on display
    pub fn reset_remaining_ms(&self) -> Option<i64> {
        let now = self.clock.now_ms();
        self.pending_reset.map(|reset| reset.remaining_ms(now))
    }

    pub fn select_difficulty(&mut self, level: Difficulty) {
        info!(from = %self.difficulty, to = %level, "difficulty changed");
        self.difficulty = level;

        if let Err(err) = save_difficulty(self.store.as_mut(), level) {
            warn!(%err, "failed to persist difficulty");
        }

        self.start_new_round();
    }

    pub fn start_new_round(&mut self) {
        self.pending_reset = None;
        self.round += 1;

        let phrase = self.corpus.draw(self.difficulty, &mut self.rng);
        self.session = Session::new(phrase, self.clock.now_ms());

        debug!(
            round = self.round,
            difficulty = %self.difficulty,
            phrase = self.session.target_phrase(),
            "new round"
        );
    }

    /// Replace the typed input with the full current field contents
    pub fn on_keystroke(&mut self, new_input: impl Into<String>) {
        self.session.set_typed_input(new_input.into());
    }

    /// Judge the typed input against the target. Allowed in any state: a
    /// matching resubmit during the countdown is awarded again and replaces
    /// the pending reset.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.session.matches_target() {
            self.score.penalize(self.rules.penalty_points);
            debug!(
                typed = self.session.typed_input(),
                score = self.score.points(),
                "mismatched submission"
            );
            return SubmitOutcome::Incorrect {
                penalty: self.rules.penalty_points,
                score: self.score.points(),
            };
        }

        let now = self.clock.now_ms();
        let elapsed_ms = now - self.session.started_at_ms();
        let words = word_count(self.session.target_phrase());
        let wpm = compute_wpm(words, elapsed_ms);

        self.session.complete(wpm, now);
        self.score.reward(self.rules.reward_points);
        self.pending_reset = Some(DeferredReset::schedule(
            self.round,
            now,
            self.rules.reset_delay_ms,
        ));

        info!(
            difficulty = %self.difficulty,
            %wpm,
            elapsed_ms,
            score = self.score.points(),
            "phrase matched"
        );

        SubmitOutcome::Correct(RoundSummary {
            difficulty: self.difficulty,
            phrase: self.session.target_phrase().to_string(),
            words,
            elapsed_ms,
            wpm,
            score: self.score.points(),
        })
    }

    /// Fire the deferred reset once its deadline passes. Returns true when a
    /// new round started.
    pub fn on_tick(&mut self) -> bool {
        let Some(reset) = self.pending_reset else {
            return false;
        };

        if reset.round != self.round {
            self.pending_reset = None;
            return false;
        }

        if reset.is_due(self.clock.now_ms()) {
            self.start_new_round();
            return true;
        }

        false
    }
}

impl std::fmt::Debug for TypingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingController")
            .field("difficulty", &self.difficulty)
            .field("session", &self.session)
            .field("score", &self.score)
            .field("round", &self.round)
            .field("pending_reset", &self.pending_reset)
            .finish_non_exhaustive()
    }
}
