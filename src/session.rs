use crate::scoring::Wpm;

/// Per-character rendering state of the target phrase
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Pending,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for a correct submission
    Active,
    /// Matched; wpm is on display until the deferred reset fires
    Correct { wpm: Wpm, completed_at_ms: i64 },
}

/// The live round
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    target_phrase: String,
    typed_input: String,
    started_at_ms: i64,
    state: RoundState,
}

impl Session {
    pub fn new(target_phrase: impl Into<String>, started_at_ms: i64) -> Self {
        Self {
            target_phrase: target_phrase.into(),
            typed_input: String::new(),
            started_at_ms,
            state: RoundState::Active,
        }
    }

    pub fn target_phrase(&self) -> &str {
        &self.target_phrase
    }

    pub fn typed_input(&self) -> &str {
        &self.typed_input
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }

    pub fn wpm(&self) -> Option<Wpm> {
        match self.state {
            RoundState::Active => None,
            RoundState::Correct { wpm, .. } => Some(wpm),
        }
    }

    pub fn matches_target(&self) -> bool {
        self.typed_input == self.target_phrase
    }

    pub(crate) fn set_typed_input(&mut self, input: String) {
        self.typed_input = input;
    }

    pub(crate) fn complete(&mut self, wpm: Wpm, completed_at_ms: i64) {
        self.state = RoundState::Correct {
            wpm,
            completed_at_ms,
        };
    }

    /// One state per target character; typed overflow past the target is ignored
    pub fn char_states(&self) -> Vec<CharState> {
        let mut typed = self.typed_input.chars();
        self.target_phrase
            .chars()
            .map(|expected| match typed.next() {
                Some(c) if c == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
                None => CharState::Pending,
            })
            .collect()
    }
}
