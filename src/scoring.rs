use std::fmt;

/// Fixed game constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub reward_points: u32,
    pub penalty_points: u32,
    pub reset_delay_ms: i64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            reward_points: 10,
            penalty_points: 5,
            reset_delay_ms: 3000,
        }
    }
}

/// Running score for one app run; never goes below zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    pub fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn points(&self) -> u32 {
        self.0
    }

    pub fn reward(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn penalize(&mut self, points: u32) {
        self.0 = self.0.saturating_sub(points);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a wpm measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wpm {
    Measured(u32),
    /// Elapsed time was zero or negative
    Unavailable,
}

impl Wpm {
    pub fn value(&self) -> Option<u32> {
        match self {
            Wpm::Measured(v) => Some(*v),
            Wpm::Unavailable => None,
        }
    }
}

impl fmt::Display for Wpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wpm::Measured(v) => write!(f, "{v}"),
            Wpm::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Count of single-space separated tokens, so `"a  b"` counts 3.
///
/// This is not a linguistic word count; punctuation glued to a token
/// belongs to it.
pub fn word_count(phrase: &str) -> usize {
    phrase.split(' ').count()
}

pub fn compute_wpm(words: usize, elapsed_ms: i64) -> Wpm {
    if elapsed_ms <= 0 {
        return Wpm::Unavailable;
    }

    let elapsed_secs = elapsed_ms as f64 / 1000.0;
    let wpm = (words as f64 / elapsed_secs * 60.0).round();

    if wpm.is_finite() {
        Wpm::Measured(wpm.min(u32::MAX as f64) as u32)
    } else {
        Wpm::Unavailable
    }
}
