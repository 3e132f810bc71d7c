use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::controller::{SubmitOutcome, TypingController};
use crate::difficulty::Difficulty;
use crate::history::{HistoryLog, RoundRecord};

/// Terminal front end around the controller: key bindings, history, feedback.
#[derive(Debug)]
pub struct App {
    pub controller: TypingController,
    pub history: Option<HistoryLog>,
    /// Outcome of the most recent submit, shown until the input changes
    pub last_outcome: Option<SubmitOutcome>,
    /// Best wpm on record for the current difficulty
    pub best_wpm: Option<u32>,
    should_quit: bool,
}

impl App {
    pub fn new(controller: TypingController, history: Option<HistoryLog>) -> Self {
        let mut app = Self {
            controller,
            history,
            last_outcome: None,
            best_wpm: None,
            should_quit: false,
        };
        app.refresh_best_wpm();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.edit_input(|input| input.clear()),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.edit_input(|input| input.push(c)),
            KeyCode::Backspace => self.edit_input(|input| {
                input.pop();
            }),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.select_difficulty(self.controller.difficulty().next()),
            KeyCode::BackTab => self.select_difficulty(self.controller.difficulty().previous()),
            KeyCode::F(n) => {
                if let Some(level) = (n as usize)
                    .checked_sub(1)
                    .and_then(|i| Difficulty::ALL.get(i))
                {
                    self.select_difficulty(*level);
                }
            }
            _ => {}
        }
    }

    /// Returns true when the screen needs a redraw
    pub fn on_tick(&mut self) -> bool {
        if self.controller.on_tick() {
            self.last_outcome = None;
            return true;
        }
        self.controller.pending_reset().is_some()
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        let mut input = self.controller.session().typed_input().to_string();
        edit(&mut input);
        self.controller.on_keystroke(input);
        if matches!(self.last_outcome, Some(SubmitOutcome::Incorrect { .. })) {
            self.last_outcome = None;
        }
    }

    fn submit(&mut self) {
        let outcome = self.controller.submit();

        if let SubmitOutcome::Correct(ref summary) = outcome {
            if let Some(wpm) = summary.wpm.value() {
                self.best_wpm = Some(self.best_wpm.map_or(wpm, |best| best.max(wpm)));
            }
            if let Some(ref history) = self.history {
                if let Err(err) = history.append(&RoundRecord::from(summary)) {
                    warn!(%err, path = %history.path().display(), "failed to record round");
                }
            }
        }

        self.last_outcome = Some(outcome);
    }

    fn select_difficulty(&mut self, level: Difficulty) {
        self.controller.select_difficulty(level);
        self.last_outcome = None;
        self.refresh_best_wpm();
    }

    fn refresh_best_wpm(&mut self) {
        self.best_wpm = match self.history {
            Some(ref history) => history
                .best_wpm(self.controller.difficulty())
                .unwrap_or_else(|err| {
                    warn!(%err, "failed to read history");
                    None
                }),
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::controller::ControllerConfig;
    use crate::corpus::PhraseCorpus;
    use crate::settings::MemorySettingsStore;
    use assert_matches::assert_matches;

    fn app_with_history(history: Option<HistoryLog>) -> (App, ManualClock) {
        let clock = ManualClock::new(0);
        let corpus = PhraseCorpus::from_json(
            r#"{
                "easy": ["hi yo"],
                "medium": ["med"],
                "hard": ["hard"],
                "punctuation_challenge": ["p!"]
            }"#,
        )
        .unwrap();
        let controller = TypingController::with_config(
            corpus,
            Box::new(MemorySettingsStore::new()),
            Box::new(clock.clone()),
            ControllerConfig {
                seed: Some(3),
                ..Default::default()
            },
        );
        (App::new(controller, history), clock)
    }

    fn app() -> (App, ManualClock) {
        app_with_history(None)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_builds_input() {
        let (mut app, _) = app();
        type_str(&mut app, "hi");
        assert_eq!(app.controller.session().typed_input(), "hi");

        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.controller.session().typed_input(), "h");

        app.on_key(key(KeyCode::Backspace));
        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.controller.session().typed_input(), "");
    }

    #[test]
    fn test_ctrl_u_clears_input() {
        let (mut app, _) = app();
        type_str(&mut app, "hi y");
        app.on_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.controller.session().typed_input(), "");
    }

    #[test]
    fn test_enter_submits() {
        let (mut app, clock) = app();
        type_str(&mut app, "hi yo");
        clock.advance(1_200);
        app.on_key(key(KeyCode::Enter));

        assert_matches!(app.last_outcome, Some(SubmitOutcome::Correct(_)));
        assert_eq!(app.controller.score(), 10);
        assert_eq!(app.best_wpm, Some(100));
    }

    #[test]
    fn test_enter_twice_records_both_matches() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryLog::with_path(dir.path().join("history.csv"));
        let (mut app, clock) = app_with_history(Some(history.clone()));

        type_str(&mut app, "hi yo");
        clock.advance(1_200);
        app.on_key(key(KeyCode::Enter));
        clock.advance(1_200);
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.controller.score(), 20);
        assert_matches!(app.last_outcome, Some(SubmitOutcome::Correct(ref s)) if s.score == 20);
        assert_eq!(history.read_all().unwrap().len(), 2);
        assert_eq!(app.best_wpm, Some(100));
    }

    #[test]
    fn test_miss_feedback_clears_on_edit() {
        let (mut app, _) = app();
        type_str(&mut app, "hi");
        app.on_key(key(KeyCode::Enter));
        assert_matches!(app.last_outcome, Some(SubmitOutcome::Incorrect { .. }));

        type_str(&mut app, " ");
        assert_eq!(app.last_outcome, None);
    }

    #[test]
    fn test_tab_cycles_difficulty() {
        let (mut app, _) = app();
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.controller.difficulty(), Difficulty::Medium);

        app.on_key(key(KeyCode::BackTab));
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(
            app.controller.difficulty(),
            Difficulty::PunctuationChallenge
        );
    }

    #[test]
    fn test_function_keys_select_difficulty() {
        let (mut app, _) = app();
        app.on_key(key(KeyCode::F(3)));
        assert_eq!(app.controller.difficulty(), Difficulty::Hard);

        app.on_key(key(KeyCode::F(9)));
        assert_eq!(app.controller.difficulty(), Difficulty::Hard);

        app.on_key(key(KeyCode::F(0)));
        assert_eq!(app.controller.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app();
        app.on_key(key(KeyCode::Esc));
        assert!(app.should_quit());

        let (mut app, _) = self::app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert_eq!(app.controller.session().typed_input(), "");
    }

    #[test]
    fn test_tick_starts_new_round_after_delay() {
        let (mut app, clock) = app();
        type_str(&mut app, "hi yo");
        clock.advance(1_000);
        app.on_key(key(KeyCode::Enter));
        let round = app.controller.round();

        clock.advance(1_000);
        assert!(app.on_tick());
        assert_eq!(app.controller.round(), round);

        clock.advance(2_000);
        assert!(app.on_tick());
        assert_eq!(app.controller.round(), round + 1);
        assert_eq!(app.last_outcome, None);
        assert!(!app.on_tick());
    }

    #[test]
    fn test_correct_round_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryLog::with_path(dir.path().join("history.csv"));
        let (mut app, clock) = app_with_history(Some(history.clone()));

        type_str(&mut app, "hi yo");
        clock.advance(2_000);
        app.on_key(key(KeyCode::Enter));

        let records = history.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].difficulty, Difficulty::Easy);
        assert_eq!(records[0].wpm, Some(60));
        assert_eq!(records[0].score, 10);
    }

    #[test]
    fn test_best_wpm_loaded_from_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryLog::with_path(dir.path().join("history.csv"));
        history
            .append(&RoundRecord {
                finished_at: "2024-01-01T00:00:00+00:00".to_string(),
                difficulty: Difficulty::Hard,
                words: 1,
                elapsed_secs: 1.0,
                wpm: Some(77),
                score: 10,
            })
            .unwrap();

        let (mut app, _) = app_with_history(Some(history));
        assert_eq!(app.best_wpm, None);

        app.on_key(key(KeyCode::F(3)));
        assert_eq!(app.best_wpm, Some(77));
    }
}
