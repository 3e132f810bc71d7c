// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod controller;
pub mod corpus;
pub mod difficulty;
pub mod error;
pub mod history;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod timer;
pub mod ui;

pub use app::App;
pub use controller::{ControllerConfig, RoundSummary, SubmitOutcome, TypingController};
pub use difficulty::Difficulty;
pub use error::{GameError, Result};

/// How often the event loop wakes up to drive the deferred reset
pub const TICK_RATE_MS: u64 = 100;
