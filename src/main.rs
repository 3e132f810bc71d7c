use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
};

use typerush::{
    app_dirs::AppDirs,
    clock::SystemClock,
    corpus::PhraseCorpus,
    history::HistoryLog,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    settings::{load_difficulty, FileSettingsStore},
    App, ControllerConfig, Difficulty, TypingController,
};

/// type the phrase exactly, score points, see your words per minute
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-screen typing game: match the target phrase exactly to earn points and a words-per-minute reading; misses cost points. Difficulty is remembered between runs."
)]
pub struct Cli {
    /// difficulty to start with (also saved for next time)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// json file of phrases keyed by difficulty, instead of the built-in set
    #[clap(short = 'p', long)]
    phrases: Option<PathBuf>,

    /// settings file holding the saved difficulty
    #[clap(long)]
    settings: Option<PathBuf>,

    /// csv file that matched rounds are appended to
    #[clap(long)]
    history_file: Option<PathBuf>,

    /// do not record matched rounds
    #[clap(long)]
    no_history: bool,

    /// file to write logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short = 'v', long)]
    verbose: bool,

    /// seed for phrase selection, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    logging::init_file_logger(&log_path, cli.verbose)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let mut app = build_app(&cli)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(score = app.controller.score(), "session ended");
    result
}

fn build_app(cli: &Cli) -> anyhow::Result<App> {
    let corpus = match cli.phrases {
        Some(ref path) => PhraseCorpus::from_path(path)
            .with_context(|| format!("failed to load phrases from {}", path.display()))?,
        None => PhraseCorpus::embedded().context("failed to load built-in phrases")?,
    };

    let store = match cli.settings {
        Some(ref path) => FileSettingsStore::with_path(path),
        None => FileSettingsStore::new(),
    };
    let stored = load_difficulty(&store);

    let mut controller = TypingController::with_config(
        corpus,
        Box::new(store),
        Box::new(SystemClock),
        ControllerConfig {
            seed: cli.seed,
            ..Default::default()
        },
    );
    if let Some(level) = cli.difficulty.filter(|level| *level != stored) {
        controller.select_difficulty(level);
    }

    let history = if cli.no_history {
        None
    } else {
        Some(match cli.history_file {
            Some(ref path) => HistoryLog::with_path(path),
            None => HistoryLog::new(),
        })
    };

    tracing::info!(
        difficulty = %controller.difficulty(),
        history = history.is_some(),
        "starting"
    );

    Ok(App::new(controller, history))
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let redraw = match runner.step() {
            GameEvent::Tick => app.on_tick(),
            GameEvent::Resize => true,
            GameEvent::Key(key) => {
                app.on_key(key);
                true
            }
        };

        if app.should_quit() {
            break;
        }

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
