mod ui;

use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdin};
use std::time::Duration;
use typr::{
    config::{Config, ConfigStore, Difficulty, FileConfigStore, TestMode},
    error::EngineError,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    trainer::Trainer,
    TICK_RATE_MS,
};

/// minimal typing trainer with difficulty tiers and timed or word-count drills
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing trainer. Draws a randomized word set from a difficulty-tiered pool, grades every keystroke live, and scores speed and accuracy under countdown or word-target rules. Hard and developer tiers charge time penalties for mistakes."
)]
pub struct Cli {
    /// difficulty tier of the word pool
    #[clap(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// how the session ends: a fixed clock or a correct-word target
    #[clap(short, long, value_enum)]
    mode: Option<TestMode>,

    /// seconds on the clock in time mode
    #[clap(short, long)]
    seconds: Option<u64>,

    /// correct-word target in words mode
    #[clap(short, long)]
    words: Option<usize>,
}

impl Cli {
    /// CLI flags override the stored settings for this invocation.
    fn merged_config(&self, stored: Config) -> Config {
        Config {
            difficulty: self.difficulty.unwrap_or(stored.difficulty),
            test_mode: self.mode.unwrap_or(stored.test_mode),
            time_limit_secs: self.seconds.unwrap_or(stored.time_limit_secs),
            target_word_count: self.words.unwrap_or(stored.target_word_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub trainer: Trainer,
    pub state: AppState,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let trainer = Trainer::new(config.clone())?;
        Ok(Self {
            trainer,
            state: AppState::Typing,
            config,
        })
    }

    /// Fresh draw, fresh counters, fresh clock.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.trainer = Trainer::new(self.config.clone())?;
        self.state = AppState::Typing;
        Ok(())
    }

    /// Atomic teardown: the old trainer (timer included) is dropped before
    /// the new session exists, so nothing leaks across the change.
    pub fn apply_config(&mut self, config: Config) -> Result<(), EngineError> {
        self.config = config;
        self.restart()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileConfigStore::new();
    let config = cli.merged_config(store.load());

    // Fail on configuration errors before the alternate screen opens.
    let mut app = App::new(config)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &FileConfigStore,
) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                if app.state == AppState::Typing {
                    app.trainer.on_tick();
                    if app.trainer.has_finished() {
                        app.state = AppState::Results;
                    }
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if is_quit(&key) {
                    break;
                }
                match app.state {
                    AppState::Typing => match key.code {
                        KeyCode::Backspace => app.trainer.backspace(),
                        KeyCode::Left => app.restart()?,
                        KeyCode::Char(c) => {
                            app.trainer.write(c);
                            if app.trainer.has_finished() {
                                app.state = AppState::Results;
                            }
                        }
                        _ => {}
                    },
                    AppState::Results => match key.code {
                        KeyCode::Char('r') => app.restart()?,
                        KeyCode::Char('d') => {
                            let mut config = app.config.clone();
                            config.difficulty = config.difficulty.cycled();
                            let _ = store.save(&config);
                            app.apply_config(config)?;
                        }
                        KeyCode::Char('m') => {
                            let mut config = app.config.clone();
                            config.test_mode = config.test_mode.toggled();
                            let _ = store.save(&config);
                            app.apply_config(config)?;
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    Ok(())
}
