pub mod ui;

use std::{
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::Sender,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use tracing::info;

use target_sum::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    round::{Round, MIN_COUNT},
    runtime::{
        CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, RoundId, Runner, Ticker,
    },
    session::{Session, SessionConfig},
};

use crate::ui::grid::GRID_COLUMNS;

/// How long the loop waits for input before redrawing anyway
const FRAME_RATE_MS: u64 = 100;

/// countdown number puzzle: pick numbers that add up to the target before time runs out
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// how many numbers to show each round (stored config when omitted)
    #[clap(short = 'n', long, value_parser = parse_count)]
    count: Option<usize>,

    /// seconds on the clock each round (stored config when omitted)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    seconds: Option<u32>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log file path (defaults to the platform state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|e| format!("{e}"))?;
    if count < MIN_COUNT {
        return Err(format!("number count must be at least {MIN_COUNT}"));
    }
    Ok(count)
}

impl Cli {
    /// Layer CLI overrides on top of stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(count) = self.count {
            config.number_count = count;
        }
        if let Some(seconds) = self.seconds {
            config.initial_seconds = seconds;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The host shell: owns the live session and translates keys into moves.
#[derive(Debug)]
pub struct App {
    pub settings: SessionConfig,
    pub session: Session,
    pub cursor: usize,
    tx: Sender<GameEvent>,
}

impl App {
    pub fn new(settings: SessionConfig, tx: Sender<GameEvent>) -> Self {
        let round = Round::generate(settings.number_count);
        let session = Session::start(round, &settings, RoundId(0), tx.clone());
        Self {
            settings,
            session,
            cursor: 0,
            tx,
        }
    }

    /// Replace the current session with a fresh one built from `round`.
    ///
    /// The old session is discarded, never reset.
    pub fn start_round(&mut self, round: Round) {
        let id = self.session.id().next();
        let fresh = Session::start(round, &self.settings, id, self.tx.clone());
        let old = std::mem::replace(&mut self.session, fresh);
        old.discard();
        self.cursor = 0;
    }

    pub fn play_again(&mut self) {
        self.start_round(Round::generate(self.settings.number_count));
    }

    pub fn on_tick(&mut self, round: RoundId) {
        self.session.on_tick(round);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        if self.session.status().is_terminal() {
            match key.code {
                KeyCode::Char('n') | KeyCode::Char('r') | KeyCode::Enter => self.play_again(),
                KeyCode::Char('q') => return Control::Quit,
                _ => {}
            }
            return Control::Continue;
        }

        let count = self.session.game().numbers().len();
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < count {
                    self.cursor = index;
                    self.session.select(index);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.select(self.cursor);
            }
            KeyCode::Left => self.cursor = (self.cursor + count - 1) % count,
            KeyCode::Right => self.cursor = (self.cursor + 1) % count,
            KeyCode::Up => {
                if self.cursor >= GRID_COLUMNS {
                    self.cursor -= GRID_COLUMNS;
                }
            }
            KeyCode::Down => {
                if self.cursor + GRID_COLUMNS < count {
                    self.cursor += GRID_COLUMNS;
                }
            }
            KeyCode::Char('q') => return Control::Quit,
            _ => {}
        }
        Control::Continue
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // Logging first, so config load problems are recorded.
    let log_path = cli.log_file.clone().or_else(AppDirs::log_path);
    let _guard = logging::init_tracing(log_path.as_deref())?;

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    config.validate().with_context(|| {
        format!("invalid settings (config file: {})", store.path().display())
    })?;
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("failed to save config to {}", store.path().display()))?;
    }
    info!(?config, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(FRAME_RATE_MS)),
    );
    let mut app = App::new(SessionConfig::from(&config), runner.sender());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<()> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick(round) => app.on_tick(round),
            GameEvent::Resize | GameEvent::Frame => {}
            GameEvent::Key(key) => {
                if key.kind == KeyEventKind::Press && app.on_key(key) == Control::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    info!("quit");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
