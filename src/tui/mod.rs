//! Terminal UI for Neon Bomb.

mod app;
mod input;
mod orchestrator;
mod players;
mod ui;

pub use app::{App, EXPLOSION_FLASH};
pub use input::{digit_cell, move_cursor};
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{AdvisorPlayer, HumanPlayer, Player, Turn};

use crate::advisor::MoveAdvisor;
use crate::banter::OPENING_LINE;
use crate::game_config::GameConfig;
use crate::games::neon_bomb::Action;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A running match: the orchestrator task and the channels to it.
struct Match {
    task: JoinHandle<()>,
    action_tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
}

impl Match {
    fn spawn(config: &GameConfig, advisor: Arc<dyn MoveAdvisor>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let human = HumanPlayer::new(config.human_name().clone(), action_rx);
        let ai = AdvisorPlayer::new(
            config.opponent_name().clone(),
            advisor,
            config.ai_delay(),
            *config.ai_bombs(),
        );
        let mut orchestrator =
            Orchestrator::new(*config.initial_bombs(), Box::new(human), Box::new(ai), event_tx);

        let task = tokio::spawn(async move {
            match orchestrator.run().await {
                Ok(outcome) => info!(%outcome, "Match finished"),
                Err(e) => error!(error = %e, "Match stopped"),
            }
        });

        Self {
            task,
            action_tx,
            event_rx,
        }
    }
}

impl Drop for Match {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Sends tracing output to `path` so it doesn't tear the screen.
///
/// Call before anything worth logging happens.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Runs the terminal game against `advisor` until the user quits.
pub async fn run_tui(config: GameConfig, advisor: Arc<dyn MoveAdvisor>) -> Result<()> {
    info!(
        advisor = advisor.name(),
        bombs = *config.initial_bombs(),
        "Starting Neon Bomb TUI"
    );

    enable_raw_mode()?;
    let mut terminal = guarded(enter_screen, || {
        if let Err(e) = restore_terminal() {
            warn!(error = %e, "Failed to restore terminal");
        }
    })?;

    let res = run_app(&mut terminal, &config, advisor).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

fn enter_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Runs `setup`, calling `restore` if it fails.
fn guarded<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

#[instrument(skip_all)]
async fn run_app(terminal: &mut Tui, config: &GameConfig, advisor: Arc<dyn MoveAdvisor>) -> Result<()> {
    let mut app = App::new(
        *config.initial_bombs(),
        config.human_name().clone(),
        config.opponent_name().clone(),
        OPENING_LINE,
    );
    let mut current = Match::spawn(config, Arc::clone(&advisor));

    loop {
        while let Ok(event) = current.event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, &app, Instant::now()))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('r') => {
                info!("Restarting match");
                current = Match::spawn(config, Arc::clone(&advisor));
                app.restart();
            }
            code => {
                if let Some(action) = app.handle_key(code) {
                    current.action_tx.send(action)?;
                }
            }
        }
    }
}
