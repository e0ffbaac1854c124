use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::session::SessionStats;

type Term = Terminal<CrosstermBackend<Stderr>>;

/// Interactive play in the terminal
///
/// Owns the two external drivers of a [`GameState`]: a fixed-rate tick timer
/// and the keyboard. Both are polled from one `select!`, so a tick always runs
/// to completion before the next key press is applied.
pub struct HumanMode {
    config: GameConfig,
    seed: Option<u64>,
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Tick source; `None` once the game is over
    ticker: Option<Interval>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let state = Self::new_game(&config, seed);

        Self {
            config,
            seed,
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ticker: None,
            should_quit: false,
        }
    }

    fn new_game(config: &GameConfig, seed: Option<u64>) -> GameState {
        match seed {
            Some(seed) => GameState::with_seed(config.clone(), seed),
            None => GameState::new(config.clone()),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // restore the terminal even when the loop failed
        let cleanup = Self::cleanup_terminal(&mut terminal);
        result.and(cleanup)
    }

    async fn run_game_loop(&mut self, terminal: &mut Term) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.arm_ticker();
        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, terminal)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = Self::next_tick(&mut self.ticker) => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(score = self.state.score(), "quitting");
                break;
            }
        }

        Ok(())
    }

    /// Waits for the next tick, or forever if the tick source is stopped
    async fn next_tick(ticker: &mut Option<Interval>) {
        match ticker {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn arm_ticker(&mut self) {
        let mut ticker = interval(self.config.tick_delay());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of a tokio interval fires immediately; skip it so the
        // snake sits still for one period after each start
        ticker.reset();
        self.ticker = Some(ticker);
    }

    fn handle_event(&mut self, event: Event, terminal: &mut Term) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        if !self.state.set_direction(direction) {
                            debug!(?direction, "ignored reverse turn");
                        }
                    }
                    KeyAction::Restart => {
                        self.reset_game();
                        self.draw(terminal)?;
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(..) => self.draw(terminal)?,
            _ => {}
        }

        Ok(())
    }

    fn update_game(&mut self) {
        let outcome = self.state.tick();

        if !outcome.running {
            self.ticker = None;
            self.stats.on_game_over(self.state.score());
        }
    }

    /// Start over; a game abandoned mid-play still counts toward the stats
    fn reset_game(&mut self) {
        if self.state.is_running() {
            self.stats.on_game_over(self.state.score());
        }

        self.state = Self::new_game(&self.config, self.seed);
        self.stats.on_game_start();
        self.arm_ticker();
    }

    fn draw(&mut self, terminal: &mut Term) -> Result<()> {
        self.stats.update();
        let snapshot = self.state.snapshot();

        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot, &self.stats))
            .context("Failed to draw frame")?;

        Ok(())
    }

    fn cleanup_terminal(terminal: &mut Term) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
