use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Command, GameConfig, GameController, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How the grid size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    /// Use the configured grid dimensions
    Fixed,
    /// Fit the grid to the whole terminal, following resizes
    FillTerminal,
}

impl GridLayout {
    pub fn toggled(self) -> Self {
        match self {
            GridLayout::Fixed => GridLayout::FillTerminal,
            GridLayout::FillTerminal => GridLayout::Fixed,
        }
    }
}

/// Terminal front end: polls keys, drives the controller and draws its view
pub struct HumanMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    layout: GridLayout,
    seen_round: u64,
    recorded_game_over: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, layout: GridLayout) -> Self {
        let mut mode = Self {
            controller: GameController::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            layout,
            seen_round: 0,
            recorded_game_over: false,
        };
        mode.sync_metrics();
        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "exiting after {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        if self.layout == GridLayout::FillTerminal {
            let size = terminal.size().context("Failed to query terminal size")?;
            self.apply_layout(size.width, size.height, false);
        }

        let mut tick_timer = interval(self.controller.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, terminal)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.controller.on_quit_command(),
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.controller.tick();
                    self.sync_metrics();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let view = self.controller.view();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.controller.on_quit_command();
                }
            }

            if self.controller.is_terminated() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event,
        terminal: &Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release or repeat
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self
                    .input_handler
                    .handle_key_event(key, self.controller.phase())
                {
                    KeyAction::Game(command) => self.controller.handle(command),
                    KeyAction::ToggleLayout => {
                        self.layout = self.layout.toggled();
                        debug!("layout switched to {:?}", self.layout);
                        let size = terminal.size().context("Failed to query terminal size")?;
                        self.apply_layout(size.width, size.height, true);
                    }
                    KeyAction::None => {}
                }
            }
            Event::Resize(width, height) if self.layout == GridLayout::FillTerminal => {
                self.apply_layout(width, height, false);
            }
            _ => {}
        }

        self.sync_metrics();
        Ok(())
    }

    /// Push the grid size implied by the current layout into the controller.
    /// A layout switch always restarts the round; a plain terminal resize
    /// only does so when the grid actually changes.
    fn apply_layout(&mut self, width: u16, height: u16, force: bool) {
        let (cols, rows) = match self.layout {
            GridLayout::Fixed => {
                let config = self.controller.config();
                (config.grid_cols, config.grid_rows)
            }
            GridLayout::FillTerminal => Renderer::grid_capacity(Rect::new(0, 0, width, height)),
        };

        let unchanged =
            self.controller.grid().cols() == cols && self.controller.grid().rows() == rows;
        if unchanged && !force {
            return;
        }
        self.controller.handle(Command::Resize { cols, rows });
    }

    /// Mirror round starts and endings into the session statistics
    fn sync_metrics(&mut self) {
        let round = self.controller.round();
        if round != self.seen_round {
            self.seen_round = round;
            self.recorded_game_over = false;
            self.metrics.on_game_start();
        }

        if let Phase::GameOver { final_score, .. } = self.controller.phase() {
            if !self.recorded_game_over {
                self.recorded_game_over = true;
                self.metrics.on_game_over(final_score);
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
