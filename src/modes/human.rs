use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, Simulation, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven terminal front end. It paces ticks, forwards steering to
/// the simulation and draws the latest snapshot.
pub struct HumanMode {
    config: GameConfig,
    seed: Option<u64>,
    simulation: Simulation,
    snapshot: Snapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// A `seed` makes the apple sequence reproducible; restarts reuse it.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let simulation = new_simulation(&config, seed)?;
        let snapshot = simulation.snapshot();

        Ok(Self {
            config,
            seed,
            simulation,
            snapshot,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        let result = self.run_game_loop(&mut terminal).await;

        // Always restore the terminal, even if the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.config.tick_interval());
        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.config, &self.snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.simulation.set_direction(direction),
            KeyAction::Restart => {
                if let Err(err) = self.reset_game() {
                    warn!("Restart failed: {err:#}");
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if !self.simulation.is_alive() {
            return;
        }

        match self.simulation.advance_tick() {
            Ok(snapshot) => {
                if !snapshot.alive {
                    self.metrics.on_game_over(snapshot.score);
                }
                self.snapshot = snapshot;
            }
            Err(err) => warn!("Tick rejected: {err}"),
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        info!("Restarting game");
        self.simulation = new_simulation(&self.config, self.seed)?;
        self.snapshot = self.simulation.snapshot();
        self.metrics.on_game_start();
        Ok(())
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

fn new_simulation(config: &GameConfig, seed: Option<u64>) -> Result<Simulation> {
    let simulation = match seed {
        Some(seed) => Simulation::seeded(config.clone(), seed),
        None => Simulation::new(config.clone()),
    };
    simulation.context("Failed to start simulation")
}
