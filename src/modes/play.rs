use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::error::InitError;
use crate::game::{GameConfig, GridModel};
use crate::game_loop::GameLoop;
use crate::input::{InputAction, InputHandler, Surface};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, CELL_COLUMNS};

type Term = Terminal<CrosstermBackend<Stderr>>;

/// Interactive session in the terminal.
///
/// The whole terminal is the touch surface: clicking the middle of an edge
/// turns the snake that way.
pub struct PlayMode {
    config: GameConfig,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    surface: Surface,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            surface: Surface::new(0.0, 0.0),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().map_err(InitError::Terminal)?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture).map_err(InitError::Terminal)?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).map_err(InitError::Terminal)?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.play(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn play(&mut self, terminal: &mut Term) -> Result<()> {
        let size = terminal.size().context("Failed to read terminal size")?;
        let area = Rect::new(0, 0, size.width, size.height);
        self.surface = Surface::new(area.width as f32, area.height as f32);

        let model = self.build_model(area)?;
        let period = self.config.tick_period()?;
        let mut game = GameLoop::start(model, period);

        let result = self.run_game_loop(terminal, &game).await;
        game.stop().await;
        result
    }

    /// Size the grid so that every cell, including the inclusive last row
    /// and column, lands inside the board.
    fn build_model(&self, area: Rect) -> Result<GridModel, InitError> {
        let board = self.renderer.board_area(area);
        let columns = (board.width / CELL_COLUMNS).saturating_sub(1);
        let rows = board.height.saturating_sub(1);
        let dims = self
            .config
            .dims_for_surface(u32::from(columns), u32::from(rows))?;
        // explicit bounds skip the surface fit, so check them against the board
        let board_columns = usize::from(columns) + 1;
        let board_rows = usize::from(rows) + 1;
        if dims.columns() > board_columns || dims.rows() > board_rows {
            return Err(InitError::GridExceedsBoard {
                columns: dims.columns(),
                rows: dims.rows(),
                board_columns,
                board_rows,
            });
        }
        info!(width = dims.width, height = dims.height, "grid sized");
        Ok(GridModel::new(dims, self.config.seed))
    }

    async fn run_game_loop(&mut self, terminal: &mut Term, game: &GameLoop) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut snapshots = game.subscribe();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, game),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // A step happened
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        self.should_quit = true;
                    } else {
                        self.metrics.on_snapshot(&snapshots.borrow_and_update());
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = snapshots.borrow().clone();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event, game: &GameLoop) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            Event::Resize(width, height) => {
                self.surface = Surface::new(width as f32, height as f32);
                InputAction::None
            }
            _ => InputAction::None,
        };

        match action {
            InputAction::Turn(direction) => game.set_direction(direction),
            InputAction::Touch(point) => {
                game.touch(point, self.surface);
            }
            InputAction::Quit => self.should_quit = true,
            InputAction::None => {}
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Term) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
