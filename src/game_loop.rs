//! Fixed-rate driver around a [`GridModel`].
//!
//! The model lives inside a single tokio task. Ticks, heading changes and
//! shutdown all arrive at that task, so a step and a direction change can
//! never interleave. Renderers follow along through a `watch` channel that
//! holds the snapshot taken after the latest step.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::game::{Direction, GridModel, Snapshot};
use crate::input::{Surface, TouchMapper, TouchPoint};

/// Shortest period the loop will tick at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug)]
enum Command {
    SetDirection(Direction),
}

pub struct GameLoop {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    mapper: TouchMapper,
}

impl GameLoop {
    /// Spawn the loop; the first step happens one `period` from now.
    ///
    /// Periods shorter than [`MIN_PERIOD`] are raised to it. Must be called
    /// from within a tokio runtime.
    pub fn start(model: GridModel, period: Duration) -> Self {
        let period = if period < MIN_PERIOD {
            warn!(?period, "tick period too short; using {:?}", MIN_PERIOD);
            MIN_PERIOD
        } else {
            period
        };
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(model.snapshot());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let mut ticker = interval_at(Instant::now() + period, period);
        // a late tick is dropped, never replayed
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            width = model.dims().width,
            height = model.dims().height,
            period_ms = period.as_millis() as u64,
            "game loop started"
        );
        let task = tokio::spawn(run(model, ticker, command_rx, snapshot_tx, shutdown_rx));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            mapper: TouchMapper::new(),
        }
    }

    /// Request a new heading; reversals are dropped by the model
    pub fn set_direction(&self, direction: Direction) {
        if self.commands.send(Command::SetDirection(direction)).is_err() {
            debug!(?direction, "game loop stopped; dropping direction change");
        }
    }

    /// Map a touch onto a heading and request it.
    ///
    /// Returns the heading the touch asked for, if any.
    pub fn touch(&self, point: TouchPoint, surface: Surface) -> Option<Direction> {
        let direction = self.mapper.direction_for(point, surface)?;
        self.set_direction(direction);
        Some(direction)
    }

    /// Receiver that is notified after every step
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// State after the latest step
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop ticking. Once this returns no further step will run.
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(%err, "game loop task ended abnormally");
            }
            info!(ticks = self.snapshots.borrow().tick, "game loop stopped");
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(
    mut model: GridModel,
    mut ticker: Interval,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            Some(command) = commands.recv() => match command {
                Command::SetDirection(direction) => {
                    if !model.set_direction(direction) {
                        debug!(?direction, current = ?model.direction(), "reversal ignored");
                    }
                }
            },

            _ = ticker.tick() => {
                let outcome = model.step();
                if outcome.ate_food {
                    debug!(
                        tick = model.ticks(),
                        len = model.snake().len(),
                        food = ?model.food(),
                        "food eaten"
                    );
                }
                snapshots.send_replace(model.snapshot());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GridDims, Position, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    const PERIOD: Duration = Duration::from_millis(500);

    fn model_at(head: (i32, i32), food: (i32, i32)) -> GridModel {
        GridModel::from_parts(
            GridDims::new(10, 10),
            Snake::new(Position::new(head.0, head.1)),
            Position::new(food.0, food.1),
            Direction::Left,
            StdRng::seed_from_u64(3),
        )
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_step_after_one_period() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();

        tokio::time::advance(PERIOD - Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(game.snapshot().tick, 0);

        tokio::time::advance(Duration::from_millis(1)).await;
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.head(), Position::new(4, 5));

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_ticks_at_minimum() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), Duration::ZERO);
        let mut rx = game.subscribe();

        tokio::time::advance(MIN_PERIOD).await;
        rx.changed().await.unwrap();

        assert_eq!(rx.borrow_and_update().tick, 1);
        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_applies_on_next_tick() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();

        game.set_direction(Direction::Up);
        rx.changed().await.unwrap();

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.direction, Direction::Up);
        assert_eq!(snapshot.head(), Position::new(5, 4));

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reversal_through_loop_ignored() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();

        game.set_direction(Direction::Right);
        game.set_direction(Direction::Right);
        rx.changed().await.unwrap();

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.direction, Direction::Left);
        assert_eq!(snapshot.head(), Position::new(4, 5));

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_maps_to_heading() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();
        let surface = Surface::new(90.0, 90.0);

        assert_eq!(game.touch(TouchPoint::new(45.0, 45.0), surface), None);
        assert_eq!(
            game.touch(TouchPoint::new(45.0, 80.0), surface),
            Some(Direction::Down)
        );
        rx.changed().await.unwrap();

        assert_eq!(rx.borrow_and_update().head(), Position::new(5, 6));

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_eating_publishes_growth() {
        let mut game = GameLoop::start(model_at((5, 5), (4, 5)), PERIOD);
        let mut rx = game.subscribe();

        rx.changed().await.unwrap();

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.segments[1].pos, Position::new(5, 5));
        assert!(snapshot.dims.contains(snapshot.food));

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_are_not_replayed() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();

        tokio::time::advance(PERIOD * 5 + Duration::from_millis(100)).await;
        rx.changed().await.unwrap();
        settle().await;

        assert_eq!(rx.borrow_and_update().tick, 1);

        game.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_stepping() {
        let mut game = GameLoop::start(model_at((5, 5), (0, 0)), PERIOD);
        let mut rx = game.subscribe();

        rx.changed().await.unwrap();
        rx.borrow_and_update();
        game.stop().await;
        assert!(!game.is_running());

        tokio::time::advance(PERIOD * 10).await;
        settle().await;

        assert_eq!(game.snapshot().tick, 1);
        assert!(rx.changed().await.is_err());

        // input after stop is dropped quietly
        game.set_direction(Direction::Up);
        game.stop().await;
    }
}
