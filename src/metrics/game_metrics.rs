use std::time::{Duration, Instant};

use crate::game::Snapshot;

/// Session stats shown in the HUD; nothing here outlives the process
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold in the latest published snapshot
    pub fn on_snapshot(&mut self, snapshot: &Snapshot) {
        // the snake never shrinks, so every extra segment is one meal
        self.food_eaten = snapshot.len().saturating_sub(1) as u32;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GridDims, Position, Segment};

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_snapshot_counts_food() {
        let mut metrics = GameMetrics::new();
        let snapshot = Snapshot {
            tick: 17,
            dims: GridDims::new(10, 10),
            direction: Direction::Up,
            segments: vec![
                Segment::head(Position::new(1, 1)),
                Segment::body(Position::new(1, 2)),
                Segment::body(Position::new(1, 3)),
            ],
            food: Position::new(5, 5),
        };

        metrics.on_snapshot(&snapshot);

        assert_eq!(metrics.food_eaten, 2);
    }

    #[test]
    fn test_update_tracks_elapsed() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);
    }
}
