use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    state::{GridDims, Position, Snake, Snapshot},
};

/// What happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the snake ate food this step
    pub ate_food: bool,
}

/// The snake, its food and its heading on a wrapping grid.
///
/// There is no terminal state: the head may run through the body and the game
/// simply carries on.
pub struct GridModel {
    dims: GridDims,
    snake: Snake,
    food: Position,
    direction: Direction,
    ticks: u64,
    rng: StdRng,
}

impl GridModel {
    /// Start a game: one head at the grid center heading left, food at a
    /// random cell.
    pub fn new(dims: GridDims, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let food = random_cell(&mut rng, dims);
        Self::from_parts(dims, Snake::new(dims.center()), food, Direction::Left, rng)
    }

    /// Assemble a model from explicit state
    pub fn from_parts(
        dims: GridDims,
        snake: Snake,
        food: Position,
        direction: Direction,
        rng: StdRng,
    ) -> Self {
        Self {
            dims,
            snake,
            food,
            direction,
            ticks: 0,
            rng,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Change heading unless `direction` points straight back.
    ///
    /// Returns whether the heading was taken; a reversal is a silent no-op.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> StepOutcome {
        let next = self.dims.neighbor(self.snake.head(), self.direction);
        self.ticks += 1;

        if next == self.food {
            self.snake.grow_to(next);
            self.food = random_cell(&mut self.rng, self.dims);
            return StepOutcome { ate_food: true };
        }

        self.snake.slide_to(next);
        StepOutcome { ate_food: false }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.ticks,
            dims: self.dims,
            direction: self.direction,
            segments: self.snake.segments().to_vec(),
            food: self.food,
        }
    }
}

/// Uniform cell in `[0, width] x [0, height]`; may land on the snake
fn random_cell(rng: &mut impl Rng, dims: GridDims) -> Position {
    Position::new(rng.gen_range(0..=dims.width), rng.gen_range(0..=dims.height))
}
