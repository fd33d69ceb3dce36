use serde::{Deserialize, Serialize};

use super::action::{Direction, Role};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Largest valid coordinate on each axis.
///
/// Both bounds are inclusive: a grid with `width == 10` has columns `0..=10`,
/// eleven in total. Wrapping only happens once a coordinate leaves that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: i32,
    pub height: i32,
}

impl GridDims {
    /// Largest bound a grid may have; one past it must still fit in `i32`
    pub const MAX_BOUND: i32 = i32::MAX - 1;

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cell columns actually reachable
    pub fn columns(&self) -> usize {
        self.width as usize + 1
    }

    /// Number of cell rows actually reachable
    pub fn rows(&self) -> usize {
        self.height as usize + 1
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..=self.width).contains(&pos.x) && (0..=self.height).contains(&pos.y)
    }

    /// The cell one step from `pos` in `direction`, wrapped onto the grid
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let step = |from: i32, delta: i32, bound: i32| -> i32 {
            match from.checked_add(delta) {
                Some(next) if next < 0 => bound,
                Some(next) if next > bound => 0,
                Some(next) => next,
                None if delta < 0 => bound,
                None => 0,
            }
        };
        Position::new(
            step(pos.x, dx, self.width),
            step(pos.y, dy, self.height),
        )
    }
}

/// One cell of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub role: Role,
    pub pos: Position,
}

impl Segment {
    pub fn head(pos: Position) -> Self {
        Self {
            role: Role::Head,
            pos,
        }
    }

    pub fn body(pos: Position) -> Self {
        Self {
            role: Role::Body,
            pos,
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments, with the head at index 0
    segments: Vec<Segment>,
}

impl Snake {
    /// A snake consisting of just its head
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![Segment::head(head)],
        }
    }

    /// Build a snake from head-first positions; the first one becomes the head
    pub fn from_positions(positions: &[Position]) -> Option<Self> {
        let (&head, rest) = positions.split_first()?;
        let mut segments = Vec::with_capacity(positions.len());
        segments.push(Segment::head(head));
        segments.extend(rest.iter().copied().map(Segment::body));
        Some(Self { segments })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0].pos
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1].pos
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.pos)
    }

    /// Move the head to `to`; every other segment takes the place its
    /// predecessor held before the move and the old tail cell is vacated.
    pub fn slide_to(&mut self, to: Position) {
        let mut prev = to;
        for segment in self.segments.iter_mut() {
            prev = std::mem::replace(&mut segment.pos, prev);
        }
    }

    /// Move the head to `to` and leave a new body segment where it was
    pub fn grow_to(&mut self, to: Position) {
        let old_head = self.head();
        self.segments.insert(1, Segment::body(old_head));
        self.segments[0].pos = to;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a snake keeps its head for its whole life
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Read-only copy of the model handed to renderers after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of steps taken so far
    pub tick: u64,
    pub dims: GridDims,
    pub direction: Direction,
    /// Head first
    pub segments: Vec<Segment>,
    pub food: Position,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.segments[0].pos
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Role of whatever occupies `pos`; the head wins over body and food
    pub fn role_at(&self, pos: Position) -> Option<Role> {
        if self.segments.first().is_some_and(|s| s.pos == pos) {
            Some(Role::Head)
        } else if self.segments.iter().any(|s| s.pos == pos) {
            Some(Role::Body)
        } else {
            (self.food == pos).then_some(Role::Food)
        }
    }
}
