use serde::{Deserialize, Serialize};

use crate::game::Direction;

/// A pointer position in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the screen the touch points live on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Maps touches to headings by splitting the surface into a 3x3 grid.
///
/// Only the four edge-center cells count: left-middle, top-center,
/// right-middle and bottom-center. Corners, the center and points lying
/// exactly on a third line are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchMapper;

impl TouchMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn direction_for(&self, point: TouchPoint, surface: Surface) -> Option<Direction> {
        let TouchPoint { x, y } = point;
        let (w, h) = (surface.width, surface.height);

        let middle_row = y > h / 3.0 && y < h * 2.0 / 3.0;
        let center_column = x > w / 3.0 && x < w * 2.0 / 3.0;

        if x < w / 3.0 && middle_row {
            Some(Direction::Left)
        } else if y < h / 3.0 && center_column {
            Some(Direction::Up)
        } else if x > w * 2.0 / 3.0 && middle_row {
            Some(Direction::Right)
        } else if y > h * 2.0 / 3.0 && center_column {
            Some(Direction::Down)
        } else {
            None
        }
    }
}
