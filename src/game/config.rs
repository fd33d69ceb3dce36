use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::GridDims;
use crate::error::InitError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Largest x coordinate; derived from the surface when absent
    pub grid_width: Option<i32>,
    /// Largest y coordinate; derived from the surface when absent
    pub grid_height: Option<i32>,
    /// Surface units covered by one grid cell along each axis
    pub node_size: u32,
    /// Time between two steps
    pub tick_ms: u64,
    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: None,
            grid_height: None,
            node_size: 1,
            tick_ms: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a fixed grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: Some(width),
            grid_height: Some(height),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, InitError> {
        let raw = std::fs::read_to_string(path).map_err(|source| InitError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| InitError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_period(&self) -> Result<Duration, InitError> {
        if self.tick_ms == 0 {
            return Err(InitError::ZeroTickPeriod);
        }
        Ok(Duration::from_millis(self.tick_ms))
    }

    /// Grid bounds for a drawing surface of the given size.
    ///
    /// Explicit `grid_width`/`grid_height` win; otherwise each bound is the
    /// number of whole nodes that fit on the surface.
    pub fn dims_for_surface(&self, width: u32, height: u32) -> Result<GridDims, InitError> {
        if self.node_size == 0 {
            return Err(InitError::ZeroNodeSize);
        }

        let fit = |explicit: Option<i32>, extent: u32| -> Option<i32> {
            match explicit {
                Some(bound) => Some(bound),
                None => {
                    let count = extent / self.node_size;
                    (count > 0).then(|| {
                        i32::try_from(count)
                            .unwrap_or(GridDims::MAX_BOUND)
                            .min(GridDims::MAX_BOUND)
                    })
                }
            }
        };

        let too_small = || InitError::SurfaceTooSmall {
            width,
            height,
            node_size: self.node_size,
        };
        let grid_width = fit(self.grid_width, width).ok_or_else(too_small)?;
        let grid_height = fit(self.grid_height, height).ok_or_else(too_small)?;

        if grid_width < 0 || grid_height < 0 {
            return Err(InitError::NegativeGrid {
                width: grid_width,
                height: grid_height,
            });
        }

        if grid_width > GridDims::MAX_BOUND || grid_height > GridDims::MAX_BOUND {
            return Err(InitError::GridTooLarge {
                width: grid_width,
                height: grid_height,
            });
        }

        Ok(GridDims::new(grid_width, grid_height))
    }
}
