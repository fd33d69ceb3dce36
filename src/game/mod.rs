//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end and the tests drive it through the same `GridModel` API.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Role};
pub use config::GameConfig;
pub use engine::{GridModel, StepOutcome};
pub use state::{GridDims, Position, Segment, Snake, Snapshot};
