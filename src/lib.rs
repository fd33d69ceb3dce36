//! Grid Snake - a tick-driven snake on a wrapping grid
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - A fixed-rate driver that serializes ticks and input (game_loop module)
//! - Touch and keyboard input mapping (input module)
//! - TUI rendering (render module) and the interactive session (modes module)

pub mod error;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::InitError;
pub use game_loop::GameLoop;
