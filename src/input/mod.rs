pub mod handler;
pub mod touch;

pub use handler::{InputAction, InputHandler};
pub use touch::{Surface, TouchMapper, TouchPoint};
