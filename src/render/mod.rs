pub mod renderer;

pub use renderer::{Renderer, CELL_COLUMNS};
