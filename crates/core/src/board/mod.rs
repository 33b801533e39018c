//! Board model: pieces, squares and the 8x8 grid

mod grid;
mod types;

pub use grid::{Board, Simulation};
pub use types::*;
