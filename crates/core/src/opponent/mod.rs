//! Automated opponent

mod selector;

pub use selector::{select_from, select_move, Selection, Tier};
