//! Move generation, legality filtering and check detection

mod check;
mod legality;
mod movegen;

pub use check::{game_outcome, is_checkmate, is_king_in_check, is_stalemate, Outcome};
pub use legality::{all_legal_moves, filter_legal, has_legal_move, legal_moves};
pub use movegen::pseudo_legal_moves;
