pub mod board;
pub mod search;

pub use board::{Board, BoardError, Move};
pub use search::{manhattan, solve};
