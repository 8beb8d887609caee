pub use self::{bit_board::*, board::*, piece::*, shape::*};

pub(crate) mod bit_board;
pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Width and height of the square play field.
pub const BOARD_SIZE: usize = 8;
