//! Rules engine for an 8×8 block placement puzzle.
//!
//! Pieces are dealt three at a time and dropped anywhere they fit. Full rows
//! and columns clear, placements and clears score points, and a streak
//! multiplier grows while every turn of three placements clears something.
//! The round ends when none of the offered pieces fits on the board.
//!
//! - [`core`] - Board, shapes and the piece catalog
//! - [`engine`] - Piece generation, scoring and the round controller

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
