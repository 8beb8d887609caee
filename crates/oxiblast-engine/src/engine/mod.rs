//! Round orchestration on top of the core data structures.
//!
//! - [`PieceGenerator`] - Weighted draw of three distinct, placeable pieces
//! - [`ScoreTracker`] - Placement points, line clear bonus and streak multiplier
//! - [`HighScoreStore`] - Persistence seam for the best score
//! - [`Round`] - The round controller: placement requests, dealing, game over
//! - [`RoundEvent`] - Notifications queued for presentation layers
//! - [`RoundStats`] - Per-round statistics
//! - [`RoundSeed`] - Seed for reproducible piece sets
//!
//! # Round Flow
//!
//! 1. Create a [`Round`] with a high score store; it deals the first set
//! 2. Preview and place pieces by tray slot and grid origin
//! 3. Full rows and columns clear, score and streak update
//! 4. When all three pieces are used, a new set is dealt
//! 5. The round ends when none of the offered pieces fits anywhere
//!
//! # Example
//!
//! ```
//! use oxiblast_engine::{MemoryHighScoreStore, Round};
//!
//! let mut round = Round::new(MemoryHighScoreStore::default()).unwrap();
//!
//! while !round.is_game_over() {
//!     let Some((slot, origin)) = round.active_pieces().iter().find_map(|piece| {
//!         let origin = round.board().first_valid_origin(piece.definition().shape())?;
//!         Some((piece.slot(), origin))
//!     }) else {
//!         break;
//!     };
//!     if round.place(slot, origin).is_err() {
//!         break;
//!     }
//! #   if round.stats().pieces_placed() > 1000 { break; }
//! }
//!
//! for event in round.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub use self::{
    event::*, high_score::*, piece_generator::*, round::*, round_seed::*, round_stats::*,
    score_tracker::*,
};

mod event;
mod high_score;
mod piece_generator;
mod round;
mod round_seed;
mod round_stats;
mod score_tracker;
