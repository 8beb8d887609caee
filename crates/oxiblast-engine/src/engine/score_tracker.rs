use serde::{Deserialize, Serialize};

use super::high_score::{self, HighScoreStore};

/// Base points for clearing lines simultaneously.
///
/// Index is the number of lines cleared by one placement:
/// - 1 line: 10 points
/// - 2 lines: 30 points
/// - 3 lines: 60 points
/// - 4 lines: 100 points
/// - 5 lines: 150 points
/// - 6 lines: 250 points
///
/// Larger clears (up to 16 lines) fall outside the table and award nothing.
pub const COMBO_TABLE: [u64; 7] = [0, 10, 30, 60, 100, 150, 250];

/// Number of placements that make up one turn.
pub const PIECES_PER_TURN: usize = 3;

/// Base points for clearing `lines` lines at once.
#[must_use]
pub fn combo_points(lines: usize) -> u64 {
    COMBO_TABLE.get(lines).copied().unwrap_or(0)
}

/// Point-in-time view of the score display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ScoreSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub streak: u32,
}

/// Score and streak bookkeeping for a round.
///
/// Every placed cell is worth one point. Line clears add
/// [`COMBO_TABLE`] points multiplied by the streak. The streak is evaluated
/// once per turn of three placements: it grows by one if any line was cleared
/// during the turn and falls back to 1 otherwise.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{MemoryHighScoreStore, ScoreTracker};
///
/// let mut tracker = ScoreTracker::new(&MemoryHighScoreStore::default());
/// assert_eq!(tracker.on_piece_placed(4), 4);
/// assert_eq!(tracker.on_lines_cleared(1), 10);
/// assert_eq!(tracker.score(), 14);
///
/// tracker.on_turn_end(1);
/// tracker.on_turn_end(2);
/// assert!(tracker.on_turn_end(3));
/// assert_eq!(tracker.streak(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    streak: u32,
    line_cleared_this_turn: bool,
    high_score: u64,
}

impl ScoreTracker {
    /// Creates a tracker, loading the high score from `store`.
    #[must_use]
    pub fn new<S>(store: &S) -> Self
    where
        S: HighScoreStore + ?Sized,
    {
        Self::with_high_score(high_score::load_or_zero(store))
    }

    #[must_use]
    pub const fn with_high_score(high_score: u64) -> Self {
        Self {
            score: 0,
            streak: 1,
            line_cleared_this_turn: false,
            high_score,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Current streak multiplier (always at least 1).
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub const fn line_cleared_this_turn(&self) -> bool {
        self.line_cleared_this_turn
    }

    #[must_use]
    pub const fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            high_score: self.high_score,
            streak: self.streak,
        }
    }

    /// Awards one point per placed cell and returns the points added.
    pub fn on_piece_placed(&mut self, cell_count: usize) -> u64 {
        let delta = cell_count as u64;
        self.score += delta;
        delta
    }

    /// Awards the line clear bonus and returns the points added.
    ///
    /// Clearing zero lines changes nothing.
    pub fn on_lines_cleared(&mut self, lines: usize) -> u64 {
        if lines == 0 {
            return 0;
        }
        let delta = combo_points(lines) * u64::from(self.streak);
        self.score += delta;
        self.line_cleared_this_turn = true;
        delta
    }

    /// Evaluates the streak if `pieces_placed_total` closes a turn.
    ///
    /// Returns whether a turn boundary was reached. Counts that are not a
    /// positive multiple of [`PIECES_PER_TURN`] leave the tracker untouched.
    pub fn on_turn_end(&mut self, pieces_placed_total: usize) -> bool {
        if pieces_placed_total == 0 || pieces_placed_total % PIECES_PER_TURN != 0 {
            return false;
        }
        if self.line_cleared_this_turn {
            self.streak += 1;
        } else {
            self.streak = 1;
        }
        self.line_cleared_this_turn = false;
        true
    }

    /// Records the score as the new high score if it strictly beats it.
    ///
    /// Returns `true` and persists the value to `store` when the record was
    /// beaten. Otherwise nothing changes.
    pub fn check_and_commit_high_score<S>(&mut self, store: &mut S) -> bool
    where
        S: HighScoreStore + ?Sized,
    {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        high_score::save_or_warn(store, self.high_score);
        true
    }

    /// Starts a new round: score 0, streak 1. The high score is kept.
    pub const fn reset(&mut self) {
        self.score = 0;
        self.streak = 1;
        self.line_cleared_this_turn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryHighScoreStore, engine::high_score::tests::FailingStore};

    #[test]
    fn test_combo_table_lookup() {
        assert_eq!(combo_points(0), 0);
        assert_eq!(combo_points(1), 10);
        assert_eq!(combo_points(6), 250);
        assert_eq!(combo_points(7), 0);
        assert_eq!(combo_points(16), 0);
    }

    #[test]
    fn test_score_accumulation_example() {
        let mut tracker = ScoreTracker::with_high_score(0);
        assert_eq!(tracker.on_piece_placed(4), 4);
        assert_eq!(tracker.score(), 4);
        assert_eq!(tracker.on_lines_cleared(1), 10);
        assert_eq!(tracker.score(), 14);

        assert!(!tracker.on_turn_end(1));
        assert!(!tracker.on_turn_end(2));
        assert_eq!(tracker.streak(), 1);
        assert!(tracker.on_turn_end(3));
        assert_eq!(tracker.streak(), 2);
        assert!(!tracker.line_cleared_this_turn());
    }

    #[test]
    fn test_streak_multiplies_line_bonus() {
        let mut tracker = ScoreTracker::with_high_score(0);
        for turn in 1..=3 {
            tracker.on_lines_cleared(2);
            assert!(tracker.on_turn_end(turn * PIECES_PER_TURN));
        }
        assert_eq!(tracker.streak(), 4);
        assert_eq!(tracker.score(), 30 + 60 + 90);
        assert_eq!(tracker.on_lines_cleared(3), 240);
    }

    #[test]
    fn test_streak_resets_after_clearless_turn() {
        let mut tracker = ScoreTracker::with_high_score(0);
        for turn in 1..=4 {
            tracker.on_lines_cleared(1);
            tracker.on_turn_end(turn * PIECES_PER_TURN);
        }
        assert_eq!(tracker.streak(), 5);
        tracker.on_piece_placed(3);
        assert!(tracker.on_turn_end(15));
        assert_eq!(tracker.streak(), 1);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let mut tracker = ScoreTracker::with_high_score(0);
        assert_eq!(tracker.on_lines_cleared(0), 0);
        assert_eq!(tracker.score(), 0);
        assert!(!tracker.line_cleared_this_turn());
    }

    #[test]
    fn test_high_score_monotonic() {
        let mut store = MemoryHighScoreStore::new(20);
        let mut tracker = ScoreTracker::new(&store);
        assert_eq!(tracker.high_score(), 20);

        tracker.on_piece_placed(20);
        assert!(!tracker.check_and_commit_high_score(&mut store));
        assert_eq!(tracker.high_score(), 20);

        tracker.on_piece_placed(1);
        assert!(tracker.check_and_commit_high_score(&mut store));
        assert_eq!(tracker.high_score(), 21);
        assert_eq!(store.value(), 21);

        tracker.reset();
        assert_eq!(tracker.snapshot(), ScoreSnapshot {
            score: 0,
            high_score: 21,
            streak: 1,
        });
        tracker.on_piece_placed(5);
        assert!(!tracker.check_and_commit_high_score(&mut store));
        assert_eq!(store.value(), 21);
    }

    #[test]
    fn test_failing_store_does_not_block_scoring() {
        let mut store = FailingStore::default();
        let mut tracker = ScoreTracker::new(&store);
        assert_eq!(tracker.high_score(), 0);
        tracker.on_piece_placed(3);
        assert!(tracker.check_and_commit_high_score(&mut store));
        assert_eq!(tracker.high_score(), 3);
        assert_eq!(store.writes, 1);
    }
}
