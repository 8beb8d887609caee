use serde::{Deserialize, Serialize};

/// Largest number of lines one placement can clear (8 rows plus 8 columns).
pub const MAX_LINES_PER_CLEAR: usize = 16;

/// Statistics for a single round.
///
/// Tracks:
///
/// - **Pieces placed** and the number of cells they filled
/// - **Turns completed** (every three placements)
/// - **Line clear distribution**: how many placements cleared 0, 1, 2, ... lines
/// - **Best streak** reached during the round
///
/// # Example
///
/// ```
/// use oxiblast_engine::RoundStats;
///
/// let mut stats = RoundStats::new();
/// stats.record_placement(5, 2);
/// stats.record_placement(1, 0);
///
/// assert_eq!(stats.pieces_placed(), 2);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoundStats {
    pieces_placed: usize,
    cells_placed: usize,
    turns_completed: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_LINES_PER_CLEAR + 1],
    best_streak: u32,
}

impl Default for RoundStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pieces_placed: 0,
            cells_placed: 0,
            turns_completed: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_LINES_PER_CLEAR + 1],
            best_streak: 1,
        }
    }

    #[must_use]
    pub const fn pieces_placed(&self) -> usize {
        self.pieces_placed
    }

    #[must_use]
    pub const fn cells_placed(&self) -> usize {
        self.cells_placed
    }

    #[must_use]
    pub const fn turns_completed(&self) -> usize {
        self.turns_completed
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of placements by number of lines they cleared.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_LINES_PER_CLEAR + 1] {
        &self.line_cleared_counter
    }

    /// Highest streak multiplier reached.
    #[must_use]
    pub const fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Records a committed placement of `cells` cells that cleared `lines` lines.
    pub const fn record_placement(&mut self, cells: usize, lines: usize) {
        self.pieces_placed += 1;
        self.cells_placed += cells;
        self.total_cleared_lines += lines;
        if lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[lines] += 1;
        }
    }

    /// Records the end of a turn with the streak that resulted from it.
    pub const fn record_turn_end(&mut self, streak: u32) {
        self.turns_completed += 1;
        if streak > self.best_streak {
            self.best_streak = streak;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_and_totals() {
        let mut stats = RoundStats::new();
        for (cells, lines) in [(4, 0), (5, 1), (1, 0), (9, 3), (3, 16)] {
            stats.record_placement(cells, lines);
        }
        assert_eq!(stats.pieces_placed(), 5);
        assert_eq!(stats.cells_placed(), 22);
        assert_eq!(stats.total_cleared_lines(), 20);
        let counter = stats.line_cleared_counter();
        assert_eq!(counter[0], 2);
        assert_eq!(counter[1], 1);
        assert_eq!(counter[3], 1);
        assert_eq!(counter[16], 1);
    }

    #[test]
    fn test_best_streak_keeps_maximum() {
        let mut stats = RoundStats::new();
        for streak in [2, 3, 1, 2] {
            stats.record_turn_end(streak);
        }
        assert_eq!(stats.turns_completed(), 4);
        assert_eq!(stats.best_streak(), 3);
    }
}
