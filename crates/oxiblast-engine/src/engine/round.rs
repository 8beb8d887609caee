use arrayvec::ArrayVec;
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::core::{
    board::{Board, GridPos},
    piece::{PieceDefinition, PieceId},
    shape::MAX_SHAPE_SIZE,
};

use super::{
    RoundEvent, RoundSeed, RoundStats, ScoreSnapshot, ScoreTracker,
    high_score::HighScoreStore,
    piece_generator::{PieceGenerator, PieceSetError, SET_SIZE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Playing,
    GameOver,
}

/// A piece offered to the player, identified by its tray slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    definition: &'static PieceDefinition,
    slot: usize,
}

impl ActivePiece {
    #[must_use]
    pub fn id(&self) -> PieceId {
        self.definition.id()
    }

    #[must_use]
    pub const fn definition(&self) -> &'static PieceDefinition {
        self.definition
    }

    /// Tray position (0 to 2) the piece was dealt into.
    ///
    /// Slots are stable: placing a piece does not shift the others.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }
}

/// Outcome of a hypothetical placement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementPreview {
    pub valid: bool,
    /// On-board cells the piece would cover, whether or not they are free.
    pub cells: ArrayVec<(usize, usize), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>,
}

/// Outcome of [`Round::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PlacementResult {
    pub accepted: bool,
    pub lines_cleared: usize,
    pub score_delta: u64,
    /// Streak multiplier after the placement.
    pub streak: u32,
    pub game_over: bool,
}

impl PlacementResult {
    /// A refused placement: nothing changed.
    #[must_use]
    pub const fn rejected(streak: u32, game_over: bool) -> Self {
        Self {
            accepted: false,
            lines_cleared: 0,
            score_delta: 0,
            streak,
            game_over,
        }
    }
}

/// A round of play: the board, the offered pieces, the score and the events
/// waiting to be consumed.
///
/// All mutation goes through [`Round::place`] and [`Round::new_round`]. After
/// every successful placement and every new set of pieces, the round checks
/// whether any offered piece still fits; if none does, the round is over and
/// the high score is committed to the store.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{GridPos, MemoryHighScoreStore, Round, RoundSeed};
///
/// let seed = RoundSeed::from_bytes([1; 16]);
/// let mut round = Round::with_seed(MemoryHighScoreStore::default(), seed).unwrap();
/// assert_eq!(round.active_pieces().len(), 3);
///
/// let piece = round.active_pieces()[0];
/// let origin = round.board().first_valid_origin(piece.definition().shape()).unwrap();
/// let result = round.place(piece.slot(), origin).unwrap();
///
/// assert!(result.accepted);
/// assert_eq!(round.score_snapshot().score, result.score_delta);
/// assert_eq!(round.active_pieces().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Round<S> {
    store: S,
    board: Board,
    active: ArrayVec<ActivePiece, SET_SIZE>,
    tracker: ScoreTracker,
    stats: RoundStats,
    phase: RoundPhase,
    new_record: bool,
    generator: PieceGenerator,
    seed: RoundSeed,
    rng: Pcg32,
    events: Vec<RoundEvent>,
}

impl<S> Round<S>
where
    S: HighScoreStore,
{
    /// Starts a round with a random seed.
    pub fn new(store: S) -> Result<Self, PieceSetError> {
        Self::with_seed(store, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible piece sets.
    pub fn with_seed(store: S, seed: RoundSeed) -> Result<Self, PieceSetError> {
        let tracker = ScoreTracker::new(&store);
        let mut round = Self {
            store,
            board: Board::new(),
            active: ArrayVec::new(),
            tracker,
            stats: RoundStats::new(),
            phase: RoundPhase::Playing,
            new_record: false,
            generator: PieceGenerator::new(),
            seed,
            rng: seed.rng(),
            events: Vec::new(),
        };
        round.deal()?;
        Ok(round)
    }

    /// Clears the board, score, streak and statistics and deals a new set.
    ///
    /// The high score and the random stream carry over.
    pub fn new_round(&mut self) -> Result<(), PieceSetError> {
        self.board = Board::new();
        self.active.clear();
        self.tracker.reset();
        self.stats = RoundStats::new();
        self.phase = RoundPhase::Playing;
        self.new_record = false;
        self.push_score_changed();
        self.events.push(RoundEvent::StreakChanged {
            streak: self.tracker.streak(),
        });
        self.deal()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces still available this turn, in slot order.
    #[must_use]
    pub fn active_pieces(&self) -> &[ActivePiece] {
        &self.active
    }

    /// Returns the active piece in `slot`, if it has not been placed yet.
    #[must_use]
    pub fn active_piece(&self, slot: usize) -> Option<&ActivePiece> {
        self.active.iter().find(|piece| piece.slot == slot)
    }

    #[must_use]
    pub const fn score_snapshot(&self) -> ScoreSnapshot {
        self.tracker.snapshot()
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// Whether the finished round set a new high score.
    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub const fn stats(&self) -> &RoundStats {
        &self.stats
    }

    /// Seed the round's random stream was created from.
    #[must_use]
    pub const fn seed(&self) -> RoundSeed {
        self.seed
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Takes every event queued since the previous call.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queues a [`RoundEvent::UiClick`] on behalf of the presentation layer.
    pub fn ui_click(&mut self) {
        self.events.push(RoundEvent::UiClick);
    }

    /// Describes what placing the piece in `slot` at `origin` would cover.
    ///
    /// Never mutates the round. An inactive slot gives an invalid, empty
    /// preview.
    #[must_use]
    pub fn preview_placement(&self, slot: usize, origin: GridPos) -> PlacementPreview {
        let Some(piece) = self.active_piece(slot) else {
            return PlacementPreview::default();
        };
        let shape = piece.definition.shape();
        PlacementPreview {
            valid: self.phase.is_playing() && self.board.is_valid_placement(shape, origin),
            cells: Board::covered_cells(shape, origin),
        }
    }

    /// Places the piece in `slot` with its top-left corner at `origin`.
    ///
    /// Placements after game over, for a slot that holds no piece, or at an
    /// invalid origin are refused and leave the round untouched.
    ///
    /// An accepted placement commits the piece, clears full lines, updates
    /// score and streak, deals a new set once all three pieces are used, and
    /// checks whether the round is over.
    ///
    /// # Errors
    ///
    /// Returns an error if a new set of pieces cannot be dealt. The round is
    /// over at that point and the high score has been committed.
    pub fn place(&mut self, slot: usize, origin: GridPos) -> Result<PlacementResult, PieceSetError> {
        let rejected = PlacementResult::rejected(self.tracker.streak(), self.is_game_over());
        if self.phase.is_game_over() {
            tracing::trace!(slot, "placement refused: round is over");
            return Ok(rejected);
        }
        let Some(index) = self.active.iter().position(|piece| piece.slot == slot) else {
            tracing::trace!(slot, "placement refused: slot is empty");
            return Ok(rejected);
        };
        let definition = self.active[index].definition;
        if !self.board.is_valid_placement(definition.shape(), origin) {
            tracing::trace!(slot, ?origin, piece = %definition.id(), "placement refused: invalid origin");
            return Ok(rejected);
        }

        self.board.commit(definition.shape(), origin, definition.color());
        self.active.remove(index);
        self.events.push(RoundEvent::PiecePlaced {
            piece: definition.id(),
            origin,
            cells: definition.cell_count(),
        });

        let mut score_delta = self.tracker.on_piece_placed(definition.cell_count());
        let lines_cleared = self.board.clear_full_lines().count();
        score_delta += self.tracker.on_lines_cleared(lines_cleared);
        self.events.extend(RoundEvent::for_lines(lines_cleared));
        self.push_score_changed();
        tracing::debug!(
            piece = %definition.id(),
            ?origin,
            lines_cleared,
            score_delta,
            "piece placed"
        );

        self.stats.record_placement(definition.cell_count(), lines_cleared);
        if self.tracker.on_turn_end(self.stats.pieces_placed()) {
            let streak = self.tracker.streak();
            self.stats.record_turn_end(streak);
            self.events.push(RoundEvent::StreakChanged { streak });
        }

        if self.active.is_empty() {
            self.deal()?;
        } else {
            self.check_terminal();
        }

        Ok(PlacementResult {
            accepted: true,
            lines_cleared,
            score_delta,
            streak: self.tracker.streak(),
            game_over: self.is_game_over(),
        })
    }

    fn deal(&mut self) -> Result<(), PieceSetError> {
        let ids = match self.generator.generate(&self.board, &mut self.rng) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deal a piece set");
                self.finish();
                return Err(e);
            }
        };
        self.active = ids
            .iter()
            .enumerate()
            .map(|(slot, id)| ActivePiece {
                definition: id.definition(),
                slot,
            })
            .collect();
        self.events.push(RoundEvent::PieceSetGenerated {
            pieces: ids.to_vec(),
        });
        self.check_terminal();
        Ok(())
    }

    fn check_terminal(&mut self) {
        let any_fits = self
            .active
            .iter()
            .any(|piece| self.board.can_place(piece.definition.shape()));
        if !any_fits {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = RoundPhase::GameOver;
        self.new_record = self.tracker.check_and_commit_high_score(&mut self.store);
        let ScoreSnapshot {
            score, high_score, ..
        } = self.tracker.snapshot();
        tracing::info!(score, high_score, new_record = self.new_record, "round over");
        self.events.push(RoundEvent::GameOver {
            score,
            high_score,
            new_record: self.new_record,
        });
    }

    fn push_score_changed(&mut self) {
        let snapshot = self.tracker.snapshot();
        self.events.push(RoundEvent::ScoreChanged {
            score: snapshot.score,
            high_score: snapshot.high_score,
        });
    }
}
