use arrayvec::ArrayVec;
use rand::Rng;

use crate::core::{
    board::Board,
    piece::{PIECE_DEFINITIONS, PieceId},
};

/// Number of pieces offered per set.
pub const SET_SIZE: usize = 3;

/// Upper bound on pool draws spent building a single set.
pub const MAX_DRAWS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceSetError {
    #[display("only {placeable} distinct pieces fit on the board, a set needs 3")]
    NotEnoughPlaceable { placeable: usize },
    #[display("no complete piece set after 10000 draws")]
    DrawLimitExceeded,
}

/// Weighted piece set generator.
///
/// Holds a draw pool in which every catalog id appears as many times as its
/// weight, so a uniform draw from the pool is a weighted draw over the
/// catalog. A set is built by drawing repeatedly and keeping a draw only if
/// the id is not in the set yet and its shape fits somewhere on the board.
///
/// Each accepted piece is placeable on its own; the set as a whole is not
/// guaranteed to fit simultaneously.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{Board, PieceGenerator, RoundSeed};
///
/// let generator = PieceGenerator::new();
/// let mut rng = RoundSeed::from_bytes([7; 16]).rng();
///
/// let set = generator.generate(&Board::new(), &mut rng).unwrap();
/// assert_eq!(set.len(), 3);
/// assert!(set[0] != set[1] && set[1] != set[2] && set[0] != set[2]);
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    pool: Vec<PieceId>,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator over the full catalog.
    #[must_use]
    pub fn new() -> Self {
        let pool = PIECE_DEFINITIONS
            .iter()
            .flat_map(|def| std::iter::repeat_n(def.id(), def.weight() as usize))
            .collect();
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn from_pool(pool: Vec<PieceId>) -> Self {
        Self { pool }
    }

    /// The weighted draw pool.
    #[must_use]
    pub fn pool(&self) -> &[PieceId] {
        &self.pool
    }

    /// Draws a set of three distinct pieces, each placeable on `board`.
    ///
    /// Placeability is decided once per distinct id before drawing. Fails
    /// without consuming randomness if fewer than three distinct ids fit, and
    /// fails after [`MAX_DRAWS`] draws if the set is still incomplete.
    pub fn generate<R>(
        &self,
        board: &Board,
        rng: &mut R,
    ) -> Result<ArrayVec<PieceId, SET_SIZE>, PieceSetError>
    where
        R: Rng + ?Sized,
    {
        let mut in_pool = [false; PieceId::LEN];
        for &id in &self.pool {
            in_pool[id as usize] = true;
        }
        let placeable = PieceId::ALL
            .map(|id| in_pool[id as usize] && board.can_place(id.definition().shape()));
        let placeable_count = placeable.iter().filter(|p| **p).count();
        if placeable_count < SET_SIZE {
            return Err(PieceSetError::NotEnoughPlaceable {
                placeable: placeable_count,
            });
        }

        let mut set = ArrayVec::<PieceId, SET_SIZE>::new();
        for draws in 1..=MAX_DRAWS {
            let id = self.pool[rng.random_range(0..self.pool.len())];
            if !placeable[id as usize] || set.contains(&id) {
                continue;
            }
            set.push(id);
            if set.is_full() {
                tracing::debug!(?set, draws, "generated piece set");
                return Ok(set);
            }
        }
        Err(PieceSetError::DrawLimitExceeded)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::RoundSeed;

    const SEED: RoundSeed = RoundSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_pool_repeats_each_id_by_weight() {
        let generator = PieceGenerator::new();
        assert_eq!(generator.pool().len(), 120);
        let mut counts: HashMap<PieceId, u32> = HashMap::new();
        for id in generator.pool() {
            *counts.entry(*id).or_default() += 1;
        }
        for def in &PIECE_DEFINITIONS {
            assert_eq!(counts[&def.id()], def.weight(), "{}", def.id());
        }
    }

    #[test]
    fn test_sets_are_distinct_and_placeable() {
        let generator = PieceGenerator::new();
        let mut rng = SEED.rng();
        let board = Board::from_ascii([
            "####....", "####....", "####....", "####....", "........", "........", "........",
            "........",
        ]);
        for _ in 0..200 {
            let set = generator.generate(&board, &mut rng).unwrap();
            assert_eq!(set.len(), SET_SIZE);
            for (i, id) in set.iter().enumerate() {
                assert!(board.can_place(id.definition().shape()), "{id}");
                assert!(!set[i + 1..].contains(id), "duplicate {id}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_sets() {
        let generator = PieceGenerator::new();
        let board = Board::new();
        let mut a = SEED.rng();
        let mut b = SEED.rng();
        for _ in 0..20 {
            assert_eq!(
                generator.generate(&board, &mut a).unwrap(),
                generator.generate(&board, &mut b).unwrap(),
            );
        }
    }

    #[test]
    fn test_heavier_pieces_are_drawn_more_often() {
        let generator = PieceGenerator::new();
        let board = Board::new();
        let mut rng = SEED.rng();
        let mut counts: HashMap<PieceId, u32> = HashMap::new();
        for _ in 0..2000 {
            for id in generator.generate(&board, &mut rng).unwrap() {
                *counts.entry(id).or_default() += 1;
            }
        }
        let mono = counts.get(&PieceId::Mono).copied().unwrap_or(0);
        let square = counts.get(&PieceId::Square3x3).copied().unwrap_or(0);
        assert!(mono > square * 3, "mono={mono} square={square}");
    }

    #[test]
    fn test_exactly_three_placeable_pieces() {
        // Only a horizontal gap of three cells remains.
        let board = Board::from_ascii([
            "...#####", "########", "########", "########", "########", "########", "########",
            "########",
        ]);
        let generator = PieceGenerator::new();
        let mut rng = SEED.rng();
        let mut set = generator.generate(&board, &mut rng).unwrap();
        set.sort();
        assert_eq!(
            set.as_slice(),
            &[PieceId::Mono, PieceId::DominoH, PieceId::TrominoI]
        );
    }

    #[test]
    fn test_not_enough_placeable_pieces() {
        let mut rows = ["########"; 8];
        rows[4] = "###.####";
        let board = Board::from_ascii(rows);
        let generator = PieceGenerator::new();
        let err = generator.generate(&board, &mut SEED.rng()).unwrap_err();
        assert_eq!(err, PieceSetError::NotEnoughPlaceable { placeable: 1 });

        let full = Board::from_ascii(["########"; 8]);
        let err = generator.generate(&full, &mut SEED.rng()).unwrap_err();
        assert_eq!(err, PieceSetError::NotEnoughPlaceable { placeable: 0 });
    }

    #[test]
    fn test_draw_limit() {
        let mut pool = vec![PieceId::Mono; 10_000_000];
        pool.extend([PieceId::DominoH, PieceId::DominoV]);
        let generator = PieceGenerator::from_pool(pool);
        let err = generator
            .generate(&Board::new(), &mut SEED.rng())
            .unwrap_err();
        assert_eq!(err, PieceSetError::DrawLimitExceeded);
    }
}
