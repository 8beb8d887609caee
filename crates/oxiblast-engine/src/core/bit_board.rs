use super::{BOARD_SIZE, board::GridPos, shape::Shape};

/// Bits of row 0.
const ROW_MASK: u64 = 0xFF;
/// Bits of column 0.
const COL_MASK: u64 = 0x0101_0101_0101_0101;

const _: () = assert!(BOARD_SIZE * BOARD_SIZE == u64::BITS as usize);

/// Occupancy of the 8×8 board packed into a single `u64`.
///
/// Bit `y * 8 + x` is set when cell `(x, y)` is filled. Placement tests and
/// full-line detection reduce to a few mask operations, which keeps the
/// whole-board scans done by the piece generator and the terminal check
/// cheap.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{BitBoard, GridPos, PieceId};
///
/// let board = BitBoard::EMPTY;
/// let shape = PieceId::Square3x3.definition().shape();
///
/// let mask = BitBoard::shape_mask(shape, GridPos::new(5, 5)).unwrap();
/// assert!(board.fits(mask));
/// assert!(BitBoard::shape_mask(shape, GridPos::new(6, 0)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BitBoard(u64);

impl BitBoard {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(u64::MAX);

    const fn bit(x: usize, y: usize) -> u64 {
        1 << (y * BOARD_SIZE + x)
    }

    #[must_use]
    pub const fn is_occupied(self, x: usize, y: usize) -> bool {
        self.0 & Self::bit(x, y) != 0
    }

    pub const fn set(&mut self, x: usize, y: usize) {
        self.0 |= Self::bit(x, y);
    }

    pub const fn unset(&mut self, x: usize, y: usize) {
        self.0 &= !Self::bit(x, y);
    }

    /// Number of filled cells.
    #[must_use]
    pub const fn count_filled(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the board mask covered by `shape` placed at `origin`, or `None`
    /// if any occupied cell of the shape would fall outside the board.
    ///
    /// Only occupied cells are bounds-checked, so empty corners of a shape's
    /// bounding box may hang over the edge.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn shape_mask(shape: &Shape, origin: GridPos) -> Option<u64> {
        let size = BOARD_SIZE as i32;
        if origin.x <= -size || origin.x >= size {
            return None;
        }
        let mut mask = 0;
        for dy in 0..shape.height() {
            let row = u16::from(shape.row_bits(dy));
            if row == 0 {
                continue;
            }
            let y = origin.y.checked_add(dy as i32)?;
            if !(0..size).contains(&y) {
                return None;
            }
            let shifted = if origin.x < 0 {
                let shift = (-origin.x) as u32;
                if row & ((1 << shift) - 1) != 0 {
                    return None;
                }
                row >> shift
            } else {
                row << origin.x as u32
            };
            if shifted > ROW_MASK as u16 {
                return None;
            }
            mask |= u64::from(shifted) << (y as usize * BOARD_SIZE);
        }
        Some(mask)
    }

    /// Returns whether every cell of `mask` is empty.
    #[must_use]
    pub const fn fits(self, mask: u64) -> bool {
        self.0 & mask == 0
    }

    /// Returns whether `shape` can be placed at `origin`.
    #[must_use]
    pub fn can_place_at(self, shape: &Shape, origin: GridPos) -> bool {
        Self::shape_mask(shape, origin).is_some_and(|mask| self.fits(mask))
    }

    /// Returns whether `shape` has at least one valid origin on the board.
    #[must_use]
    pub fn can_place(self, shape: &Shape) -> bool {
        GridPos::all().any(|origin| self.can_place_at(shape, origin))
    }

    /// Marks every cell of `mask` as filled.
    pub const fn fill(&mut self, mask: u64) {
        self.0 |= mask;
    }

    /// Bitmask of full rows (bit `y` set when row `y` is full).
    #[must_use]
    pub const fn full_rows(self) -> u8 {
        let mut rows = 0;
        let mut y = 0;
        while y < BOARD_SIZE {
            if (self.0 >> (y * BOARD_SIZE)) & ROW_MASK == ROW_MASK {
                rows |= 1 << y;
            }
            y += 1;
        }
        rows
    }

    /// Bitmask of full columns (bit `x` set when column `x` is full).
    #[must_use]
    pub const fn full_cols(self) -> u8 {
        let mut cols = 0;
        let mut x = 0;
        while x < BOARD_SIZE {
            if (self.0 >> x) & COL_MASK == COL_MASK {
                cols |= 1 << x;
            }
            x += 1;
        }
        cols
    }

    /// Mask of every cell belonging to the given rows or columns.
    #[must_use]
    pub const fn lines_mask(rows: u8, cols: u8) -> u64 {
        let mut mask = 0;
        let mut i = 0;
        while i < BOARD_SIZE {
            if rows & (1 << i) != 0 {
                mask |= ROW_MASK << (i * BOARD_SIZE);
            }
            if cols & (1 << i) != 0 {
                mask |= COL_MASK << i;
            }
            i += 1;
        }
        mask
    }

    /// Empties every cell of `mask`.
    pub const fn clear(&mut self, mask: u64) {
        self.0 &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceId;

    #[test]
    fn test_shape_mask_rejects_overflowing_rows() {
        let shape = Shape::from_matrix(&[&[0, 0], &[1, 1]]);
        assert_eq!(BitBoard::shape_mask(&shape, GridPos::new(0, i32::MAX)), None);
        assert_eq!(BitBoard::shape_mask(&shape, GridPos::new(0, -1)), Some(0b11));
    }

    #[test]
    fn test_shape_mask_in_bounds() {
        let shape = PieceId::TetroO.definition().shape();
        let mask = BitBoard::shape_mask(shape, GridPos::new(0, 0)).unwrap();
        assert_eq!(mask, 0b11 | (0b11 << 8));

        let mask = BitBoard::shape_mask(shape, GridPos::new(6, 6)).unwrap();
        assert_eq!(mask, (0b11 << (6 * 8 + 6)) | (0b11 << (7 * 8 + 6)));
    }

    #[test]
    fn test_shape_mask_out_of_bounds() {
        let shape = PieceId::TetroO.definition().shape();
        assert!(BitBoard::shape_mask(shape, GridPos::new(7, 0)).is_none());
        assert!(BitBoard::shape_mask(shape, GridPos::new(0, 7)).is_none());
        assert!(BitBoard::shape_mask(shape, GridPos::new(-1, 0)).is_none());
        assert!(BitBoard::shape_mask(shape, GridPos::new(0, -1)).is_none());
        assert!(BitBoard::shape_mask(shape, GridPos::new(100, 0)).is_none());
        assert!(BitBoard::shape_mask(shape, GridPos::new(-100, 0)).is_none());
    }

    #[test]
    fn test_shape_mask_ignores_empty_bounding_box_cells() {
        // Column 0 of this shape is empty, so it may hang off the left edge.
        let shape = Shape::from_matrix(&[&[0, 1], &[0, 1]]);
        let mask = BitBoard::shape_mask(&shape, GridPos::new(-1, 0)).unwrap();
        assert_eq!(mask, 1 | (1 << 8));
    }

    #[test]
    fn test_full_rows_and_cols() {
        let mut board = BitBoard::EMPTY;
        board.fill(BitBoard::lines_mask(0b0010_0100, 0b0000_1000));
        assert_eq!(board.full_rows(), 0b0010_0100);
        assert_eq!(board.full_cols(), 0b0000_1000);
        assert_eq!(board.count_filled(), 8 + 8 + 8 - 2);
    }

    #[test]
    fn test_full_board() {
        assert_eq!(BitBoard::FULL.full_rows(), 0xFF);
        assert_eq!(BitBoard::FULL.full_cols(), 0xFF);
        assert_eq!(BitBoard::EMPTY.full_rows(), 0);
        assert_eq!(BitBoard::EMPTY.full_cols(), 0);
    }

    #[test]
    fn test_can_place_on_nearly_full_board() {
        let mut board = BitBoard::FULL;
        board.unset(3, 4);
        assert!(board.can_place(PieceId::Mono.definition().shape()));
        assert!(!board.can_place(PieceId::DominoH.definition().shape()));
        assert!(board.can_place_at(PieceId::Mono.definition().shape(), GridPos::new(3, 4)));
        assert!(!board.can_place_at(PieceId::Mono.definition().shape(), GridPos::new(4, 3)));
    }
}
