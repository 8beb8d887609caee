use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_SIZE,
    bit_board::BitBoard,
    piece::PieceColor,
    shape::{MAX_SHAPE_SIZE, Shape},
};

/// Grid coordinate of a placement origin or a board cell.
///
/// `x` grows rightward (columns) and `y` downward (rows). Values are signed
/// so that callers can pass pointer-derived coordinates that fall off the
/// board; such positions simply never yield a valid placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Iterates over every on-board position in row-major order.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn all() -> impl Iterator<Item = GridPos> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| GridPos::new(x as i32, y as i32)))
    }

    /// Returns the position as board indices if it lies on the board.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn to_cell(self) -> Option<(usize, usize)> {
        let size = BOARD_SIZE as i32;
        ((0..size).contains(&self.x) && (0..size).contains(&self.y))
            .then(|| (self.x as usize, self.y as usize))
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Rows and columns removed by one [`Board::clear_full_lines`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    rows: u8,
    cols: u8,
}

impl LineClear {
    /// Number of cleared lines (full rows plus full columns).
    ///
    /// A cell at the crossing of a cleared row and a cleared column counts
    /// toward both lines, so this is a line count, not a cell count.
    #[must_use]
    pub const fn count(self) -> usize {
        (self.rows.count_ones() + self.cols.count_ones()) as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 && self.cols == 0
    }

    /// Indices of the cleared rows, ascending.
    pub fn rows(self) -> impl Iterator<Item = usize> {
        (0..BOARD_SIZE).filter(move |y| self.rows & (1 << y) != 0)
    }

    /// Indices of the cleared columns, ascending.
    pub fn cols(self) -> impl Iterator<Item = usize> {
        (0..BOARD_SIZE).filter(move |x| self.cols & (1 << x) != 0)
    }

    /// Returns whether cell `(x, y)` was part of a cleared line.
    #[must_use]
    pub const fn contains(self, x: usize, y: usize) -> bool {
        self.rows & (1 << y) != 0 || self.cols & (1 << x) != 0
    }

    /// Number of distinct cells emptied by this clear.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        BitBoard::lines_mask(self.rows, self.cols).count_ones() as usize
    }
}

/// The 8×8 play field.
///
/// Stores the color of every cell for rendering alongside a [`BitBoard`]
/// mirror used for placement tests and line detection. Both are updated
/// together by [`Board::commit`] and [`Board::clear_full_lines`], the only
/// mutating operations.
///
/// There is no gravity: clearing a line empties its cells in place and
/// nothing else moves.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{Board, GridPos, PieceId};
///
/// let mut board = Board::new();
/// let piece = PieceId::PentoI.definition();
/// let origin = GridPos::new(0, 0);
///
/// assert!(board.is_valid_placement(piece.shape(), origin));
/// board.commit(piece.shape(), origin, piece.color());
/// assert!(!board.is_valid_placement(piece.shape(), origin));
/// assert_eq!(board.clear_full_lines().count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    occupancy: BitBoard,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            occupancy: BitBoard::EMPTY,
        }
    }

    /// Occupancy bitmask of the board.
    #[must_use]
    pub const fn occupancy(&self) -> BitBoard {
        self.occupancy
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.occupancy.count_filled()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupancy == BitBoard::EMPTY
    }

    /// Returns whether `shape` may be placed with its bounding box's top-left
    /// corner at `origin`.
    ///
    /// Every occupied cell of the shape must land inside the board and on an
    /// empty cell.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &Shape, origin: GridPos) -> bool {
        self.occupancy.can_place_at(shape, origin)
    }

    /// Returns whether `shape` has a valid origin anywhere on the board.
    #[must_use]
    pub fn can_place(&self, shape: &Shape) -> bool {
        self.occupancy.can_place(shape)
    }

    /// Returns the first valid origin for `shape` in row-major order.
    #[must_use]
    pub fn first_valid_origin(&self, shape: &Shape) -> Option<GridPos> {
        GridPos::all().find(|origin| self.is_valid_placement(shape, *origin))
    }

    /// Returns every valid origin for `shape` in row-major order.
    pub fn valid_origins<'a>(&'a self, shape: &'a Shape) -> impl Iterator<Item = GridPos> + 'a {
        GridPos::all().filter(move |origin| self.is_valid_placement(shape, *origin))
    }

    /// Returns the on-board cells that `shape` would cover at `origin`.
    ///
    /// Cells falling outside the board are omitted; occupancy is not checked.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn covered_cells(
        shape: &Shape,
        origin: GridPos,
    ) -> ArrayVec<(usize, usize), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> {
        shape
            .occupied_offsets()
            .filter_map(|(dx, dy)| {
                let x = origin.x.checked_add(dx as i32)?;
                let y = origin.y.checked_add(dy as i32)?;
                GridPos::new(x, y).to_cell()
            })
            .collect()
    }

    /// Fills the cells covered by `shape` at `origin` with `color`.
    ///
    /// The placement must have been checked with
    /// [`is_valid_placement`](Self::is_valid_placement) first.
    ///
    /// # Panics
    ///
    /// Panics if any occupied cell of the shape falls outside the board.
    /// Overlapping a filled cell is caught by a debug assertion only.
    pub fn commit(&mut self, shape: &Shape, origin: GridPos, color: PieceColor) {
        debug_assert!(
            self.is_valid_placement(shape, origin),
            "commit called with an invalid placement at {origin:?}",
        );
        let Some(mask) = BitBoard::shape_mask(shape, origin) else {
            panic!("shape placed out of bounds at {origin:?}");
        };
        self.occupancy.fill(mask);
        for (x, y) in Self::covered_cells(shape, origin) {
            self.cells[y][x] = Cell::Filled(color);
        }
    }

    /// Clears every full row and every full column found in a single scan.
    ///
    /// Rows and columns are detected before anything is removed, so a cell
    /// shared by a full row and a full column is emptied once while both
    /// lines are counted.
    pub fn clear_full_lines(&mut self) -> LineClear {
        let clear = LineClear {
            rows: self.occupancy.full_rows(),
            cols: self.occupancy.full_cols(),
        };
        if clear.is_empty() {
            return clear;
        }
        self.occupancy
            .clear(BitBoard::lines_mask(clear.rows, clear.cols));
        for (y, row) in self.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if clear.contains(x, y) {
                    *cell = Cell::Empty;
                }
            }
        }
        clear
    }

    /// Builds a board from an ASCII picture, one string per row.
    ///
    /// `.` is an empty cell; a color character (see
    /// [`PieceColor::as_char`]) fills the cell with that color, and any other
    /// character fills it with blue.
    ///
    /// # Panics
    ///
    /// Panics if a row is not exactly 8 characters long.
    #[must_use]
    pub fn from_ascii(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), BOARD_SIZE, "row {y} must have {BOARD_SIZE} cells");
            for (x, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let color = PieceColor::from_char(c).unwrap_or(PieceColor::Blue);
                board.cells[y][x] = Cell::Filled(color);
                board.occupancy.set(x, y);
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(color) => color.as_char(),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
