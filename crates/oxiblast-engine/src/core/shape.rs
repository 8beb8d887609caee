/// Maximum width and height of a shape's bounding box.
pub const MAX_SHAPE_SIZE: usize = 5;

/// Occupancy pattern of a piece relative to its bounding box.
///
/// Each row is stored as a bitmask where bit `x` marks an occupied cell at
/// column `x`. The top-left corner of the bounding box is the placement
/// origin.
///
/// Shapes are built from a 0/1 matrix in a `const` context, so malformed
/// catalog entries (ragged rows, empty shapes, oversized boxes) are rejected
/// at compile time.
///
/// # Example
///
/// ```
/// use oxiblast_engine::Shape;
///
/// const L: Shape = Shape::from_matrix(&[&[1, 0], &[1, 1]]);
/// assert_eq!(L.width(), 2);
/// assert_eq!(L.height(), 2);
/// assert_eq!(L.cell_count(), 3);
/// assert!(!L.is_occupied(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: [u8; MAX_SHAPE_SIZE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Builds a shape from a rectangular 0/1 matrix (`matrix[y][x]`).
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, larger than [`MAX_SHAPE_SIZE`] in either
    /// direction, ragged, contains values other than 0 and 1, or has no
    /// occupied cell. In a `const` item this becomes a compile error.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_matrix(matrix: &[&[u8]]) -> Self {
        let height = matrix.len();
        assert!(height > 0, "shape must have at least one row");
        assert!(height <= MAX_SHAPE_SIZE, "shape is too tall");
        let width = matrix[0].len();
        assert!(width > 0, "shape must have at least one column");
        assert!(width <= MAX_SHAPE_SIZE, "shape is too wide");

        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut occupied = 0;
        let mut y = 0;
        while y < height {
            assert!(matrix[y].len() == width, "shape rows must have equal length");
            let mut x = 0;
            while x < width {
                match matrix[y][x] {
                    0 => {}
                    1 => {
                        rows[y] |= 1 << x;
                        occupied += 1;
                    }
                    _ => panic!("shape cells must be 0 or 1"),
                }
                x += 1;
            }
            y += 1;
        }
        assert!(occupied > 0, "shape must occupy at least one cell");

        Self {
            rows,
            width: width as u8,
            height: height as u8,
        }
    }

    /// Width of the bounding box.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Height of the bounding box.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of occupied cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        let mut count = 0;
        let mut y = 0;
        while y < MAX_SHAPE_SIZE {
            count += self.rows[y].count_ones() as usize;
            y += 1;
        }
        count
    }

    /// Returns the row bitmask at `y` (bit `x` set when `(x, y)` is occupied).
    #[must_use]
    pub const fn row_bits(&self, y: usize) -> u8 {
        self.rows[y]
    }

    /// Returns whether `(x, y)` within the bounding box is occupied.
    ///
    /// Coordinates outside the bounding box are reported as unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && (self.rows[y] >> x) & 1 != 0
    }

    /// Returns an iterator of occupied `(dx, dy)` offsets in row-major order.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |dy| {
            (0..self.width()).filter_map(move |dx| self.is_occupied(dx, dy).then_some((dx, dy)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matrix_dimensions() {
        let shape = Shape::from_matrix(&[&[0, 1, 1], &[1, 1, 0]]);
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 2);
        assert_eq!(shape.cell_count(), 4);
        assert_eq!(shape.row_bits(0), 0b110);
        assert_eq!(shape.row_bits(1), 0b011);
    }

    #[test]
    fn test_occupied_offsets_row_major() {
        let shape = Shape::from_matrix(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]);
        let offsets: Vec<_> = shape.occupied_offsets().collect();
        assert_eq!(offsets, vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_is_occupied_outside_bounding_box() {
        let shape = Shape::from_matrix(&[&[1]]);
        assert!(shape.is_occupied(0, 0));
        assert!(!shape.is_occupied(1, 0));
        assert!(!shape.is_occupied(0, 1));
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_ragged_rows_rejected() {
        let _ = Shape::from_matrix(&[&[1, 1], &[1]]);
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_empty_shape_rejected() {
        let _ = Shape::from_matrix(&[&[0, 0], &[0, 0]]);
    }
}
