use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Identifier of a piece definition in the static catalog.
///
/// Serialized as the catalog key (e.g. `"tetro_t"`, `"square_3x3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceId {
    /// Single cell.
    Mono = 0,
    /// Horizontal domino.
    DominoH,
    /// Vertical domino.
    DominoV,
    /// Straight tromino.
    TrominoI,
    /// Corner tromino.
    TrominoL,
    /// 2×2 square.
    TetroO,
    TetroT,
    TetroL,
    TetroJ,
    TetroS,
    TetroZ,
    /// Straight tetromino.
    TetroI,
    /// Straight pentomino.
    PentoI,
    PentoP,
    PentoF,
    PentoL,
    PentoN,
    PentoT,
    PentoU,
    PentoV,
    PentoW,
    /// Plus sign.
    PentoX,
    PentoY,
    PentoZ,
    /// 3×3 square.
    #[serde(rename = "square_3x3")]
    Square3x3,
}

impl PieceId {
    /// Number of catalog entries.
    pub const LEN: usize = 25;

    /// All ids in catalog order.
    pub const ALL: [PieceId; Self::LEN] = {
        use PieceId::*;
        [
            Mono, DominoH, DominoV, TrominoI, TrominoL, TetroO, TetroT, TetroL, TetroJ, TetroS,
            TetroZ, TetroI, PentoI, PentoP, PentoF, PentoL, PentoN, PentoT, PentoU, PentoV, PentoW,
            PentoX, PentoY, PentoZ, Square3x3,
        ]
    };

    /// Returns the catalog entry for this id.
    #[must_use]
    pub fn definition(self) -> &'static PieceDefinition {
        &PIECE_DEFINITIONS[self as usize]
    }

    /// Returns the catalog key of this id.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxiblast_engine::PieceId;
    ///
    /// assert_eq!(PieceId::Mono.key(), "mono");
    /// assert_eq!(PieceId::Square3x3.key(), "square_3x3");
    /// ```
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            PieceId::Mono => "mono",
            PieceId::DominoH => "domino_h",
            PieceId::DominoV => "domino_v",
            PieceId::TrominoI => "tromino_i",
            PieceId::TrominoL => "tromino_l",
            PieceId::TetroO => "tetro_o",
            PieceId::TetroT => "tetro_t",
            PieceId::TetroL => "tetro_l",
            PieceId::TetroJ => "tetro_j",
            PieceId::TetroS => "tetro_s",
            PieceId::TetroZ => "tetro_z",
            PieceId::TetroI => "tetro_i",
            PieceId::PentoI => "pento_i",
            PieceId::PentoP => "pento_p",
            PieceId::PentoF => "pento_f",
            PieceId::PentoL => "pento_l",
            PieceId::PentoN => "pento_n",
            PieceId::PentoT => "pento_t",
            PieceId::PentoU => "pento_u",
            PieceId::PentoV => "pento_v",
            PieceId::PentoW => "pento_w",
            PieceId::PentoX => "pento_x",
            PieceId::PentoY => "pento_y",
            PieceId::PentoZ => "pento_z",
            PieceId::Square3x3 => "square_3x3",
        }
    }

    /// Parses an id from its catalog key.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxiblast_engine::PieceId;
    ///
    /// assert_eq!(PieceId::from_key("pento_x"), Some(PieceId::PentoX));
    /// assert_eq!(PieceId::from_key("hexomino"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Difficulty tier of a piece.
///
/// Informational only; placement and generation ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceTier {
    Easy,
    Medium,
    Hard,
}

/// Display color of a piece and of the cells it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceColor {
    Blue,
    Green,
    Cyan,
    Yellow,
    Purple,
    Orange,
    Red,
    Magenta,
    Pink,
}

impl PieceColor {
    /// Returns the single character used in board dumps.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceColor::Blue => 'b',
            PieceColor::Green => 'g',
            PieceColor::Cyan => 'c',
            PieceColor::Yellow => 'y',
            PieceColor::Purple => 'p',
            PieceColor::Orange => 'o',
            PieceColor::Red => 'r',
            PieceColor::Magenta => 'm',
            PieceColor::Pink => 'k',
        }
    }

    /// Parses a color from its board dump character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(PieceColor::Blue),
            'g' => Some(PieceColor::Green),
            'c' => Some(PieceColor::Cyan),
            'y' => Some(PieceColor::Yellow),
            'p' => Some(PieceColor::Purple),
            'o' => Some(PieceColor::Orange),
            'r' => Some(PieceColor::Red),
            'm' => Some(PieceColor::Magenta),
            'k' => Some(PieceColor::Pink),
            _ => None,
        }
    }
}

/// Immutable catalog entry describing a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    id: PieceId,
    shape: Shape,
    cell_count: u8,
    tier: PieceTier,
    weight: u32,
    color: PieceColor,
}

impl PieceDefinition {
    const fn new(
        id: PieceId,
        matrix: &[&[u8]],
        cell_count: u8,
        tier: PieceTier,
        weight: u32,
        color: PieceColor,
    ) -> Self {
        Self {
            id,
            shape: Shape::from_matrix(matrix),
            cell_count,
            tier,
            weight,
            color,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of cells the piece fills; equals `shape().cell_count()`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    #[must_use]
    pub const fn tier(&self) -> PieceTier {
        self.tier
    }

    /// Relative draw frequency (higher is more frequent).
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.color
    }
}

/// The static piece catalog, indexed by [`PieceId`].
pub static PIECE_DEFINITIONS: [PieceDefinition; PieceId::LEN] = CATALOG;

const CATALOG: [PieceDefinition; PieceId::LEN] = {
    use PieceColor::{Blue, Cyan, Green, Magenta, Orange, Pink, Purple, Red, Yellow};
    use PieceTier::{Easy, Hard, Medium};
    type D = PieceDefinition;
    [
        D::new(PieceId::Mono, &[&[1]], 1, Easy, 15, Blue),
        D::new(PieceId::DominoH, &[&[1, 1]], 2, Easy, 10, Green),
        D::new(PieceId::DominoV, &[&[1], &[1]], 2, Easy, 10, Green),
        D::new(PieceId::TrominoI, &[&[1, 1, 1]], 3, Easy, 8, Cyan),
        D::new(PieceId::TrominoL, &[&[1, 0], &[1, 1]], 3, Medium, 7, Yellow),
        D::new(PieceId::TetroO, &[&[1, 1], &[1, 1]], 4, Easy, 8, Yellow),
        D::new(PieceId::TetroT, &[&[0, 1, 0], &[1, 1, 1]], 4, Medium, 5, Purple),
        D::new(PieceId::TetroL, &[&[0, 0, 1], &[1, 1, 1]], 4, Medium, 5, Orange),
        D::new(PieceId::TetroJ, &[&[1, 0, 0], &[1, 1, 1]], 4, Medium, 5, Blue),
        D::new(PieceId::TetroS, &[&[0, 1, 1], &[1, 1, 0]], 4, Hard, 3, Red),
        D::new(PieceId::TetroZ, &[&[1, 1, 0], &[0, 1, 1]], 4, Hard, 3, Magenta),
        D::new(PieceId::TetroI, &[&[1, 1, 1, 1]], 4, Easy, 6, Cyan),
        D::new(PieceId::PentoI, &[&[1, 1, 1, 1, 1]], 5, Medium, 4, Cyan),
        D::new(PieceId::PentoP, &[&[1, 1], &[1, 1], &[1, 0]], 5, Hard, 2, Pink),
        D::new(PieceId::PentoF, &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]], 5, Hard, 2, Green),
        D::new(PieceId::PentoL, &[&[1, 0], &[1, 0], &[1, 0], &[1, 1]], 5, Medium, 3, Orange),
        D::new(PieceId::PentoN, &[&[0, 1], &[1, 1], &[1, 0], &[1, 0]], 5, Hard, 2, Red),
        D::new(PieceId::PentoT, &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]], 5, Medium, 3, Purple),
        D::new(PieceId::PentoU, &[&[1, 0, 1], &[1, 1, 1]], 5, Medium, 3, Blue),
        D::new(PieceId::PentoV, &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]], 5, Medium, 3, Yellow),
        D::new(PieceId::PentoW, &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]], 5, Hard, 2, Cyan),
        D::new(PieceId::PentoX, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], 5, Easy, 5, Magenta),
        D::new(PieceId::PentoY, &[&[0, 1], &[1, 1], &[0, 1], &[0, 1]], 5, Medium, 3, Pink),
        D::new(PieceId::PentoZ, &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1]], 5, Hard, 2, Red),
        D::new(PieceId::Square3x3, &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]], 9, Hard, 1, Red),
    ]
};

// Catalog consistency: entries in id order, positive weights, and declared
// cell counts matching their shapes.
const _: () = {
    let mut i = 0;
    while i < PieceId::LEN {
        let def = &CATALOG[i];
        assert!(def.id as usize == i);
        assert!(PieceId::ALL[i] as usize == i);
        assert!(def.weight > 0);
        assert!(def.shape.cell_count() == def.cell_count as usize);
        i += 1;
    }
};
