use serde::{Deserialize, Serialize};

use crate::core::{board::GridPos, piece::PieceId};

/// Notification produced by a [`Round`](super::Round) for presentation layers.
///
/// Events are queued while a round operation runs and handed out by
/// [`Round::drain_events`](super::Round::drain_events). The engine never
/// depends on whether anyone consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    /// A piece was committed to the board.
    PiecePlaced { piece: PieceId, origin: GridPos, cells: usize },
    /// Exactly one line was cleared.
    LineCleared { lines: usize },
    /// Two or more lines were cleared by one placement.
    ComboCleared { lines: usize },
    ScoreChanged { score: u64, high_score: u64 },
    /// A turn ended and the streak was re-evaluated.
    StreakChanged { streak: u32 },
    /// A fresh set of pieces was dealt.
    PieceSetGenerated { pieces: Vec<PieceId> },
    GameOver {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
    /// Presentation-originated click feedback.
    UiClick,
}

impl RoundEvent {
    /// Line clear event matching the number of cleared lines, if any.
    #[must_use]
    pub fn for_lines(lines: usize) -> Option<Self> {
        match lines {
            0 => None,
            1 => Some(Self::LineCleared { lines }),
            _ => Some(Self::ComboCleared { lines }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_events_by_count() {
        assert_eq!(RoundEvent::for_lines(0), None);
        assert_eq!(
            RoundEvent::for_lines(1),
            Some(RoundEvent::LineCleared { lines: 1 })
        );
        assert_eq!(
            RoundEvent::for_lines(3),
            Some(RoundEvent::ComboCleared { lines: 3 })
        );
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&RoundEvent::StreakChanged { streak: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"streak_changed","streak":2}"#);
        let json = serde_json::to_string(&RoundEvent::UiClick).unwrap();
        assert_eq!(json, r#"{"type":"ui_click"}"#);
    }
}
