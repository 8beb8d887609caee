use oxiblast_engine::{ActivePiece, PieceDefinition, SET_SIZE};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use crate::ui::widgets::{PieceDisplay, style};

/// The three tray slots. Placed pieces leave their slot empty.
#[derive(Debug)]
pub struct TrayDisplay {
    slots: [Option<&'static PieceDefinition>; SET_SIZE],
    selected: Option<usize>,
    border_style: Style,
}

impl TrayDisplay {
    pub fn new(pieces: &[ActivePiece]) -> Self {
        let mut slots = [None; SET_SIZE];
        for piece in pieces {
            if let Some(slot) = slots.get_mut(piece.slot()) {
                *slot = Some(piece.definition());
            }
        }
        Self {
            slots,
            selected: None,
            border_style: style::DEFAULT,
        }
    }

    pub fn selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    pub fn border_style(self, border_style: Style) -> Self {
        Self {
            border_style,
            ..self
        }
    }

    fn slot_display(&self, slot: usize) -> PieceDisplay<'static> {
        let border_style = if self.selected == Some(slot) {
            style::HIGHLIGHT
        } else {
            self.border_style
        };
        let display = PieceDisplay::new().block(
            BlockWidget::bordered()
                .title(Line::from(format!(" {} ", slot + 1)).centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        match self.slots[slot] {
            Some(piece) => display.piece(piece),
            None => display,
        }
    }

    pub fn height(&self) -> u16 {
        self.slot_display(0).height()
    }
}

impl Widget for TrayDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrayDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slot_width = self.slot_display(0).width();
        let areas = Layout::horizontal([Constraint::Length(slot_width); SET_SIZE])
            .flex(Flex::Center)
            .spacing(1)
            .split(area);
        for (slot, slot_area) in areas.iter().enumerate() {
            self.slot_display(slot).render(*slot_area, buf);
        }
    }
}
