use oxiblast_engine::Cell;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board or piece cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Cell::Empty => Self::new(style::EMPTY, ""),
            Cell::Filled(color) => Self::new(style::piece(color), ""),
        }
    }

    /// Ghost cell of a placement preview.
    pub const fn preview(valid: bool) -> Self {
        if valid {
            Self::new(style::PREVIEW_VALID, "[]")
        } else {
            Self::new(style::PREVIEW_INVALID, "><")
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
