use std::iter;

use oxiblast_engine::{BOARD_SIZE, Board, PlacementPreview};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

#[expect(clippy::cast_possible_truncation)]
const SIZE: u16 = BOARD_SIZE as u16;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    preview: Option<&'a PlacementPreview>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            preview: None,
            block: None,
        }
    }

    /// Overlays the cells a pending placement would cover.
    pub fn preview(self, preview: &'a PlacementPreview) -> Self {
        Self {
            preview: Some(preview),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        SIZE * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        SIZE * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid_cells, self.board.rows()).enumerate() {
            for (x, (grid_cell, cell)) in iter::zip(grid_row, row).enumerate() {
                let display = match self.preview {
                    Some(preview) if preview.cells.contains(&(x, y)) => {
                        CellDisplay::preview(preview.valid)
                    }
                    _ => CellDisplay::from_cell(*cell, true),
                };
                display.render(grid_cell, buf);
            }
        }
    }
}
