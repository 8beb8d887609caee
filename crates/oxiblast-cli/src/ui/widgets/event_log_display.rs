use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Most recent round events, newest at the bottom.
#[derive(Debug)]
pub struct EventLogDisplay<'a> {
    lines: &'a VecDeque<String>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> EventLogDisplay<'a> {
    pub fn new(lines: &'a VecDeque<String>) -> Self {
        Self { lines, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for EventLogDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let visible = usize::from(area.height);
        let skip = self.lines.len().saturating_sub(visible);
        let text: Text = self
            .lines
            .iter()
            .skip(skip)
            .map(|line| Line::styled(line.as_str(), style::DIM))
            .collect();
        text.render(area, buf);
    }
}
