use std::iter;

use oxiblast_engine::{RoundStats, ScoreSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Values shown by [`ScoreDisplay`].
#[derive(Debug, Clone)]
pub struct ScoreInfo {
    pub snapshot: ScoreSnapshot,
    pub stats: RoundStats,
}

pub struct ScoreDisplay<'a> {
    info: ScoreInfo,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(info: ScoreInfo) -> Self {
        Self { info, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        22 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&ScoreInfo) -> String),
    LabelValue(&'static str, &'static dyn Fn(&ScoreInfo) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|info| info.snapshot.score.to_string()),
    Row::LabelValue("BEST:", &|info| info.snapshot.high_score.to_string()),
    Row::LabelValue("STREAK:", &|info| format!("x{}", info.snapshot.streak)),
    Row::Empty,
    Row::LabelValue("PIECES:", &|info| info.stats.pieces_placed().to_string()),
    Row::LabelValue("TURNS:", &|info| info.stats.turns_completed().to_string()),
    Row::LabelValue("LINES:", &|info| {
        info.stats.total_cleared_lines().to_string()
    }),
    Row::LabelValue("SINGLES:", &|info| {
        info.stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("COMBOS:", &|info| {
        let combos: usize = info.stats.line_cleared_counter()[2..].iter().sum();
        combos.to_string()
    }),
    Row::LabelValue("TOP STREAK:", &|info| format!("x{}", info.stats.best_streak())),
];

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.info), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.info), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
