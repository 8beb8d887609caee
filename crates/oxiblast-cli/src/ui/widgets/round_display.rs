use std::collections::VecDeque;

use oxiblast_engine::{HighScoreStore, PlacementPreview, Round};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, EventLogDisplay, ScoreDisplay, ScoreInfo, TrayDisplay, color, style,
};

const LOG_WIDTH: u16 = 28;

/// Whole play screen for one round: score panel, board, event log and tray.
#[derive(Debug)]
pub struct RoundDisplay<'a, S> {
    round: &'a Round<S>,
    selected: Option<usize>,
    preview: Option<&'a PlacementPreview>,
    log: Option<&'a VecDeque<String>>,
}

impl<'a, S> RoundDisplay<'a, S>
where
    S: HighScoreStore,
{
    pub fn new(round: &'a Round<S>) -> Self {
        Self {
            round,
            selected: None,
            preview: None,
            log: None,
        }
    }

    pub fn selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    pub fn preview(self, preview: &'a PlacementPreview) -> Self {
        Self {
            preview: Some(preview),
            ..self
        }
    }

    pub fn log(self, log: &'a VecDeque<String>) -> Self {
        Self {
            log: Some(log),
            ..self
        }
    }
}

impl<S> Widget for RoundDisplay<'_, S>
where
    S: HighScoreStore,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl<S> Widget for &RoundDisplay<'_, S>
where
    S: HighScoreStore,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::horizontal(1);
        let is_game_over = self.round.is_game_over();
        let border_style = Style::new().fg(if is_game_over {
            color::RED
        } else {
            color::WHITE
        });

        let board = {
            let widget = BoardDisplay::new(self.round.board()).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match self.preview {
                Some(preview) if !is_game_over => widget.preview(preview),
                _ => widget,
            }
        };
        let score = ScoreDisplay::new(ScoreInfo {
            snapshot: self.round.score_snapshot(),
            stats: self.round.stats().clone(),
        })
        .block(
            Block::bordered()
                .title(Line::from("SCORE").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let tray = TrayDisplay::new(self.round.active_pieces())
            .selected(self.selected)
            .border_style(border_style);

        let [top_area, tray_area] = Layout::vertical([
            Constraint::Length(u16::max(board.height(), score.height())),
            Constraint::Length(tray.height()),
        ])
        .spacing(1)
        .areas(area);

        let [score_area, board_area, log_area] = Layout::horizontal([
            Constraint::Length(score.width()),
            Constraint::Length(board.width()),
            Constraint::Length(LOG_WIDTH),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(top_area);
        let [score_area] =
            Layout::vertical([Constraint::Length(score.height())]).areas(score_area);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_area);

        let board_width = board.width();
        score.render(score_area, buf);
        board.render(board_area, buf);
        if let Some(log) = self.log {
            EventLogDisplay::new(log)
                .block(
                    Block::bordered()
                        .title(Line::from("LOG").centered())
                        .border_style(border_style)
                        .style(style::DEFAULT),
                )
                .render(log_area, buf);
        }
        tray.render(tray_area, buf);

        if is_game_over {
            let mut lines = vec![
                Line::from("GAME OVER"),
                Line::from(format!("SCORE {}", self.round.score_snapshot().score)),
            ];
            if self.round.is_new_record() {
                lines.push(Line::from("NEW RECORD!"));
            }
            let text_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::from(lines).style(style::GAME_OVER).centered();
            let area = board_area.centered(
                Constraint::Length(board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(
                inner.centered_vertically(Constraint::Length(text_height)),
                buf,
            );
        }
    }
}
