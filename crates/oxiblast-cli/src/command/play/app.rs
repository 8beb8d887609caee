use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode};
use oxiblast_engine::{
    BOARD_SIZE, GridPos, HighScoreStore, PieceSetError, Round, RoundEvent, SET_SIZE,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, RenderMode, Runtime},
    ui::widgets::{KeyBindingDisplay, KeyHint, RoundDisplay},
};

const FPS: f64 = 60.0;
const MAX_LOG_LINES: usize = 8;

const PLAYING_HINTS: &[KeyHint] = &[
    KeyHint::new(&["1", "2", "3", "Tab"], "Select"),
    KeyHint::new(&["←", "→", "↑", "↓"], "Move"),
    KeyHint::new(&["Enter", "Space"], "Place"),
    KeyHint::new(&["N"], "New round"),
    KeyHint::new(&["Q"], "Quit"),
];
const GAME_OVER_HINTS: &[KeyHint] = &[
    KeyHint::new(&["N"], "New round"),
    KeyHint::new(&["Q"], "Quit"),
];

/// Interactive play: a selected tray slot, a cursor on the board and a log
/// of recent round events.
#[derive(Debug)]
pub struct PlayApp<S> {
    round: Round<S>,
    selected: usize,
    cursor: GridPos,
    log: VecDeque<String>,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: HighScoreStore,
{
    pub fn new(round: Round<S>) -> Self {
        let mut app = Self {
            round,
            selected: 0,
            cursor: GridPos::new(0, 0),
            log: VecDeque::with_capacity(MAX_LOG_LINES),
            is_exiting: false,
        };
        app.drain_events();
        app
    }

    pub fn round(&self) -> &Round<S> {
        &self.round
    }

    /// Applies a key press. Returns `false` for keys that do nothing.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let is_playing = self.round.phase().is_playing();
        match code {
            KeyCode::Char(c @ '1'..='3') if is_playing => {
                let slot = c as usize - '1' as usize;
                if self.round.active_piece(slot).is_none() {
                    return false;
                }
                self.select(slot);
            }
            KeyCode::Tab if is_playing => self.select_next(),
            KeyCode::Left if is_playing => self.move_cursor(-1, 0),
            KeyCode::Right if is_playing => self.move_cursor(1, 0),
            KeyCode::Up if is_playing => self.move_cursor(0, -1),
            KeyCode::Down if is_playing => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => self.place(),
            KeyCode::Char('n') => self.new_round(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => return false,
        }
        self.drain_events();
        true
    }

    fn select(&mut self, slot: usize) {
        self.selected = slot;
        self.round.ui_click();
        self.clamp_cursor();
    }

    /// Selects the next slot that still holds a piece, wrapping around.
    fn select_next(&mut self) {
        let next = (1..=SET_SIZE)
            .map(|offset| (self.selected + offset) % SET_SIZE)
            .find(|slot| self.round.active_piece(*slot).is_some());
        if let Some(slot) = next {
            self.select(slot);
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        self.cursor = GridPos::new(self.cursor.x + dx, self.cursor.y + dy);
        self.clamp_cursor();
    }

    /// Keeps the selected piece entirely on the board.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn clamp_cursor(&mut self) {
        let (width, height) = self
            .round
            .active_piece(self.selected)
            .map_or((1, 1), |piece| {
                let shape = piece.definition().shape();
                (shape.width(), shape.height())
            });
        let max_x = (BOARD_SIZE - width) as i32;
        let max_y = (BOARD_SIZE - height) as i32;
        self.cursor = GridPos::new(self.cursor.x.clamp(0, max_x), self.cursor.y.clamp(0, max_y));
    }

    fn place(&mut self) {
        match self.round.place(self.selected, self.cursor) {
            Ok(result) if result.accepted => {
                if self.round.active_piece(self.selected).is_none() {
                    self.select_next();
                }
                self.clamp_cursor();
            }
            Ok(_) => self.push_log("cannot place there".to_owned()),
            Err(e) => self.log_deal_failure(&e),
        }
    }

    fn new_round(&mut self) {
        if let Err(e) = self.round.new_round() {
            self.log_deal_failure(&e);
        }
        self.selected = 0;
        self.cursor = GridPos::new(0, 0);
        self.clamp_cursor();
    }

    fn log_deal_failure(&mut self, error: &PieceSetError) {
        tracing::warn!(%error, "round ended without a new piece set");
        self.push_log(format!("no pieces dealt: {error}"));
    }

    fn drain_events(&mut self) {
        for event in self.round.drain_events() {
            if let Some(line) = describe(&event) {
                self.push_log(line);
            }
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == MAX_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

fn describe(event: &RoundEvent) -> Option<String> {
    let line = match event {
        RoundEvent::PiecePlaced { piece, origin, .. } => {
            format!("{piece} at ({}, {})", origin.x, origin.y)
        }
        RoundEvent::LineCleared { .. } => "line clear!".to_owned(),
        RoundEvent::ComboCleared { lines } => format!("{lines} lines combo!"),
        RoundEvent::StreakChanged { streak } if *streak > 1 => format!("streak x{streak}"),
        RoundEvent::PieceSetGenerated { pieces } => {
            let names: Vec<_> = pieces.iter().map(ToString::to_string).collect();
            format!("new set: {}", names.join(" "))
        }
        RoundEvent::GameOver {
            score, new_record, ..
        } => {
            if *new_record {
                format!("game over: {score} (new record)")
            } else {
                format!("game over: {score}")
            }
        }
        RoundEvent::StreakChanged { .. } | RoundEvent::ScoreChanged { .. } | RoundEvent::UiClick => {
            return None;
        }
    };
    Some(line)
}

impl<S> App for PlayApp<S>
where
    S: HighScoreStore,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) -> bool {
        event
            .as_key_event()
            .is_some_and(|event| self.handle_key(event.code))
    }

    fn draw(&self, frame: &mut Frame) {
        let preview = self.round.preview_placement(self.selected, self.cursor);
        let selected = self
            .round
            .active_piece(self.selected)
            .map(|piece| piece.slot());
        let round_display = RoundDisplay::new(&self.round)
            .selected(selected)
            .preview(&preview)
            .log(&self.log);
        let hints = if self.round.is_game_over() {
            GAME_OVER_HINTS
        } else {
            PLAYING_HINTS
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(round_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(hints), help_area);
    }
}

#[cfg(test)]
mod tests {
    use oxiblast_engine::{Board, MemoryHighScoreStore, RoundSeed};

    use super::*;

    fn app() -> PlayApp<MemoryHighScoreStore> {
        let round =
            Round::with_seed(MemoryHighScoreStore::default(), RoundSeed::from_bytes([7; 16]))
                .unwrap();
        PlayApp::new(round)
    }

    #[test]
    fn test_initial_set_is_logged() {
        let app = app();
        assert_eq!(app.log.len(), 1);
        assert!(app.log[0].starts_with("new set: "));
    }

    #[test]
    fn test_slot_selection() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selected, 2);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selected, 0);
        assert!(!app.handle_key(KeyCode::Char('9')));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app();
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor, GridPos::new(0, 0));

        for _ in 0..BOARD_SIZE {
            app.handle_key(KeyCode::Right);
            app.handle_key(KeyCode::Down);
        }
        let shape = app.round.active_piece(0).unwrap().definition().shape();
        assert!(app.round.board().is_valid_placement(shape, app.cursor));
        assert_eq!(
            app.cursor,
            GridPos::new(
                i32::try_from(BOARD_SIZE - shape.width()).unwrap(),
                i32::try_from(BOARD_SIZE - shape.height()).unwrap()
            )
        );
    }

    #[test]
    fn test_place_selects_next_piece() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.round.active_pieces().len(), 2);
        assert!(app.round.active_piece(0).is_none());
        assert_eq!(app.selected, 1);
        assert!(app.round.score_snapshot().score > 0);
        assert!(app.log.iter().any(|line| line.contains(" at (0, 0)")));
    }

    #[test]
    fn test_cursor_fits_newly_dealt_piece() {
        let mut app = app();
        for slot in 0..SET_SIZE {
            assert_eq!(app.selected, slot);
            let shape = app.round.active_piece(slot).unwrap().definition().shape();
            // Push every piece as far bottom-right as it fits.
            app.cursor = app.round.board().valid_origins(shape).last().unwrap();
            assert!(app.handle_key(KeyCode::Enter));
        }
        assert_eq!(app.round.active_pieces().len(), SET_SIZE);
        assert_eq!(app.selected, SET_SIZE - 1);
        let shape = app
            .round
            .active_piece(app.selected)
            .unwrap()
            .definition()
            .shape();
        assert!(
            usize::try_from(app.cursor.x).unwrap() + shape.width() <= BOARD_SIZE
                && usize::try_from(app.cursor.y).unwrap() + shape.height() <= BOARD_SIZE
        );
    }

    #[test]
    fn test_rejected_place_is_logged() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('1')));
        assert_eq!(app.selected, 1);
        let board = app.round.board().clone();
        let shape = app.round.active_piece(1).unwrap().definition().shape();
        app.cursor = GridPos::all()
            .find(|pos| {
                Board::covered_cells(shape, *pos).len() == shape.cell_count()
                    && !board.is_valid_placement(shape, *pos)
            })
            .unwrap();
        let cells = board.filled_count();
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.round.board().filled_count(), cells);
        assert_eq!(app.log.back().map(String::as_str), Some("cannot place there"));
    }

    #[test]
    fn test_new_round_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.round.score_snapshot().score, 0);
        assert_eq!(app.round.active_pieces().len(), 3);
        assert_eq!(app.selected, 0);
        assert!(!app.should_exit());

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_log_is_bounded() {
        let mut app = app();
        for i in 0..20 {
            app.push_log(format!("line {i}"));
        }
        assert_eq!(app.log.len(), MAX_LOG_LINES);
        assert_eq!(app.log.back().map(String::as_str), Some("line 19"));
    }
}
