use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, event_log_display::*, key_binding_display::*,
    piece_display::*, round_display::*, score_display::*, tray_display::*,
};

mod board_display;
mod cell_display;
mod event_log_display;
mod key_binding_display;
mod piece_display;
mod round_display;
mod score_display;
mod tray_display;

mod color {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(66, 135, 245);
    pub const GREEN: Color = Color::Rgb(76, 217, 100);
    pub const CYAN: Color = Color::Rgb(0, 220, 230);
    pub const YELLOW: Color = Color::Rgb(255, 214, 10);
    pub const PURPLE: Color = Color::Rgb(160, 90, 240);
    pub const ORANGE: Color = Color::Rgb(255, 149, 0);
    pub const RED: Color = Color::Rgb(255, 59, 48);
    pub const MAGENTA: Color = Color::Rgb(255, 45, 200);
    pub const PINK: Color = Color::Rgb(255, 150, 190);
    pub const PREVIEW_VALID: Color = Color::Rgb(0, 160, 60);
    pub const PREVIEW_INVALID: Color = Color::Rgb(190, 30, 30);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use oxiblast_engine::PieceColor;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const PREVIEW_VALID: Style = fg_bg(color::WHITE, color::PREVIEW_VALID);
    pub const PREVIEW_INVALID: Style = fg_bg(color::WHITE, color::PREVIEW_INVALID);
    pub const HIGHLIGHT: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const fn piece(piece_color: PieceColor) -> Style {
        bg_only(match piece_color {
            PieceColor::Blue => color::BLUE,
            PieceColor::Green => color::GREEN,
            PieceColor::Cyan => color::CYAN,
            PieceColor::Yellow => color::YELLOW,
            PieceColor::Purple => color::PURPLE,
            PieceColor::Orange => color::ORANGE,
            PieceColor::Red => color::RED,
            PieceColor::Magenta => color::MAGENTA,
            PieceColor::Pink => color::PINK,
        })
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
