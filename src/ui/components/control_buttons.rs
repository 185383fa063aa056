use crate::app::controls::{ControlsView, PlayGlyph};
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const PREV: &str = "[⏮]";
const PLAY: &str = "[▶]";
const PAUSE: &str = "[⏸]";
const NEXT: &str = "[⏭]";
const LIKED: &str = "♥";
const NOT_LIKED: &str = "♡";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonsLayout {
    pub prev: Rect,
    pub play: Rect,
    pub next: Rect,
    pub like: Rect,
}

/// Transport buttons packed to the left, the heart pinned to the right.
pub fn layout(area: Rect) -> ButtonsLayout {
    let w = [PREV, PLAY, PAUSE, NEXT]
        .iter()
        .map(|s| s.width() as u16)
        .max()
        .unwrap_or(3);
    let like_w = LIKED.width().max(NOT_LIKED.width()) as u16;

    let cell = |x: u16, width: u16| {
        Rect {
            x,
            y: area.y,
            width,
            height: 1,
        }
        .intersection(area)
    };

    ButtonsLayout {
        prev: cell(area.x, w),
        play: cell(area.x + w + 1, w),
        next: cell(area.x + 2 * (w + 1), w),
        like: cell(area.x + area.width.saturating_sub(like_w), like_w),
    }
}

pub fn render(f: &mut Frame, l: &ButtonsLayout, theme: &Theme, view: &ControlsView) {
    let text = Style::default().fg(theme.color_text());
    let play = match view.play_glyph {
        PlayGlyph::Pause => PAUSE,
        PlayGlyph::Play => PLAY,
    };

    f.render_widget(Paragraph::new(PREV).style(text), l.prev);
    f.render_widget(
        Paragraph::new(play).style(text.add_modifier(Modifier::BOLD)),
        l.play,
    );
    f.render_widget(Paragraph::new(NEXT).style(text), l.next);

    let heart = if view.liked { LIKED } else { NOT_LIKED };
    f.render_widget(
        Paragraph::new(heart).style(Style::default().fg(theme.color_favorite())),
        l.like,
    );
}
