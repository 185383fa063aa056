use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

pub fn render(f: &mut Frame, area: Rect, theme: &Theme, pos: Duration, dur: Option<Duration>, scrubbing: bool) {
    let w = area.width as usize;
    if w == 0 {
        return;
    }

    // knob moves on [0, w-1]
    let knob = knob_cell(w, pos, dur);

    let left = "─".repeat(knob);
    let right = "─".repeat(w.saturating_sub(1 + knob));
    let knob_glyph = if scrubbing { "●" } else { "○" };

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.color_accent2())),
        Span::styled(knob_glyph, Style::default().fg(theme.color_accent())),
        Span::styled(right, Style::default().fg(theme.color_subtext())),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn knob_cell(w: usize, pos: Duration, dur: Option<Duration>) -> usize {
    if w <= 1 {
        return 0;
    }
    let ratio = match dur {
        Some(d) if !d.is_zero() => (pos.as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0),
        _ => 0.0,
    };
    (ratio * (w as f32 - 1.0)).round() as usize
}

/// Convert a horizontal drag of `cols` cells on a bar `width` cells wide into
/// a time delta. Zero when the duration is unknown.
pub fn drag_delta_ms(cols: i32, width: u16, dur: Option<Duration>) -> i64 {
    let Some(d) = dur else {
        return 0;
    };
    if width <= 1 {
        return 0;
    }
    let per_cell = d.as_millis() as f64 / (width - 1) as f64;
    (cols as f64 * per_cell).round() as i64
}
