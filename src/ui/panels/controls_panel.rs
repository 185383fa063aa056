use crate::app::controls::ControlsView;
use crate::ui::borders::SOLID_BORDER;
use crate::ui::components::control_buttons::{self, ButtonsLayout};
use crate::ui::components::progress_bar;
use crate::ui::theme::Theme;
use crate::utils::text::ellipsize;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlsPanelLayout {
    pub inner: Rect,
    pub title: Rect,
    pub artist: Rect,
    pub buttons: ButtonsLayout,
    pub seek_bar: Rect,
    pub time_line: Rect,
}

pub fn layout(area: Rect) -> ControlsPanelLayout {
    let inner = area.inner(&Margin {
        horizontal: 2,
        vertical: 1,
    });

    let stack_h: u16 = 1 // title
        + 1 // artist
        + 1 // gap
        + 1 // buttons
        + 1 // gap
        + 1 // seek bar
        + 1; // time labels

    let top = inner.y + inner.height.saturating_sub(stack_h) / 2;
    let row = |offset: u16| {
        Rect {
            x: inner.x,
            y: top + offset,
            width: inner.width,
            height: 1,
        }
        .intersection(inner)
    };

    ControlsPanelLayout {
        inner,
        title: row(0),
        artist: row(1),
        buttons: control_buttons::layout(row(3)),
        seek_bar: row(5),
        time_line: row(6),
    }
}

/// Draws nothing when `view` is `None` (no player to control).
pub fn render(f: &mut Frame, area: Rect, theme: &Theme, view: Option<&ControlsView>) -> ControlsPanelLayout {
    let Some(view) = view else {
        return ControlsPanelLayout::default();
    };

    let b = Block::default()
        .borders(Borders::ALL)
        .border_set(SOLID_BORDER)
        .style(Style::default().fg(theme.color_subtext()));
    f.render_widget(b, area);

    let l = layout(area);
    let text_style = Style::default().fg(theme.color_text());
    let sub_style = Style::default().fg(theme.color_subtext());

    let width = l.inner.width as usize;
    f.render_widget(
        Paragraph::new(ellipsize(&view.title, width)).style(text_style.add_modifier(Modifier::BOLD)),
        l.title,
    );
    f.render_widget(
        Paragraph::new(ellipsize(&view.artist, width)).style(sub_style),
        l.artist,
    );

    control_buttons::render(f, &l.buttons, theme, view);
    progress_bar::render(f, l.seek_bar, theme, view.seek_value, view.seek_max, view.scrubbing);

    f.render_widget(
        Paragraph::new(view.elapsed_label.as_str())
            .style(text_style)
            .alignment(Alignment::Left),
        l.time_line,
    );
    if let Some(total) = view.duration_label.as_deref() {
        f.render_widget(
            Paragraph::new(total).style(text_style).alignment(Alignment::Right),
            l.time_line,
        );
    }

    l
}
