use crate::app::state::AppState;
use crate::ui::panels::controls_panel::{self, ControlsPanelLayout};
use crate::utils::input::Action;
use anyhow::Result;
use crossterm::execute;
use crossterm::{event, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};

const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 11;
const FOOTER: &str = "Space play/pause  \u{2190}/\u{2192} prev/next  l like  ,/. seek  q quit";

#[derive(Debug, Default, Clone, Copy)]
pub struct UiLayout {
    pub full: Rect,
    pub controls: ControlsPanelLayout,
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn enter(&mut self) -> Result<()> {
        execute!(io::stdout(), terminal::EnterAlternateScreen, event::EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), event::DisableMouseCapture, terminal::LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn draw(&mut self, app: &AppState) -> Result<UiLayout> {
        let mut layout_out = UiLayout::default();

        self.terminal.draw(|f| {
            let size = f.size();
            layout_out.full = size;

            f.render_widget(Clear, size);
            let mut base_style = Style::default().fg(app.theme.color_text());
            if !app.config.transparent_background {
                base_style = base_style.bg(app.theme.color_base());
            }
            f.render_widget(Block::default().style(base_style), size);

            if size.width < 24 || size.height < PANEL_HEIGHT {
                f.render_widget(
                    Paragraph::new("Terminal too small").style(Style::default().fg(app.theme.color_subtext())),
                    size,
                );
                return;
            }

            let panel = centered_rect(size, PANEL_WIDTH, PANEL_HEIGHT);
            let view = app.controls.as_ref().map(|c| c.view());
            layout_out.controls = controls_panel::render(f, panel, &app.theme, view.as_ref());

            if view.is_none() {
                if let Some(notice) = app.notice.as_deref() {
                    f.render_widget(
                        Paragraph::new(notice)
                            .style(Style::default().fg(app.theme.color_subtext()))
                            .alignment(Alignment::Center),
                        Rect {
                            y: panel.y + panel.height / 2,
                            height: 1,
                            ..panel
                        },
                    );
                }
            }

            // footer hint
            let footer_area = Rect {
                x: size.x,
                y: size.y + size.height.saturating_sub(1),
                width: size.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(FOOTER).style(Style::default().fg(app.theme.color_subtext())),
                footer_area,
            );

            // toast
            if let Some((msg, _)) = &app.toast {
                let area = Rect {
                    x: size.x,
                    y: size.y,
                    width: size.width,
                    height: 1,
                };
                f.render_widget(
                    Paragraph::new(msg.as_str()).style(Style::default().fg(app.theme.color_favorite())),
                    area,
                );
            }
        })?;

        Ok(layout_out)
    }
}

fn centered_rect(size: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(size.width);
    let h = height.min(size.height);
    Rect {
        x: size.x + (size.width.saturating_sub(w)) / 2,
        y: size.y + (size.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn hit_test(layout: &UiLayout, col: u16, row: u16) -> Option<Action> {
    let c = &layout.controls;
    if contains(c.buttons.prev, col, row) {
        return Some(Action::Prev);
    }
    if contains(c.buttons.play, col, row) {
        return Some(Action::TogglePlayPause);
    }
    if contains(c.buttons.next, col, row) {
        return Some(Action::Next);
    }
    if contains(c.buttons.like, col, row) {
        return Some(Action::ToggleLike);
    }
    if contains(c.seek_bar, col, row) {
        return Some(Action::SeekPress { col });
    }
    None
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> UiLayout {
        let full = Rect::new(0, 0, 80, 24);
        UiLayout {
            full,
            controls: controls_panel::layout(centered_rect(full, PANEL_WIDTH, PANEL_HEIGHT)),
        }
    }

    #[test]
    fn clicks_land_on_buttons() {
        let l = layout();
        let b = l.controls.buttons;
        assert_eq!(hit_test(&l, b.prev.x, b.prev.y), Some(Action::Prev));
        assert_eq!(hit_test(&l, b.play.x + 1, b.play.y), Some(Action::TogglePlayPause));
        assert_eq!(hit_test(&l, b.next.x, b.next.y), Some(Action::Next));
        assert_eq!(hit_test(&l, b.like.x, b.like.y), Some(Action::ToggleLike));
    }

    #[test]
    fn press_on_seek_bar_reports_column() {
        let l = layout();
        let bar = l.controls.seek_bar;
        assert_eq!(
            hit_test(&l, bar.x + 5, bar.y),
            Some(Action::SeekPress { col: bar.x + 5 })
        );
    }

    #[test]
    fn clicks_outside_do_nothing() {
        let l = layout();
        assert_eq!(hit_test(&l, 0, 0), None);
        assert_eq!(hit_test(&UiLayout::default(), 3, 3), None);
    }

    #[test]
    fn centered_rect_fits_small_screens() {
        let r = centered_rect(Rect::new(0, 0, 30, 11), PANEL_WIDTH, PANEL_HEIGHT);
        assert_eq!(r, Rect::new(0, 0, 30, 11));
    }
}
