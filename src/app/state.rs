use crate::app::controls::Controls;
use crate::data::config::Config;
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekDrag {
    pub last_col: u16,
    /// A bare click never starts a scrub; the first motion does.
    pub started: bool,
}

pub struct AppState {
    pub config: Config,
    pub theme: Theme,

    /// Present while a track is loaded in a working player.
    pub controls: Option<Controls>,

    /// Shown in place of the panel when there is nothing to control.
    pub notice: Option<String>,
    pub toast: Option<(String, Instant)>,

    /// Set while the mouse is held after a press on the seek bar.
    pub drag: Option<SeekDrag>,

    pub should_quit: bool,
    pub last_frame: Instant,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            config,
            theme,
            controls: None,
            notice: None,
            toast: None,
            drag: None,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    pub fn set_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    pub fn tick(&mut self, now: Instant) {
        self.last_frame = now;

        if let Some((_, at)) = &self.toast {
            if now.duration_since(*at) > TOAST_TTL {
                self.toast = None;
            }
        }
    }
}
