use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlayPause,
    Prev,
    Next,
    ToggleLike,

    /// Keyboard seek, played through the same drag path as the mouse.
    SeekBy(i64),

    /// Press on the seek bar, resolved by hit testing.
    SeekPress { col: u16 },

    MouseDown { col: u16, row: u16 },
    MouseDrag { col: u16 },
    MouseUp,

    None,
}

pub fn map_key(ev: KeyEvent, seek_step_ms: u64) -> Action {
    let step = i64::try_from(seek_step_ms).unwrap_or(i64::MAX);

    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::None,
        };
    }

    match ev.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePlayPause,
        KeyCode::Left => Action::Prev,
        KeyCode::Right => Action::Next,
        KeyCode::Char('l') | KeyCode::Char('L') => Action::ToggleLike,
        KeyCode::Char(',') => Action::SeekBy(-step),
        KeyCode::Char('.') => Action::SeekBy(step),
        _ => Action::None,
    }
}

pub fn map_mouse(ev: MouseEvent) -> Action {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseDown {
            col: ev.column,
            row: ev.row,
        },
        MouseEventKind::Drag(MouseButton::Left) => Action::MouseDrag { col: ev.column },
        MouseEventKind::Up(MouseButton::Left) => Action::MouseUp,
        _ => Action::None,
    }
}
