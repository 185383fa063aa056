pub mod borders;
pub mod theme;
pub mod tui;

pub mod components {
    pub mod control_buttons;
    pub mod progress_bar;
}

pub mod panels {
    pub mod controls_panel;
}
