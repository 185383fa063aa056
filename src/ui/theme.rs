use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Ansi256,
    NoColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    System,
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl ThemeName {
    pub fn from_str_or_system(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "latte" => Self::Latte,
            "frappe" => Self::Frappe,
            "macchiato" => Self::Macchiato,
            "mocha" => Self::Mocha,
            _ => Self::System,
        }
    }

    fn palette(self) -> ThemePalette {
        match self {
            ThemeName::System => SYSTEM,
            ThemeName::Latte => LATTE,
            ThemeName::Frappe => FRAPPE,
            ThemeName::Macchiato => MACCHIATO,
            ThemeName::Mocha => MOCHA,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub text: (u8, u8, u8),
    pub subtext: (u8, u8, u8),
    pub base: (u8, u8, u8),
    pub accent: (u8, u8, u8),
    pub accent2: (u8, u8, u8),
    pub favorite: (u8, u8, u8),
}

// catppuccin flavours: text, subtext0, base, mauve, blue, red
const LATTE: ThemePalette = ThemePalette {
    text: (0x4c, 0x4f, 0x69),
    subtext: (0x6c, 0x6f, 0x85),
    base: (0xef, 0xf1, 0xf5),
    accent: (0x88, 0x39, 0xef),
    accent2: (0x1e, 0x66, 0xf5),
    favorite: (0xd2, 0x0f, 0x39),
};

const FRAPPE: ThemePalette = ThemePalette {
    text: (0xc6, 0xd0, 0xf5),
    subtext: (0xa5, 0xad, 0xce),
    base: (0x30, 0x34, 0x46),
    accent: (0xca, 0x9e, 0xe6),
    accent2: (0x8c, 0xaa, 0xee),
    favorite: (0xe7, 0x82, 0x84),
};

const MACCHIATO: ThemePalette = ThemePalette {
    text: (0xca, 0xd3, 0xf5),
    subtext: (0xa5, 0xad, 0xcb),
    base: (0x24, 0x27, 0x3a),
    accent: (0xc6, 0xa0, 0xf6),
    accent2: (0x8a, 0xad, 0xf4),
    favorite: (0xed, 0x87, 0x96),
};

const MOCHA: ThemePalette = ThemePalette {
    text: (0xcd, 0xd6, 0xf4),
    subtext: (0xa6, 0xad, 0xc8),
    base: (0x1e, 0x1e, 0x2e),
    accent: (0xcb, 0xa6, 0xf7),
    accent2: (0x89, 0xb4, 0xfa),
    favorite: (0xf3, 0x8b, 0xa8),
};

// only used with ColorCapability::NoColor, values are placeholders
const SYSTEM: ThemePalette = ThemePalette {
    text: (255, 255, 255),
    subtext: (192, 192, 192),
    base: (0, 0, 0),
    accent: (255, 255, 255),
    accent2: (192, 192, 192),
    favorite: (255, 0, 0),
};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub palette: ThemePalette,
    pub capability: ColorCapability,
}

impl Theme {
    pub fn load(name: &str) -> Self {
        let name = ThemeName::from_str_or_system(name);
        let capability = match name {
            ThemeName::System => ColorCapability::NoColor,
            _ => detect_color_capability(),
        };
        Self {
            palette: name.palette(),
            capability,
        }
    }

    pub fn color_text(&self) -> Color {
        map_color(self.capability, self.palette.text)
    }
    pub fn color_subtext(&self) -> Color {
        map_color(self.capability, self.palette.subtext)
    }
    pub fn color_base(&self) -> Color {
        map_color(self.capability, self.palette.base)
    }
    pub fn color_accent(&self) -> Color {
        map_color(self.capability, self.palette.accent)
    }
    pub fn color_accent2(&self) -> Color {
        map_color(self.capability, self.palette.accent2)
    }
    pub fn color_favorite(&self) -> Color {
        map_color(self.capability, self.palette.favorite)
    }
}

pub fn detect_color_capability() -> ColorCapability {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        return ColorCapability::Ansi256;
    }

    ColorCapability::NoColor
}

fn map_color(cap: ColorCapability, t: (u8, u8, u8)) -> Color {
    match cap {
        ColorCapability::TrueColor => Color::Rgb(t.0, t.1, t.2),
        ColorCapability::Ansi256 => Color::Indexed(rgb_to_ansi256(t.0, t.1, t.2)),
        ColorCapability::NoColor => Color::Reset,
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 color cube, 16..231
    let r6 = (r as u16 * 5 / 255) as u8;
    let g6 = (g as u16 * 5 / 255) as u8;
    let b6 = (b as u16 * 5 / 255) as u8;
    16 + 36 * r6 + 6 * g6 + b6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_names_fall_back_to_system() {
        assert_eq!(ThemeName::from_str_or_system("MOCHA"), ThemeName::Mocha);
        assert_eq!(ThemeName::from_str_or_system("solarized"), ThemeName::System);
    }

    #[test]
    fn system_theme_uses_terminal_colors() {
        let theme = Theme::load("system");
        assert_eq!(theme.color_text(), Color::Reset);
        assert_eq!(theme.color_favorite(), Color::Reset);
    }

    #[test]
    fn ansi_cube_mapping() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
        assert_eq!(
            map_color(ColorCapability::TrueColor, (1, 2, 3)),
            Color::Rgb(1, 2, 3)
        );
    }
}
