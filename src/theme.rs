use ratatui::style::Color;

/// Colour roles used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub main: Color,
    pub sub: Color,
    pub text: Color,
    pub error: Color,
    pub error_extra: Color,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    #[default]
    SerikaDark,
    Dracula,
    Cyberpunk,
    Light,
    Nord,
    Monokai,
    Gruvbox,
    SolarizedDark,
    TokyoNight,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Theme {
    pub const ALL: [Theme; 9] = [
        Theme::SerikaDark,
        Theme::Dracula,
        Theme::Cyberpunk,
        Theme::Light,
        Theme::Nord,
        Theme::Monokai,
        Theme::Gruvbox,
        Theme::SolarizedDark,
        Theme::TokyoNight,
    ];

    /// Parse the stored id (`serika_dark`, `tokyo_night`, ...).
    pub fn from_id(id: &str) -> Option<Theme> {
        Self::ALL.into_iter().find(|t| t.to_string() == id)
    }

    pub fn next(&self) -> Theme {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn palette(&self) -> Palette {
        let [bg, main, sub, text, error, error_extra] = match self {
            Theme::SerikaDark => [0x323437, 0xe2b714, 0x646669, 0xd1d0c5, 0xca4754, 0x7e2a33],
            Theme::Dracula => [0x282a36, 0xbd93f9, 0x6272a4, 0xf8f8f2, 0xff5555, 0x8b0000],
            Theme::Cyberpunk => [0x000b1e, 0x00f3ff, 0x005f73, 0xe0e0e0, 0xff0055, 0x990033],
            Theme::Light => [0xfafafa, 0x0077ff, 0x999999, 0x333333, 0xff3333, 0xcc0000],
            Theme::Nord => [0x2e3440, 0x88c0d0, 0x4c566a, 0xd8dee9, 0xbf616a, 0x8b3a3f],
            Theme::Monokai => [0x272822, 0xa6e22e, 0x75715e, 0xf8f8f2, 0xf92672, 0xa01a47],
            Theme::Gruvbox => [0x282828, 0xfabd2f, 0x504945, 0xebdbb2, 0xfb4934, 0x9d0006],
            Theme::SolarizedDark => [0x002b36, 0xb58900, 0x586e75, 0x839496, 0xdc322f, 0x8b1a1a],
            Theme::TokyoNight => [0x1a1b26, 0x7aa2f7, 0x565f89, 0xc0caf5, 0xf7768e, 0x9d3a4a],
        };
        Palette {
            bg: rgb(bg),
            main: rgb(main),
            sub: rgb(sub),
            text: rgb(text),
            error: rgb(error),
            error_extra: rgb(error_extra),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_ids_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_id(&theme.to_string()), Some(theme));
        }
        assert_eq!(Theme::SolarizedDark.to_string(), "solarized_dark");
        assert_eq!(Theme::from_id("neon"), None);
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(Theme::SerikaDark.next(), Theme::Dracula);
        assert_eq!(Theme::TokyoNight.next(), Theme::SerikaDark);
    }

    #[test]
    fn test_palette_hex_decoding() {
        let p = Theme::SerikaDark.palette();
        assert_eq!(p.main, Color::Rgb(0xe2, 0xb7, 0x14));
        assert_eq!(p.bg, Color::Rgb(0x32, 0x34, 0x37));
    }
}
