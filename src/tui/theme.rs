//! Dark and light color sets.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub alert: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        background: Color::Rgb(0x1e, 0x1f, 0x26),
        foreground: Color::Rgb(0xe3, 0xe4, 0xea),
        muted: Color::Rgb(0x8a, 0x8d, 0x9a),
        accent: Color::Rgb(0x6c, 0xb6, 0xff),
        border: Color::Rgb(0x44, 0x47, 0x55),
        highlight_bg: Color::Rgb(0x2f, 0x3b, 0x55),
        alert: Color::Rgb(0xff, 0x7a, 0x6b),
    };

    pub const LIGHT: Theme = Theme {
        background: Color::Rgb(0xfa, 0xfa, 0xf7),
        foreground: Color::Rgb(0x22, 0x24, 0x2b),
        muted: Color::Rgb(0x6b, 0x6e, 0x7a),
        accent: Color::Rgb(0x1a, 0x5f, 0xb4),
        border: Color::Rgb(0xc4, 0xc6, 0xcf),
        highlight_bg: Color::Rgb(0xd9, 0xe6, 0xf7),
        alert: Color::Rgb(0xb3, 0x26, 0x1e),
    };

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }

    /// Default text on the background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.base().fg(self.accent)
        } else {
            self.base().fg(self.border)
        }
    }

    pub fn title(&self, focused: bool) -> Style {
        let style = self.border(focused);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn dim(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}
