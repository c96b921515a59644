use ratatui::style::{Color, Modifier, Style};

use crate::models::Parity;

/// Palette for the showcase. Everything is expressed as RGB so opacity
/// ramps can blend toward the background instead of snapping.
pub struct Theme {
    pub root_bg: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub even_accent: Color,
    pub odd_accent: Color,

    // Specific components
    pub card_border: Style,
    pub card_title: Style,
    pub card_ordinal: Style,
    pub card_image: Style,
    pub nav_item: Style,
    pub nav_active: Style,
    pub dial_track: Style,
    pub dial_needle: Style,
    pub dial_value: Style,
    pub side_title: Style,
    pub footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let text = Color::Rgb(220, 220, 225);
        let secondary = Color::Rgb(140, 140, 150);
        let accent = Color::Rgb(224, 122, 95);
        Self {
            root_bg: Color::Rgb(16, 16, 20),
            text,
            text_secondary: secondary,
            even_accent: accent,
            odd_accent: Color::Rgb(120, 160, 200),

            card_border: Style::default().fg(Color::Rgb(70, 70, 80)),
            card_title: Style::default().fg(text).add_modifier(Modifier::BOLD),
            card_ordinal: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            card_image: Style::default()
                .fg(secondary)
                .bg(Color::Rgb(35, 35, 42)),
            nav_item: Style::default().fg(secondary),
            nav_active: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            dial_track: Style::default().fg(Color::Rgb(70, 70, 80)),
            dial_needle: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            dial_value: Style::default().fg(secondary),
            side_title: Style::default().fg(text).add_modifier(Modifier::BOLD),
            footer: Style::default()
                .fg(Color::Rgb(140, 140, 150))
                .add_modifier(Modifier::DIM),
        }
    }
}

impl Theme {
    /// Accent color keyed by the record count's parity.
    pub fn parity_accent(&self, parity: Parity) -> Color {
        match parity {
            Parity::Even => self.even_accent,
            Parity::Odd => self.odd_accent,
        }
    }

    /// Blends a color toward the background. Alpha 0 disappears into the
    /// backdrop, alpha 1 is the color itself.
    pub fn blend(&self, color: Color, alpha: f64) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        match (color, self.root_bg) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let mix = |c: u8, base: u8| -> u8 {
                    (f64::from(base) + (f64::from(c) - f64::from(base)) * a).round() as u8
                };
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            _ => {
                if a < 0.5 {
                    self.text_secondary
                } else {
                    color
                }
            }
        }
    }

    /// Applies `blend` to both sides of a style, keeping its modifiers.
    pub fn faded(&self, style: Style, alpha: f64) -> Style {
        let mut out = style;
        if let Some(fg) = style.fg {
            out.fg = Some(self.blend(fg, alpha));
        }
        if let Some(bg) = style.bg {
            out.bg = Some(self.blend(bg, alpha));
        }
        out
    }
}
