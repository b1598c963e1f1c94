// File: crates/story-core/src/theme.rs
// Summary: Colors, the categorical palette, and light/dark theme presets.

use std::fmt;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let h = hex.strip_prefix('#')?;
        if h.len() != 6 {
            return None;
        }
        let v = u32::from_str_radix(h, 16).ok()?;
        Some(Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    /// Alpha as a 0..=1 fraction.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// CSS form: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.alpha())
        }
    }
}

/// Tableau 10 categorical palette, used for selected entities.
pub const TABLEAU10: [Rgba; 10] = [
    Rgba::rgb(0x4e, 0x79, 0xa7),
    Rgba::rgb(0xf2, 0x8e, 0x2c),
    Rgba::rgb(0xe1, 0x57, 0x59),
    Rgba::rgb(0x76, 0xb7, 0xb2),
    Rgba::rgb(0x59, 0xa1, 0x4f),
    Rgba::rgb(0xed, 0xc9, 0x49),
    Rgba::rgb(0xaf, 0x7a, 0xa1),
    Rgba::rgb(0xff, 0x9d, 0xa7),
    Rgba::rgb(0x9c, 0x75, 0x5f),
    Rgba::rgb(0xba, 0xb0, 0xab),
];

// d3 category10 entries the story uses by name
pub const BLUE: Rgba = Rgba::rgb(0x1f, 0x77, 0xb4);
pub const ORANGE: Rgba = Rgba::rgb(0xff, 0x7f, 0x0e);
pub const GREEN: Rgba = Rgba::rgb(0x2c, 0xa0, 0x2c);
pub const RED: Rgba = Rgba::rgb(0xd6, 0x27, 0x28);
pub const PURPLE: Rgba = Rgba::rgb(0x94, 0x67, 0xbd);
pub const BROWN: Rgba = Rgba::rgb(0x8c, 0x56, 0x4b);
pub const GRAY: Rgba = Rgba::rgb(0x7f, 0x7f, 0x7f);

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub text: Rgba,
    pub axis_line: Rgba,
    pub tick: Rgba,
    pub panel_frame: Rgba,
    pub baseline_fill: Rgba,
    pub baseline_stroke: Rgba,
    pub featured: Rgba,
    pub chip_fill: Rgba,
    pub chip_text: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(0xff, 0xff, 0xff),
            text: Rgba::rgb(0x1e, 0x29, 0x3b),
            axis_line: Rgba::rgb(0x33, 0x33, 0x33),
            tick: Rgba::rgb(0x66, 0x66, 0x66),
            panel_frame: Rgba::rgb(0xd1, 0xd5, 0xdb),
            baseline_fill: Rgba::rgba(15, 23, 42, 46), // ~0.18 alpha
            baseline_stroke: Rgba::rgb(0x1e, 0x29, 0x3b),
            featured: ORANGE,
            chip_fill: Rgba::rgb(0xe2, 0xe8, 0xf0),
            chip_text: Rgba::rgb(0xf8, 0xfa, 0xfc),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            text: Rgba::rgb(235, 235, 245),
            axis_line: Rgba::rgb(180, 180, 190),
            tick: Rgba::rgb(150, 150, 160),
            panel_frame: Rgba::rgb(60, 60, 70),
            baseline_fill: Rgba::rgba(200, 210, 230, 46),
            baseline_stroke: Rgba::rgb(200, 210, 230),
            featured: ORANGE,
            chip_fill: Rgba::rgb(40, 40, 48),
            chip_text: Rgba::rgb(0xf8, 0xfa, 0xfc),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_forms() {
        assert_eq!(BLUE.to_string(), "#1f77b4");
        assert_eq!(Theme::light().baseline_fill.to_string(), "rgba(15, 23, 42, 0.18)");
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Rgba::from_hex("#ff7f0e"), Some(ORANGE));
        assert_eq!(Rgba::from_hex("ff7f0e"), None);
        assert_eq!(Rgba::from_hex("#ff7f"), None);
    }

    #[test]
    fn find_falls_back_to_light() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("neon").name, "light");
    }
}
