// ── Dark colour theme ─────────────────────────────────────────────────────────
//
// The editor ships a single dark scheme, embedded from `assets/dark.json` and
// parsed once at startup.  Colours are written `#rrggbb`; `Rgb::colorref`
// converts to the Win32 `0x00BBGGRR` layout before handing them to GDI.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::error::Result;

const DARK_JSON: &str = include_str!("../assets/dark.json");

// ── Colour ────────────────────────────────────────────────────────────────────

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Win32 COLORREF: `0x00BBGGRR`.
    pub const fn colorref(self) -> u32 {
        ((self.b as u32) << 16) | ((self.g as u32) << 8) | (self.r as u32)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| format!("expected #rrggbb, got {s:?}"))?;
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Theme ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Font {
    pub face: String,
    /// Point size at 96 DPI.
    pub size_pt: u32,
}

/// Initial client size at 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Pixels per inch the theme's sizes are written for.
pub const BASE_DPI: u32 = 96;

impl WindowSize {
    /// Scale to a monitor running at `dpi`.
    pub fn scaled(self, dpi: u32) -> Self {
        let scale = |px: i32| px * dpi as i32 / BASE_DPI as i32;
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    pub window_bg: Rgb,
    pub text_bg: Rgb,
    pub text_fg: Rgb,
    /// Visual style name handed to the text area for its scrollbar.
    pub scrollbar_style: String,
    pub font: Font,
    #[serde(default = "default_wrap")]
    pub word_wrap: bool,
    pub window: WindowSize,
}

fn default_wrap() -> bool {
    true
}

impl Theme {
    /// The built-in dark scheme.
    pub fn dark() -> Result<Self> {
        Self::from_json(DARK_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    #[test]
    fn embedded_dark_theme_parses() {
        let t = Theme::dark().expect("embedded theme");
        assert_eq!(t.window_bg, Rgb::new(0x2d, 0x2d, 0x2d));
        assert_eq!(t.text_bg, Rgb::new(0x1e, 0x1e, 0x1e));
        assert_eq!(t.text_fg, Rgb::new(0xdc, 0xdc, 0xdc));
        assert_eq!(t.font.face, "Consolas");
        assert_eq!(t.font.size_pt, 12);
        assert_eq!(t.scrollbar_style, "DarkMode_Explorer");
        assert!(t.word_wrap);
        assert_eq!(t.window, WindowSize { width: 800, height: 600 });
    }

    #[test]
    fn window_size_scales_with_dpi() {
        let size = WindowSize { width: 800, height: 600 };
        assert_eq!(size.scaled(BASE_DPI), size);
        assert_eq!(size.scaled(144), WindowSize { width: 1200, height: 900 });
    }

    #[test]
    fn colorref_is_bgr() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).colorref(), 0x0056_3412);
    }

    #[test]
    fn rgb_parse_and_display() {
        let c: Rgb = "#66A0ff".parse().expect("valid");
        assert_eq!(c, Rgb::new(0x66, 0xa0, 0xff));
        assert_eq!(c.to_string(), "#66a0ff");
    }

    #[test]
    fn rgb_rejects_malformed() {
        for bad in ["2d2d2d", "#2d2d2", "#2d2d2dff", "#zzzzzz", "#2d2d2é"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn malformed_colour_in_json_is_theme_error() {
        let json = DARK_JSON.replace("#2d2d2d", "grey");
        let err = Theme::from_json(&json).expect_err("bad colour");
        assert!(matches!(err, EditorError::Theme(_)), "{err:?}");
    }

    #[test]
    fn word_wrap_defaults_on_when_absent() {
        let json = r##"{
            "window_bg": "#000000", "text_bg": "#000000", "text_fg": "#ffffff",
            "scrollbar_style": "DarkMode_Explorer",
            "font": { "face": "Consolas", "size_pt": 10 },
            "window": { "width": 640, "height": 480 }
        }"##;
        assert!(Theme::from_json(json).expect("parse").word_wrap);
    }
}
