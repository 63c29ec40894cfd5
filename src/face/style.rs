//! Font styles, variants and colours

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Weight classes from ExtraLight to ExtraBlack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    ExtraLight,
    Light,
    Book,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Black,
    ExtraBlack,
}

impl FontWeight {
    pub const ALL: [FontWeight; 9] = [
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Book,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::Semibold,
        FontWeight::Bold,
        FontWeight::Black,
        FontWeight::ExtraBlack,
    ];

    /// CSS-style numeric weight, 100 to 900
    pub fn boldness(self) -> u16 {
        match self {
            FontWeight::ExtraLight => 100,
            FontWeight::Light => 200,
            FontWeight::Book => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
            FontWeight::Black => 800,
            FontWeight::ExtraBlack => 900,
        }
    }

    /// Outline offset, as a fraction of the font size, that fakes this
    /// weight from a regular font
    pub fn faux_bold(self) -> f64 {
        match self {
            FontWeight::ExtraLight => -0.02,
            FontWeight::Light => -0.01,
            FontWeight::Book => -0.005,
            FontWeight::Regular => 0.0,
            FontWeight::Medium => 0.005,
            FontWeight::Semibold => 0.01,
            FontWeight::Bold => 0.02,
            FontWeight::Black => 0.03,
            FontWeight::ExtraBlack => 0.04,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FontWeight::ExtraLight => "extralight",
            FontWeight::Light => "light",
            FontWeight::Book => "book",
            FontWeight::Regular => "regular",
            FontWeight::Medium => "medium",
            FontWeight::Semibold => "semibold",
            FontWeight::Bold => "bold",
            FontWeight::Black => "black",
            FontWeight::ExtraBlack => "extrablack",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        FontWeight::ALL
            .into_iter()
            .find(|weight| weight.name() == wanted)
            .ok_or_else(|| format!("unknown font weight '{s}'"))
    }
}

/// Weight plus slant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontStyle {
    pub weight: FontWeight,
    pub italic: bool,
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle {
        weight: FontWeight::Regular,
        italic: false,
    };

    pub fn new(weight: FontWeight, italic: bool) -> Self {
        Self { weight, italic }
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            write!(f, "{} italic", self.weight)
        } else {
            write!(f, "{}", self.weight)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontVariant {
    #[default]
    Normal,
    Subscript,
    Superscript,
    SmallCaps,
}

impl FontVariant {
    pub fn is_script(self) -> bool {
        matches!(self, FontVariant::Subscript | FontVariant::Superscript)
    }
}

impl FromStr for FontVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "normal" => Ok(FontVariant::Normal),
            "subscript" | "sub" => Ok(FontVariant::Subscript),
            "superscript" | "super" | "sup" => Ok(FontVariant::Superscript),
            "smallcaps" => Ok(FontVariant::SmallCaps),
            _ => Err(format!("unknown font variant '{s}'")),
        }
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid colour '{s}'"))
        };
        match hex.len() {
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                expanded.parse::<Color>()
            }
            6 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("invalid colour '{s}'")),
        }
    }
}
