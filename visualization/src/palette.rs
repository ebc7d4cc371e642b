//! Colors used by the canvas
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScrollError;

/// 24-bit RGB color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation per channel, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ScrollError;

    /// Accepts `#RGB` and `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrollError::InvalidColor(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ScrollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Number of bar slots with an assigned color
pub const BAR_SLOTS: usize = 3;

/// Fixed color assignments for the visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Highlight for positive records, first bar
    pub positive: Color,

    /// Highlight for negative records, second bar
    pub negative: Color,

    /// Third bar
    pub neutral: Color,

    /// Unhighlighted grid cells
    pub grid: Color,

    /// Cell fill before any section runs
    pub blank: Color,

    /// Bar label text
    pub label: Color,

    /// Count title and axis ink
    pub title: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            positive: Color::rgb(0x8C, 0xC0, 0x51),
            negative: Color::rgb(0xDB, 0x44, 0x55),
            neutral: Color::rgb(0xAA, 0xB2, 0xBD),
            grid: Color::rgb(0xDD, 0xDD, 0xDD),
            blank: Color::rgb(0xFF, 0xFF, 0xFF),
            label: Color::rgb(0xFF, 0xFF, 0xFF),
            title: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

impl Palette {
    /// Bar color by rank: positive, negative, neutral
    pub fn bar_color(&self, rank: usize) -> Option<Color> {
        match rank {
            0 => Some(self.positive),
            1 => Some(self.negative),
            2 => Some(self.neutral),
            _ => None,
        }
    }
}
