//! Canvas configuration
//!
//! The canvas dimensions and grid constants are fixed for a visualization
//! session. They live in one serializable struct so that every consumer reads
//! the same values.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

/// Outer margins around the drawing area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 20.0,
            bottom: 40.0,
            right: 10.0,
        }
    }
}

/// Configuration for the visualization canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Drawing area width in pixels (excluding margins)
    pub width: u32,

    /// Drawing area height in pixels (excluding margins)
    pub height: u32,

    /// Margins around the drawing area
    pub margins: Margins,

    /// Side length of one grid cell
    pub cell_size: u32,

    /// Gap between adjacent grid cells
    pub cell_padding: u32,

    /// Inner padding of the bar band scale (fraction of the step)
    pub bar_padding_inner: f64,

    /// Vertical space kept free below the bar band
    pub bar_band_reserve: f64,

    /// Noun shown under the record count title
    pub record_noun: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 520,
            margins: Margins::default(),
            cell_size: 6,
            cell_padding: 2,
            bar_padding_inner: 0.08,
            bar_band_reserve: 50.0,
            record_noun: "Tweets".to_owned(),
        }
    }
}

impl CanvasConfig {
    /// Full surface width including margins
    pub fn outer_width(&self) -> f64 {
        f64::from(self.width) + self.margins.left + self.margins.right
    }

    /// Full surface height including margins
    pub fn outer_height(&self) -> f64 {
        f64::from(self.height) + self.margins.top + self.margins.bottom
    }

    /// Bottom edge of the bar band range
    pub fn bar_band_extent(&self) -> f64 {
        (f64::from(self.height) - self.bar_band_reserve).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_config_default() {
        let config = CanvasConfig::default();

        assert_eq!(config.width, 600);
        assert_eq!(config.height, 520);
        assert_eq!(config.cell_size, 6);
        assert_eq!(config.cell_padding, 2);
        assert_eq!(config.margins.left, 20.0);
        assert_eq!(config.margins.bottom, 40.0);
        assert_eq!(config.outer_width(), 630.0);
        assert_eq!(config.outer_height(), 560.0);
        assert_eq!(config.bar_band_extent(), 470.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{"record_noun": "Posts"}"#).unwrap();

        assert_eq!(config.record_noun, "Posts");
        assert_eq!(config.width, 600);
        assert_eq!(config.margins, Margins::default());
    }
}
