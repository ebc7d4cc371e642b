//! Grid layout shared by every cell grid on the canvas
//!
//! The positive and negative grids must line up cell for cell, so the grid
//! geometry is computed once and borrowed by both classification passes.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::error::CoreError;

/// Fixed-width wrapping grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    cell_size: u32,
    cell_padding: u32,
    row_capacity: usize,
}

impl GridLayout {
    /// Derive the layout from canvas width and cell constants.
    ///
    /// `row_capacity = floor(canvas_width / (cell_size + cell_padding))`.
    pub fn new(canvas_width: u32, cell_size: u32, cell_padding: u32) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidLayout {
            reason,
            canvas_width,
            cell_size,
            cell_padding,
        };

        let pitch = cell_size
            .checked_add(cell_padding)
            .ok_or_else(|| invalid("cell pitch overflows"))?;
        if pitch == 0 {
            return Err(invalid("cell pitch is zero"));
        }

        let row_capacity = (canvas_width / pitch) as usize;
        if row_capacity == 0 {
            return Err(invalid("cell pitch wider than canvas"));
        }

        Ok(Self {
            cell_size,
            cell_padding,
            row_capacity,
        })
    }

    pub fn from_config(config: &CanvasConfig) -> Result<Self, CoreError> {
        Self::new(config.width, config.cell_size, config.cell_padding)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn cell_padding(&self) -> u32 {
        self.cell_padding
    }

    /// Distance between the origins of two neighbouring cells
    pub fn pitch(&self) -> u32 {
        self.cell_size + self.cell_padding
    }

    /// Cells per row
    pub fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    /// Grid cell `(column, row)` for the record at `index`
    #[inline]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index % self.row_capacity, index / self.row_capacity)
    }

    /// Pixel origin of a grid cell
    #[inline]
    pub fn pixel(&self, column: usize, row: usize) -> (f64, f64) {
        let pitch = f64::from(self.pitch());
        (column as f64 * pitch, row as f64 * pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_capacity() {
        let layout = GridLayout::from_config(&CanvasConfig::default()).unwrap();

        assert_eq!(layout.pitch(), 8);
        assert_eq!(layout.row_capacity(), 75);
    }

    #[test]
    fn test_cell_wraps_at_row_capacity() {
        let layout = GridLayout::new(600, 6, 2).unwrap();

        assert_eq!(layout.cell(0), (0, 0));
        assert_eq!(layout.cell(74), (74, 0));
        assert_eq!(layout.cell(75), (0, 1));
        assert_eq!(layout.cell(151), (1, 2));
        assert_eq!(layout.pixel(1, 2), (8.0, 16.0));
    }

    #[test]
    fn test_uneven_width_floors_capacity() {
        let layout = GridLayout::new(605, 6, 2).unwrap();
        assert_eq!(layout.row_capacity(), 75);
    }

    #[test]
    fn test_invalid_layouts_rejected() {
        assert!(matches!(
            GridLayout::new(600, 0, 0),
            Err(CoreError::InvalidLayout { .. })
        ));
        assert!(matches!(
            GridLayout::new(4, 6, 2),
            Err(CoreError::InvalidLayout { .. })
        ));
    }
}
