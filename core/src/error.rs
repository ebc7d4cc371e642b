//! Error types for the data shaping pipeline
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

/// Errors raised while preparing records for the canvas.
///
/// Messy record contents never end up here: odd flags decode to `false` and
/// missing labels are skipped. Only broken configuration and unreadable
/// input are errors.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid grid layout: {reason} (width={canvas_width}, cell={cell_size}, padding={cell_padding})")]
    InvalidLayout {
        reason: &'static str,
        canvas_width: u32,
        cell_size: u32,
        cell_padding: u32,
    },

    #[error("Record decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Record source unreadable: {0}")]
    Io(#[from] std::io::Error),
}
