//! Error types for the visualization layer
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use scrollvis_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrollError {
    /// The scroll tracker emitted an index with no registered section.
    /// Never clamped: a bad index means the tracker and the registry disagree.
    #[error("Section index {index} out of range: {count} sections registered")]
    SectionOutOfRange { index: usize, count: usize },

    #[error("Invalid color literal: {0}")]
    InvalidColor(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
