//! ScrollVis core - data shaping for scroll-driven narrative visualization
//!
//! Turns flat input records into the derived values a scrollytelling canvas
//! consumes: decoded boolean flags, positions in a fixed-width wrapping grid,
//! and per-category counts for the bar chart.
//!
//! The pipeline is pure and deterministic. The same records and the same
//! [`GridLayout`] always produce the same classified output.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod aggregate;
pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod record;

pub use aggregate::{aggregate, max_count, CategorySummary};
pub use config::{CanvasConfig, Margins};
pub use error::CoreError;
pub use layout::GridLayout;
pub use loader::{load_records, load_records_from_path};
pub use record::{classify, ClassifiedRecord, FlagField, RawRecord};

/// Crate version, as published in the workspace manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
