//! ScrollVis visualization - section activation and transition sequencing
//!
//! Maps a linear scroll position onto an ordered set of visual sections and
//! drives a shared canvas between them. The canvas holds a grid of unit
//! cells (one per record, twice over: once for the positive indicator and
//! once for the negative one) plus a bar chart of category counts.
//!
//! The crate is organised leaf first:
//!
//! - [`palette`], [`animation`] and [`scale`] hold colors, easing, timing
//!   and the linear/band scales.
//! - [`transition`] describes animated attribute changes declaratively.
//! - [`surface`] binds classified data to persistent elements and resolves
//!   transitions into per-element tweens.
//! - [`renderer`] is the seam to a drawing backend; [`scene`] is the
//!   in-memory reference backend.
//! - [`sections`] is the registry of visual states, [`engine`] the
//!   activation state machine and update dispatcher.
//! - [`vis`] and [`driver`] wire it all to scroll tracker events.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod animation;
pub mod driver;
pub mod engine;
pub mod error;
pub mod palette;
pub mod renderer;
pub mod scale;
pub mod scene;
pub mod sections;
pub mod surface;
pub mod transition;
pub mod vis;

pub use animation::{EasingFunction, TimingConfig};
pub use driver::{ScrollDriver, ScrollEvent};
pub use engine::{scrolled_sections, EngineCursor, SectionEngine};
pub use error::ScrollError;
pub use palette::{Color, Palette};
pub use renderer::{Canvas, RecordingRenderer, Renderer};
pub use scene::Scene;
pub use sections::{SectionId, SectionRegistry};
pub use surface::{ElementGroup, ElementKey, ElementSpec, RenderSurface, Viewport};
pub use transition::{Attr, AttrValue, DelayRule, Selection, Transition, Tween, ValueRule};
pub use vis::ScrollVis;
