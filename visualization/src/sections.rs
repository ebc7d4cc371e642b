//! Visual section registry
//!
//! The narrative has a closed set of seven sections. Each one asserts a
//! destination configuration for every element group it cares about and
//! never looks at which section ran before it, so activating a section
//! twice lands in the same place.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::TimingConfig;
use crate::error::ScrollError;
use crate::palette::{Color, Palette};
use crate::transition::{Attr, DelayRule, Selection, Transition, ValueRule};

/// The visual states, in scroll order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionId {
    /// Gap before the story starts; hides the count title
    Intro,
    /// Total record count
    CountTitle,
    /// Every record as a gray cell
    Grid,
    /// Positive records highlighted
    HighlightPositive,
    /// Negative records highlighted
    HighlightNegative,
    /// Category bar chart
    ShowBar,
    /// Bars retracted for the outro
    HideBar,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Intro,
        SectionId::CountTitle,
        SectionId::Grid,
        SectionId::HighlightPositive,
        SectionId::HighlightNegative,
        SectionId::ShowBar,
        SectionId::HideBar,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Intro => "intro",
            SectionId::CountTitle => "count-title",
            SectionId::Grid => "grid",
            SectionId::HighlightPositive => "highlight-positive",
            SectionId::HighlightNegative => "highlight-negative",
            SectionId::ShowBar => "show-bar",
            SectionId::HideBar => "hide-bar",
        }
    }

    /// Transitions that bring the canvas to this section's configuration
    pub fn plan(self, palette: &Palette, timing: &TimingConfig) -> Vec<Transition> {
        let ease = timing.easing;
        let fade = |selection: Selection, ms: u64, opacity: f64| {
            Transition::select(selection).ease(ease).duration(ms).opacity(opacity)
        };
        // Slide filled cells onto the bar rows, then drop them
        let collapse = |selection: Selection, ms: u64, fade_ms: u64| {
            Transition::select(selection)
                .ease(ease)
                .duration(ms)
                .set(Attr::X, ValueRule::Number(0.0))
                .set(Attr::Y, ValueRule::CollapseY)
                .then()
                .duration(fade_ms)
                .opacity(0.0)
        };
        let regroup = |selection: Selection, ms: u64| {
            Transition::select(selection)
                .ease(ease)
                .duration(ms)
                .set(Attr::X, ValueRule::GridX)
                .set(Attr::Y, ValueRule::GridY)
        };
        let highlight = |selection: Selection, ms: u64, accent: Color| {
            Transition::select(selection)
                .ease(ease)
                .duration(ms)
                .opacity(1.0)
                .set(Attr::Fill, ValueRule::FlagColor { on: accent, off: palette.grid })
        };
        let show_gray = |selection: Selection| fade(selection, 0, 1.0).fill(palette.grid);
        let axis = |opacity: f64| fade(Selection::Axis, timing.axis_fade_ms, opacity);
        let retract_bars = |ms: u64| {
            Transition::select(Selection::Bars)
                .ease(ease)
                .duration(ms)
                .set(Attr::Width, ValueRule::Number(0.0))
        };

        match self {
            SectionId::Intro => vec![fade(Selection::CountTitle, 0, 0.0)],

            SectionId::CountTitle => vec![
                fade(Selection::PositiveCells, 0, 0.0),
                fade(Selection::CountTitle, timing.title_fade_ms, 1.0),
            ],

            SectionId::Grid => vec![
                fade(Selection::CountTitle, 0, 0.0),
                fade(Selection::PositiveCells, timing.grid_reveal_ms, 1.0)
                    .delay(DelayRule::PerRow(timing.grid_row_stagger_ms))
                    .fill(palette.grid),
            ],

            SectionId::HighlightPositive => vec![
                axis(0.0),
                fade(Selection::NegativeCells, timing.positive_highlight_ms, 0.0),
                collapse(Selection::NegativeFilled, timing.positive_highlight_ms, 0),
                show_gray(Selection::PositiveCells),
                regroup(Selection::PositiveFilled, timing.positive_highlight_ms),
                highlight(Selection::PositiveFilled, timing.positive_highlight_ms, palette.positive),
            ],

            SectionId::HighlightNegative => vec![
                axis(0.0),
                fade(Selection::PositiveCells, timing.positive_retreat_ms, 0.0),
                collapse(
                    Selection::PositiveFilled,
                    timing.positive_retreat_ms,
                    timing.positive_collapse_fade_ms,
                ),
                retract_bars(timing.positive_retreat_ms),
                fade(Selection::BarLabels, 0, 0.0),
                show_gray(Selection::NegativeCells),
                regroup(Selection::NegativeFilled, timing.negative_highlight_ms),
                highlight(Selection::NegativeFilled, timing.negative_highlight_ms, palette.negative),
            ],

            SectionId::ShowBar => vec![
                axis(1.0),
                fade(Selection::NegativeCells, timing.negative_retreat_ms, 0.0),
                collapse(Selection::NegativeFilled, timing.negative_retreat_ms, 0),
                Transition::select(Selection::Bars)
                    .ease(ease)
                    .delay(DelayRule::PerRank(timing.bar_rank_stagger_ms))
                    .duration(timing.bar_grow_ms)
                    .set(Attr::Width, ValueRule::BarWidth),
                fade(Selection::BarLabels, timing.label_fade_ms, 1.0).delay(DelayRule::Fixed(timing.label_delay_ms)),
            ],

            SectionId::HideBar => vec![
                axis(0.0),
                retract_bars(timing.bar_retract_ms),
                fade(Selection::BarLabels, 0, 0.0),
            ],
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

/// Continuous per-section behaviour driven by scroll progress
pub type UpdateFn = Box<dyn Fn(f64) -> Vec<Transition>>;

/// One registered section
pub struct SectionEntry {
    id: SectionId,
    update: Option<UpdateFn>,
}

impl SectionEntry {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    /// Progress-driven transitions; empty for sections without an update
    pub fn update(&self, progress: f64) -> Vec<Transition> {
        match &self.update {
            Some(update) => update(progress),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for SectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionEntry")
            .field("id", &self.id)
            .field("update", &self.update.as_ref().map(|_| "Fn(f64)"))
            .finish()
    }
}

/// Ordered, index-addressed table of the seven sections
#[derive(Debug)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
    palette: Palette,
    timing: TimingConfig,
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new(Palette::default(), TimingConfig::default())
    }
}

impl SectionRegistry {
    pub fn new(palette: Palette, timing: TimingConfig) -> Self {
        let entries = SectionId::ALL
            .iter()
            .map(|&id| SectionEntry { id, update: None })
            .collect();
        Self {
            entries,
            palette,
            timing,
        }
    }

    /// Install a continuous update behaviour for one section
    pub fn with_update<F>(mut self, id: SectionId, update: F) -> Self
    where
        F: Fn(f64) -> Vec<Transition> + 'static,
    {
        self.entries[id.index()].update = Some(Box::new(update));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checked lookup; an unknown index is the caller's bug and is reported
    pub fn get(&self, index: usize) -> Result<&SectionEntry, ScrollError> {
        self.entries.get(index).ok_or_else(|| ScrollError::SectionOutOfRange {
            index,
            count: self.entries.len(),
        })
    }

    pub fn activation(&self, entry: &SectionEntry) -> Vec<Transition> {
        entry.id.plan(&self.palette, &self.timing)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }
}
