//! Easing curves and transition timing
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

/// Easing functions for animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Quadratic easing in
    QuadraticIn,
    /// Quadratic easing out
    QuadraticOut,
    /// Quadratic easing in and out
    QuadraticInOut,
    /// Cubic easing in
    CubicIn,
    /// Cubic easing out
    CubicOut,
    /// Cubic easing in and out
    #[default]
    CubicInOut,
}

impl EasingFunction {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => t * (2.0 - t),
            EasingFunction::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => 1.0 - (1.0 - t).powi(3),
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Durations and delays for every section transition, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Count title fade in
    pub title_fade_ms: u64,

    /// Grid reveal per cell
    pub grid_reveal_ms: u64,

    /// Extra reveal delay per grid row
    pub grid_row_stagger_ms: u64,

    /// Axis fade in/out
    pub axis_fade_ms: u64,

    /// Positive highlight, and negative grid collapse before it
    pub positive_highlight_ms: u64,

    /// Positive grid fade/collapse when leaving the positive highlight
    pub positive_retreat_ms: u64,

    /// Fade of collapsed positive cells
    pub positive_collapse_fade_ms: u64,

    /// Negative highlight
    pub negative_highlight_ms: u64,

    /// Negative grid collapse when the bars appear
    pub negative_retreat_ms: u64,

    /// Bar growth
    pub bar_grow_ms: u64,

    /// Extra bar growth delay per rank
    pub bar_rank_stagger_ms: u64,

    /// Bar label fade in
    pub label_fade_ms: u64,

    /// Delay before bar labels fade in
    pub label_delay_ms: u64,

    /// Bar retraction
    pub bar_retract_ms: u64,

    /// Curve for every transition
    pub easing: EasingFunction,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            title_fade_ms: 600,
            grid_reveal_ms: 600,
            grid_row_stagger_ms: 5,
            axis_fade_ms: 500,
            positive_highlight_ms: 800,
            positive_retreat_ms: 600,
            positive_collapse_fade_ms: 800,
            negative_highlight_ms: 500,
            negative_retreat_ms: 800,
            bar_grow_ms: 500,
            bar_rank_stagger_ms: 300,
            label_fade_ms: 500,
            label_delay_ms: 1200,
            bar_retract_ms: 600,
            easing: EasingFunction::default(),
        }
    }
}
