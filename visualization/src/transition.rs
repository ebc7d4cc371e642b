//! Declarative transitions
//!
//! A section never touches elements directly. It describes the destination
//! of each element group as a [`Transition`]: which elements, which
//! attributes, what timing. Values that depend on the bound data (grid
//! position, category width, flag color) are expressed as [`ValueRule`]s
//! and resolved per element by the render surface.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::palette::Color;
use crate::surface::ElementKey;

/// Element subsets a transition can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Record count title and its subtitle
    CountTitle,
    /// Horizontal bar axis
    Axis,
    /// Every cell of the positive grid
    PositiveCells,
    /// Positive grid cells whose record has the positive flag
    PositiveFilled,
    /// Every cell of the negative grid
    NegativeCells,
    /// Negative grid cells whose record has the negative flag
    NegativeFilled,
    Bars,
    BarLabels,
}

/// Animatable element attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attr {
    Opacity,
    Fill,
    X,
    Y,
    Width,
}

/// Concrete attribute value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Color(Color),
}

impl AttrValue {
    /// Interpolate towards `to`; mismatched kinds jump at the end
    pub fn interpolate(self, to: AttrValue, t: f64) -> AttrValue {
        match (self, to) {
            (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(a + (b - a) * t),
            (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(a.lerp(b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(n),
            AttrValue::Color(_) => None,
        }
    }
}

/// How a target value is derived for each selected element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValueRule {
    Number(f64),
    Color(Color),
    /// The cell's own grid x coordinate
    GridX,
    /// The cell's own grid y coordinate
    GridY,
    /// Centre of bar band `i mod 3`, `i` the element's index in the selection
    CollapseY,
    /// `on` when the cell's record carries its grid's flag, otherwise `off`
    FlagColor { on: Color, off: Color },
    /// The bar's category count on the bar scale
    BarWidth,
}

/// Start delay of a stage, per element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DelayRule {
    #[default]
    None,
    Fixed(u64),
    /// `ms × grid row`
    PerRow(u64),
    /// `ms × (index in selection + 1)`
    PerRank(u64),
}

/// One timed step of a transition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stage {
    pub delay: DelayRule,
    pub duration_ms: u64,
    pub easing: EasingFunction,
    pub targets: Vec<(Attr, ValueRule)>,
}

/// Animated change of one element selection.
///
/// Stages run back to back: a stage starts when the previous one ends, plus
/// its own delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub selection: Selection,
    pub stages: Vec<Stage>,
}

impl Transition {
    pub fn select(selection: Selection) -> Self {
        Self {
            selection,
            stages: vec![Stage::default()],
        }
    }

    fn stage_mut(&mut self) -> &mut Stage {
        if self.stages.is_empty() {
            self.stages.push(Stage::default());
        }
        let last = self.stages.len() - 1;
        &mut self.stages[last]
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.stage_mut().duration_ms = ms;
        self
    }

    pub fn delay(mut self, delay: DelayRule) -> Self {
        self.stage_mut().delay = delay;
        self
    }

    pub fn ease(mut self, easing: EasingFunction) -> Self {
        self.stage_mut().easing = easing;
        self
    }

    pub fn set(mut self, attr: Attr, rule: ValueRule) -> Self {
        self.stage_mut().targets.push((attr, rule));
        self
    }

    pub fn opacity(self, value: f64) -> Self {
        self.set(Attr::Opacity, ValueRule::Number(value))
    }

    pub fn fill(self, color: Color) -> Self {
        self.set(Attr::Fill, ValueRule::Color(color))
    }

    /// Start a chained stage, inheriting the current easing
    pub fn then(mut self) -> Self {
        let easing = self.stage_mut().easing;
        self.stages.push(Stage {
            easing,
            ..Stage::default()
        });
        self
    }

    /// Total length of the chain ignoring per-element delays
    pub fn nominal_duration_ms(&self) -> u64 {
        self.stages
            .iter()
            .map(|stage| {
                let fixed = match stage.delay {
                    DelayRule::Fixed(ms) => ms,
                    _ => 0,
                };
                fixed + stage.duration_ms
            })
            .sum()
    }
}

/// A resolved attribute animation for a single element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub element: ElementKey,
    pub attr: Attr,
    /// Offset from the moment the tween is scheduled
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: EasingFunction,
    pub target: AttrValue,
}
