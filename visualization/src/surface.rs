//! Render surface bootstrap
//!
//! Creates the persistent elements of the canvas once, bound to the
//! classified records and category summaries, all starting from a hidden
//! baseline. Sections later only move these elements between
//! configurations; nothing is created or destroyed after bootstrap.
//!
//! The surface also owns the scales, so it is the one place where a
//! declarative [`Transition`] becomes concrete per-element [`Tween`]s.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use scrollvis_core::{max_count, CanvasConfig, CategorySummary, ClassifiedRecord};

use crate::palette::{Color, Palette, BAR_SLOTS};
use crate::scale::{BandScale, LinearScale};
use crate::transition::{Attr, AttrValue, DelayRule, Selection, Transition, Tween, ValueRule};

/// Suggested number of axis ticks
const AXIS_TICKS: usize = 10;
/// Horizontal offset of bar label text
const LABEL_DX: f64 = 15.0;
/// Bar label font size in pixels
const LABEL_FONT_SIZE: f64 = 35.0;

/// Persistent element groups on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementGroup {
    Axis,
    CountTitle,
    PositiveCells,
    NegativeCells,
    Bars,
    BarLabels,
}

/// Stable element identity: group plus record id or category key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementKey {
    pub group: ElementGroup,
    pub id: String,
}

impl ElementKey {
    pub fn new(group: ElementGroup, id: impl Into<String>) -> Self {
        Self { group, id: id.into() }
    }
}

/// Animatable state of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementAttrs {
    pub opacity: f64,
    pub fill: Color,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementAttrs {
    pub fn get(&self, attr: Attr) -> AttrValue {
        match attr {
            Attr::Opacity => AttrValue::Number(self.opacity),
            Attr::Fill => AttrValue::Color(self.fill),
            Attr::X => AttrValue::Number(self.x),
            Attr::Y => AttrValue::Number(self.y),
            Attr::Width => AttrValue::Number(self.width),
        }
    }

    /// Mismatched value kinds are ignored
    pub fn set(&mut self, attr: Attr, value: AttrValue) {
        match (attr, value) {
            (Attr::Fill, AttrValue::Color(c)) => self.fill = c,
            (Attr::Opacity, AttrValue::Number(n)) => self.opacity = n,
            (Attr::X, AttrValue::Number(n)) => self.x = n,
            (Attr::Y, AttrValue::Number(n)) => self.y = n,
            (Attr::Width, AttrValue::Number(n)) => self.width = n,
            (attr, value) => trace!("Ignoring {:?} for {:?}", value, attr),
        }
    }
}

/// Everything a backend needs to draw one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub key: ElementKey,
    pub attrs: ElementAttrs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub dx: f64,
    pub dy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Whether the cell's record carries its grid's flag
    pub filled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ticks: Vec<f64>,
}

impl ElementSpec {
    fn new(key: ElementKey, attrs: ElementAttrs) -> Self {
        Self {
            key,
            attrs,
            text: None,
            dx: 0.0,
            dy: 0.0,
            font_size: None,
            filled: false,
            ticks: Vec::new(),
        }
    }
}

/// Outer drawing area: the canvas plus its margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Canvas origin inside the outer area
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Data bound to an element, used to resolve value rules
#[derive(Debug, Clone, Copy)]
enum Datum {
    Static,
    Cell { x: f64, y: f64, row: usize },
    Bar { value: u32 },
}

/// The bound element set plus the scales that position it
#[derive(Debug, Clone)]
pub struct RenderSurface {
    config: CanvasConfig,
    x_scale: LinearScale,
    band: BandScale,
    elements: Vec<ElementSpec>,
    data: Vec<Datum>,
}

impl RenderSurface {
    /// Create every persistent element at its hidden baseline.
    pub fn bootstrap(
        positive: &[ClassifiedRecord],
        negative: &[ClassifiedRecord],
        summaries: &[CategorySummary],
        config: &CanvasConfig,
        palette: &Palette,
    ) -> Self {
        let width = f64::from(config.width);
        let height = f64::from(config.height);

        let x_scale = LinearScale::new((0.0, f64::from(max_count(summaries))), (0.0, width));
        let band = BandScale::new(BAR_SLOTS, (0.0, config.bar_band_extent()), config.bar_padding_inner);

        let mut surface = Self {
            config: config.clone(),
            x_scale,
            band,
            elements: Vec::with_capacity(positive.len() + negative.len() + 2 * summaries.len() + 3),
            data: Vec::new(),
        };

        let hidden = |x: f64, y: f64, fill: Color| ElementAttrs {
            opacity: 0.0,
            fill,
            x,
            y,
            width: 0.0,
            height: 0.0,
        };

        let mut axis = ElementSpec::new(ElementKey::new(ElementGroup::Axis, "x"), hidden(0.0, height, palette.title));
        axis.attrs.width = width;
        axis.ticks = x_scale.ticks(AXIS_TICKS);
        surface.push(axis, Datum::Static);

        let mut title = ElementSpec::new(
            ElementKey::new(ElementGroup::CountTitle, "title"),
            hidden(width / 2.0, height / 3.0, palette.title),
        );
        title.text = Some(format_count(positive.len()));
        surface.push(title, Datum::Static);

        let mut subtitle = ElementSpec::new(
            ElementKey::new(ElementGroup::CountTitle, "subtitle"),
            hidden(width / 2.0, height / 3.0 + height / 5.0, palette.title),
        );
        subtitle.text = Some(config.record_noun.clone());
        surface.push(subtitle, Datum::Static);

        surface.bind_cells(ElementGroup::PositiveCells, positive, palette);
        surface.bind_cells(ElementGroup::NegativeCells, negative, palette);
        surface.bind_bars(summaries, palette);

        info!(
            "Render surface bound: {} positive cells, {} negative cells, {} bars, bar domain [0, {}]",
            positive.len(),
            negative.len(),
            surface.selection_len(Selection::Bars),
            x_scale.domain().1
        );

        surface
    }

    fn push(&mut self, spec: ElementSpec, datum: Datum) {
        self.elements.push(spec);
        self.data.push(datum);
    }

    fn bind_cells(&mut self, group: ElementGroup, records: &[ClassifiedRecord], palette: &Palette) {
        let size = f64::from(self.config.cell_size);
        let mut seen = HashSet::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.key.as_str()) {
                warn!("Duplicate record key {:?} in {:?}; keeping the first", record.key, group);
                continue;
            }

            let mut cell = ElementSpec::new(
                ElementKey::new(group, record.key.clone()),
                ElementAttrs {
                    opacity: 0.0,
                    fill: palette.blank,
                    x: record.pixel_x,
                    y: record.pixel_y,
                    width: size,
                    height: size,
                },
            );
            cell.filled = record.is_filled();

            self.push(
                cell,
                Datum::Cell {
                    x: record.pixel_x,
                    y: record.pixel_y,
                    row: record.grid_row,
                },
            );
        }
    }

    fn bind_bars(&mut self, summaries: &[CategorySummary], palette: &Palette) {
        if summaries.len() > BAR_SLOTS {
            warn!(
                "{} categories exceed the {} bar slots; {} not drawn",
                summaries.len(),
                BAR_SLOTS,
                summaries.len() - BAR_SLOTS
            );
        }

        let placed: Vec<(usize, &CategorySummary, f64, Color)> = summaries
            .iter()
            .enumerate()
            .filter_map(|(rank, summary)| {
                let y = self.band.position(rank)?;
                let fill = palette.bar_color(rank)?;
                Some((rank, summary, y, fill))
            })
            .collect();

        let bandwidth = self.band.bandwidth();
        for &(_, summary, y, fill) in &placed {
            let bar = ElementSpec::new(
                ElementKey::new(ElementGroup::Bars, summary.key.clone()),
                ElementAttrs {
                    opacity: 1.0,
                    fill,
                    x: 0.0,
                    y,
                    width: 0.0,
                    height: bandwidth,
                },
            );
            self.push(bar, Datum::Bar { value: summary.value });
        }

        for &(_, summary, y, _) in &placed {
            let mut label = ElementSpec::new(
                ElementKey::new(ElementGroup::BarLabels, summary.key.clone()),
                ElementAttrs {
                    opacity: 0.0,
                    fill: palette.label,
                    x: 0.0,
                    y,
                    width: 0.0,
                    height: 0.0,
                },
            );
            label.text = Some(format!("{}\u{2026}", summary.key));
            label.dx = LABEL_DX;
            label.dy = bandwidth / 1.2;
            label.font_size = Some(LABEL_FONT_SIZE);
            self.push(label, Datum::Bar { value: summary.value });
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.config.outer_width(),
            height: self.config.outer_height(),
            origin_x: self.config.margins.left,
            origin_y: self.config.margins.top,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn band(&self) -> &BandScale {
        &self.band
    }

    /// Baseline specs in bind order
    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    pub fn find(&self, key: &ElementKey) -> Option<&ElementSpec> {
        self.elements.iter().find(|spec| &spec.key == key)
    }

    fn matches(spec: &ElementSpec, selection: Selection) -> bool {
        let group = spec.key.group;
        match selection {
            Selection::CountTitle => group == ElementGroup::CountTitle,
            Selection::Axis => group == ElementGroup::Axis,
            Selection::PositiveCells => group == ElementGroup::PositiveCells,
            Selection::PositiveFilled => group == ElementGroup::PositiveCells && spec.filled,
            Selection::NegativeCells => group == ElementGroup::NegativeCells,
            Selection::NegativeFilled => group == ElementGroup::NegativeCells && spec.filled,
            Selection::Bars => group == ElementGroup::Bars,
            Selection::BarLabels => group == ElementGroup::BarLabels,
        }
    }

    fn select(&self, selection: Selection) -> impl Iterator<Item = (&ElementSpec, Datum)> + '_ {
        self.elements
            .iter()
            .zip(self.data.iter().copied())
            .filter(move |(spec, _)| Self::matches(spec, selection))
    }

    pub fn selection_len(&self, selection: Selection) -> usize {
        self.select(selection).count()
    }

    /// Expand a transition into per-element tweens.
    ///
    /// `i` in delay and value rules is the element's index within the
    /// selection, in bind order.
    pub fn resolve(&self, transition: &Transition) -> Vec<Tween> {
        let mut tweens = Vec::new();

        for (i, (spec, datum)) in self.select(transition.selection).enumerate() {
            let mut offset = 0u64;
            for stage in &transition.stages {
                let delay = match stage.delay {
                    DelayRule::None => 0,
                    DelayRule::Fixed(ms) => ms,
                    DelayRule::PerRow(ms) => match datum {
                        Datum::Cell { row, .. } => ms * row as u64,
                        _ => 0,
                    },
                    DelayRule::PerRank(ms) => ms * (i as u64 + 1),
                };
                let start_ms = offset + delay;

                for &(attr, rule) in &stage.targets {
                    tweens.push(Tween {
                        element: spec.key.clone(),
                        attr,
                        start_ms,
                        duration_ms: stage.duration_ms,
                        easing: stage.easing,
                        target: self.value(spec, datum, i, rule),
                    });
                }

                offset = start_ms + stage.duration_ms;
            }
        }

        trace!("Resolved {:?} into {} tweens", transition.selection, tweens.len());
        tweens
    }

    fn value(&self, spec: &ElementSpec, datum: Datum, index: usize, rule: ValueRule) -> AttrValue {
        match rule {
            ValueRule::Number(n) => AttrValue::Number(n),
            ValueRule::Color(c) => AttrValue::Color(c),
            ValueRule::GridX => AttrValue::Number(match datum {
                Datum::Cell { x, .. } => x,
                _ => spec.attrs.x,
            }),
            ValueRule::GridY => AttrValue::Number(match datum {
                Datum::Cell { y, .. } => y,
                _ => spec.attrs.y,
            }),
            ValueRule::CollapseY => AttrValue::Number(self.band.wrapped_center(index)),
            ValueRule::FlagColor { on, off } => AttrValue::Color(if spec.filled { on } else { off }),
            ValueRule::BarWidth => AttrValue::Number(match datum {
                Datum::Bar { value } => self.x_scale.apply(f64::from(value)),
                _ => 0.0,
            }),
        }
    }
}

/// Integer with comma thousands separators, e.g. `5,632`
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
