//! Visualization session
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::info;

use scrollvis_core::{aggregate, classify, CanvasConfig, CategorySummary, ClassifiedRecord, FlagField, GridLayout, RawRecord};

use crate::animation::TimingConfig;
use crate::engine::{EngineCursor, SectionEngine};
use crate::error::ScrollError;
use crate::palette::Palette;
use crate::renderer::{Canvas, Renderer};
use crate::sections::{SectionId, SectionRegistry};
use crate::surface::RenderSurface;

/// One scrollytelling canvas bound to a record set
#[derive(Debug)]
pub struct ScrollVis<R: Renderer> {
    positive: Vec<ClassifiedRecord>,
    negative: Vec<ClassifiedRecord>,
    summaries: Vec<CategorySummary>,
    canvas: Canvas<R>,
    engine: SectionEngine,
}

impl<R: Renderer> ScrollVis<R> {
    /// Bind `records` with the default palette and timings
    pub fn new(records: &[RawRecord], config: &CanvasConfig, renderer: R) -> Result<Self, ScrollError> {
        Self::with_options(records, config, Palette::default(), TimingConfig::default(), renderer)
    }

    pub fn with_options(
        records: &[RawRecord],
        config: &CanvasConfig,
        palette: Palette,
        timing: TimingConfig,
        renderer: R,
    ) -> Result<Self, ScrollError> {
        Self::with_registry(records, config, SectionRegistry::new(palette, timing), renderer)
    }

    /// Classify both indicators over one shared layout, aggregate the
    /// positive pass, and hand the bound surface to the renderer.
    pub fn with_registry(
        records: &[RawRecord],
        config: &CanvasConfig,
        registry: SectionRegistry,
        renderer: R,
    ) -> Result<Self, ScrollError> {
        let layout = GridLayout::from_config(config)?;
        let positive = classify(records, FlagField::Positive, &layout);
        let negative = classify(records, FlagField::Negative, &layout);
        let summaries = aggregate(&positive);

        info!(
            "Bound {} records over {} columns, {} categories",
            records.len(),
            layout.row_capacity(),
            summaries.len()
        );

        let surface = RenderSurface::bootstrap(&positive, &negative, &summaries, config, registry.palette());
        let canvas = Canvas::bootstrap(surface, renderer);

        Ok(Self {
            positive,
            negative,
            summaries,
            canvas,
            engine: SectionEngine::new(registry, EngineCursor::default()),
        })
    }

    pub fn activate(&mut self, index: usize) -> Result<Vec<SectionId>, ScrollError> {
        self.engine.activate(index, &mut self.canvas)
    }

    pub fn update(&mut self, index: usize, progress: f64) -> Result<(), ScrollError> {
        self.engine.update(index, progress, &mut self.canvas)
    }

    pub fn positive(&self) -> &[ClassifiedRecord] {
        &self.positive
    }

    pub fn negative(&self) -> &[ClassifiedRecord] {
        &self.negative
    }

    pub fn summaries(&self) -> &[CategorySummary] {
        &self.summaries
    }

    pub fn cursor(&self) -> EngineCursor {
        self.engine.cursor()
    }

    pub fn canvas(&self) -> &Canvas<R> {
        &self.canvas
    }

    pub fn renderer(&self) -> &R {
        self.canvas.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.canvas.renderer_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;
    use crate::scene::Scene;
    use crate::surface::{ElementGroup, ElementKey};
    use crate::test_support::{init_logging, mixed_records, two_records};
    use scrollvis_core::CoreError;

    #[test]
    fn test_two_record_session() {
        init_logging();
        let vis = ScrollVis::new(&two_records(), &CanvasConfig::default(), Scene::new()).unwrap();

        assert_eq!(vis.positive().iter().filter(|r| r.is_positive).count(), 1);
        assert_eq!(
            vis.summaries(),
            &[
                CategorySummary { key: "joy".into(), value: 1 },
                CategorySummary { key: "anger".into(), value: 1 },
            ]
        );
        assert_eq!(vis.cursor(), EngineCursor::default());
    }

    #[test]
    fn test_parallel_grids_share_coordinates() {
        let vis = ScrollVis::new(&mixed_records(200), &CanvasConfig::default(), RecordingRenderer::new()).unwrap();

        for (p, n) in vis.positive().iter().zip(vis.negative()) {
            assert_eq!((p.pixel_x, p.pixel_y), (n.pixel_x, n.pixel_y));
            assert_eq!(p.key, n.key);
        }
        assert_eq!(vis.positive()[75].grid_row, 1);
    }

    #[test]
    fn test_count_title_reflects_records() {
        let mut vis = ScrollVis::new(&mixed_records(1234), &CanvasConfig::default(), Scene::new()).unwrap();

        vis.activate(1).unwrap();
        vis.renderer_mut().settle();

        let title = vis.renderer().get(&ElementKey::new(ElementGroup::CountTitle, "title")).unwrap();
        assert_eq!(title.text.as_deref(), Some("1,234"));
        assert_eq!(title.attrs.opacity, 1.0);
    }

    #[test]
    fn test_invalid_layout_is_reported() {
        let config = CanvasConfig {
            cell_size: 0,
            cell_padding: 0,
            ..CanvasConfig::default()
        };

        let result = ScrollVis::new(&two_records(), &config, RecordingRenderer::new());

        assert!(matches!(result, Err(ScrollError::Core(CoreError::InvalidLayout { .. }))));
    }

    #[test]
    fn test_activate_and_update_through_session() {
        let mut vis = ScrollVis::new(&two_records(), &CanvasConfig::default(), RecordingRenderer::new()).unwrap();

        assert_eq!(vis.activate(0).unwrap(), vec![SectionId::Intro]);
        vis.update(0, 0.3).unwrap();

        assert_eq!(vis.cursor().last_active, Some(0));
        assert!(vis.activate(42).is_err());
        assert_eq!(vis.cursor().last_active, Some(0));
    }
}
