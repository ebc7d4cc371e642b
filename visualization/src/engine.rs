//! Section activation engine and update dispatcher
//!
//! A scroll tracker reports the section it landed on, not the ones it
//! skipped. The engine replays every section between the previous position
//! and the new one, in scroll direction, so a jump ends in the same place as
//! scrolling through each step.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::ScrollError;
use crate::renderer::{Canvas, Renderer};
use crate::sections::{SectionId, SectionRegistry};

/// Scroll position bookkeeping; `None` means before the first section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCursor {
    /// Last section whose activation completed
    pub last_active: Option<usize>,

    /// Section the tracker currently reports
    pub current_active: Option<usize>,
}

/// Indices to activate when moving from `last` to `target`.
///
/// Forward moves visit `last + 1 ..= target`, backward moves visit
/// `target .. last` in descending order. Staying put visits nothing.
pub fn scrolled_sections(last: Option<usize>, target: usize) -> Vec<usize> {
    match last {
        None => (0..=target).collect(),
        Some(last) if target >= last => (last + 1..=target).collect(),
        Some(last) => (target..last).rev().collect(),
    }
}

#[derive(Debug)]
pub struct SectionEngine {
    registry: SectionRegistry,
    cursor: EngineCursor,
}

impl SectionEngine {
    pub fn new(registry: SectionRegistry, cursor: EngineCursor) -> Self {
        Self { registry, cursor }
    }

    pub fn cursor(&self) -> EngineCursor {
        self.cursor
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Activate `target` and every section skipped on the way there.
    ///
    /// The index is validated before anything runs; on error the canvas and
    /// the cursor are untouched.
    pub fn activate<R: Renderer>(
        &mut self,
        target: usize,
        canvas: &mut Canvas<R>,
    ) -> Result<Vec<SectionId>, ScrollError> {
        self.registry.get(target)?;

        let indices = scrolled_sections(self.cursor.last_active, target);
        if indices.is_empty() {
            trace!("Section {} already active", target);
            return Ok(Vec::new());
        }

        debug!("Scrolling {:?} -> {}: {:?}", self.cursor.last_active, target, indices);

        let mut visited = Vec::with_capacity(indices.len());
        for index in indices {
            let entry = self.registry.get(index)?;
            let plan = self.registry.activation(entry);
            debug!("Activating section {} with {} transitions", entry.id(), plan.len());
            canvas.apply(&plan);
            visited.push(entry.id());
        }

        self.cursor.last_active = Some(target);
        self.cursor.current_active = Some(target);
        Ok(visited)
    }

    /// Forward scroll progress to the section's update behaviour.
    ///
    /// Not cross-checked against the cursor; the tracker only reports
    /// progress for the section it last activated.
    pub fn update<R: Renderer>(
        &self,
        index: usize,
        progress: f64,
        canvas: &mut Canvas<R>,
    ) -> Result<(), ScrollError> {
        let entry = self.registry.get(index)?;
        let plan = entry.update(progress);
        if !plan.is_empty() {
            trace!("Section {} update at {:.3}: {} transitions", entry.id(), progress, plan.len());
            canvas.apply(&plan);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Color, Palette};
    use crate::renderer::RecordingRenderer;
    use crate::scene::Scene;
    use crate::surface::{ElementAttrs, ElementGroup, ElementKey, ElementSpec, RenderSurface};
    use crate::test_support::{init_logging, mixed_records, two_records};
    use crate::transition::{Selection, Transition};
    use scrollvis_core::{aggregate, classify, CanvasConfig, FlagField, GridLayout, RawRecord};

    fn canvas<R: Renderer>(records: &[RawRecord], renderer: R) -> Canvas<R> {
        let config = CanvasConfig::default();
        let layout = GridLayout::from_config(&config).unwrap();
        let positive = classify(records, FlagField::Positive, &layout);
        let negative = classify(records, FlagField::Negative, &layout);
        let surface = RenderSurface::bootstrap(&positive, &negative, &aggregate(&positive), &config, &Palette::default());
        Canvas::bootstrap(surface, renderer)
    }

    fn engine() -> SectionEngine {
        SectionEngine::new(SectionRegistry::default(), EngineCursor::default())
    }

    #[test]
    fn test_scrolled_sections_ranges() {
        assert_eq!(scrolled_sections(None, 0), vec![0]);
        assert_eq!(scrolled_sections(None, 5), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(scrolled_sections(Some(2), 5), vec![3, 4, 5]);
        assert_eq!(scrolled_sections(Some(5), 1), vec![4, 3, 2, 1]);
        assert_eq!(scrolled_sections(Some(1), 0), vec![0]);
        assert!(scrolled_sections(Some(3), 3).is_empty());
    }

    #[test]
    fn test_first_activation_replays_from_start() {
        init_logging();
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());
        let mut engine = engine();

        let visited = engine.activate(5, &mut canvas).unwrap();

        assert_eq!(visited, SectionId::ALL[..=5].to_vec());
        assert_eq!(engine.cursor().last_active, Some(5));
        assert_eq!(engine.cursor().current_active, Some(5));
    }

    #[test]
    fn test_forward_activation_continues_from_cursor() {
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());
        let mut engine = engine();

        let first = engine.activate(2, &mut canvas).unwrap();
        let second = engine.activate(5, &mut canvas).unwrap();

        assert_eq!(first, vec![SectionId::Intro, SectionId::CountTitle, SectionId::Grid]);
        assert_eq!(
            second,
            vec![SectionId::HighlightPositive, SectionId::HighlightNegative, SectionId::ShowBar]
        );
    }

    #[test]
    fn test_backward_activation_descends() {
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());
        let mut engine = engine();
        engine.activate(5, &mut canvas).unwrap();

        let visited = engine.activate(1, &mut canvas).unwrap();

        assert_eq!(
            visited,
            vec![
                SectionId::HighlightNegative,
                SectionId::HighlightPositive,
                SectionId::Grid,
                SectionId::CountTitle
            ]
        );
        assert_eq!(engine.cursor().last_active, Some(1));
    }

    #[test]
    fn test_repeat_activation_is_noop() {
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());
        let mut engine = engine();
        engine.activate(3, &mut canvas).unwrap();
        let batches = canvas.renderer().batches.len();

        let visited = engine.activate(3, &mut canvas).unwrap();

        assert!(visited.is_empty());
        assert_eq!(canvas.renderer().batches.len(), batches);
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());
        let mut engine = engine();
        engine.activate(2, &mut canvas).unwrap();
        let batches = canvas.renderer().batches.len();

        let result = engine.activate(SectionId::COUNT, &mut canvas);

        assert!(matches!(result, Err(ScrollError::SectionOutOfRange { index: 7, count: 7 })));
        assert_eq!(engine.cursor().last_active, Some(2));
        assert_eq!(canvas.renderer().batches.len(), batches);
    }

    #[test]
    fn test_update_dispatches_to_section() {
        let registry = SectionRegistry::default().with_update(SectionId::Grid, |progress| {
            vec![Transition::select(Selection::CountTitle).opacity(progress)]
        });
        let engine = SectionEngine::new(registry, EngineCursor::default());
        let mut canvas = canvas(&two_records(), RecordingRenderer::new());

        engine.update(SectionId::Intro.index(), 0.5, &mut canvas).unwrap();
        assert!(canvas.renderer().batches.is_empty());

        engine.update(SectionId::Grid.index(), 0.5, &mut canvas).unwrap();
        assert_eq!(canvas.renderer().batches.len(), 1);
        assert!(engine.update(9, 0.5, &mut canvas).is_err());
    }

    /// Activate each index of `path` in turn on a fresh scene
    fn replay(records: &[RawRecord], path: &[usize], settle_each: bool) -> Canvas<Scene> {
        let mut canvas = canvas(records, Scene::new());
        let mut engine = engine();
        for &index in path {
            engine.activate(index, &mut canvas).unwrap();
            if settle_each {
                canvas.renderer_mut().settle();
            }
        }
        canvas.renderer_mut().settle();
        canvas
    }

    fn settled(records: &[RawRecord], target: usize) -> Canvas<Scene> {
        replay(records, &[target], false)
    }

    /// Baseline specs of the filled cells of `group`, in bind order
    fn filled(canvas: &Canvas<Scene>, group: ElementGroup) -> Vec<ElementSpec> {
        canvas
            .surface()
            .elements()
            .iter()
            .filter(|spec| spec.key.group == group && spec.filled)
            .cloned()
            .collect()
    }

    fn attrs(canvas: &Canvas<Scene>, key: &ElementKey) -> ElementAttrs {
        *canvas.renderer().attrs(key).unwrap()
    }

    fn assert_regrouped(canvas: &Canvas<Scene>, group: ElementGroup, accent: Color) {
        let cells = filled(canvas, group);
        assert!(!cells.is_empty());
        for cell in &cells {
            let now = attrs(canvas, &cell.key);
            assert_eq!((now.x, now.y), (cell.attrs.x, cell.attrs.y), "{:?}", cell.key);
            assert_eq!(now.fill, accent, "{:?}", cell.key);
            assert_eq!(now.opacity, 1.0, "{:?}", cell.key);
        }
    }

    fn assert_collapsed(canvas: &Canvas<Scene>, group: ElementGroup) {
        let band = *canvas.surface().band();
        for (i, cell) in filled(canvas, group).iter().enumerate() {
            let now = attrs(canvas, &cell.key);
            assert_eq!(now.x, 0.0, "{:?}", cell.key);
            assert_eq!(now.y, band.wrapped_center(i), "{:?}", cell.key);
            assert_eq!(now.opacity, 0.0, "{:?}", cell.key);
        }
    }

    fn group_attrs(canvas: &Canvas<Scene>, group: ElementGroup) -> Vec<ElementAttrs> {
        canvas
            .renderer()
            .elements()
            .filter(|spec| spec.key.group == group)
            .map(|spec| spec.attrs)
            .collect()
    }

    #[test]
    fn test_grid_reveals_every_positive_cell() {
        let canvas = settled(&mixed_records(180), SectionId::Grid.index());
        let grid = Palette::default().grid;

        let cells = group_attrs(&canvas, ElementGroup::PositiveCells);
        assert_eq!(cells.len(), 180);
        for cell in cells {
            assert_eq!(cell.opacity, 1.0);
            assert_eq!(cell.fill, grid);
        }
        let title = attrs(&canvas, &ElementKey::new(ElementGroup::CountTitle, "title"));
        assert_eq!(title.opacity, 0.0);
    }

    #[test]
    fn test_highlight_positive_configuration() {
        let palette = Palette::default();
        let canvas = settled(&mixed_records(180), SectionId::HighlightPositive.index());

        assert_regrouped(&canvas, ElementGroup::PositiveCells, palette.positive);
        assert_collapsed(&canvas, ElementGroup::NegativeCells);

        for spec in canvas.renderer().elements() {
            match spec.key.group {
                ElementGroup::PositiveCells if !spec.filled => {
                    assert_eq!(spec.attrs.opacity, 1.0);
                    assert_eq!(spec.attrs.fill, palette.grid);
                }
                ElementGroup::NegativeCells => assert_eq!(spec.attrs.opacity, 0.0),
                _ => {}
            }
        }
        assert_eq!(attrs(&canvas, &ElementKey::new(ElementGroup::Axis, "x")).opacity, 0.0);
    }

    #[test]
    fn test_highlight_negative_configuration() {
        let palette = Palette::default();
        let canvas = settled(&mixed_records(180), SectionId::HighlightNegative.index());

        assert_regrouped(&canvas, ElementGroup::NegativeCells, palette.negative);
        assert_collapsed(&canvas, ElementGroup::PositiveCells);

        let r1 = attrs(&canvas, &ElementKey::new(ElementGroup::NegativeCells, "r1"));
        assert_eq!((r1.x, r1.y), (8.0, 0.0));
        for cell in group_attrs(&canvas, ElementGroup::PositiveCells) {
            assert_eq!(cell.opacity, 0.0);
        }
        for bar in group_attrs(&canvas, ElementGroup::Bars) {
            assert_eq!(bar.width, 0.0);
        }
        for label in group_attrs(&canvas, ElementGroup::BarLabels) {
            assert_eq!(label.opacity, 0.0);
        }
        assert_eq!(attrs(&canvas, &ElementKey::new(ElementGroup::Axis, "x")).opacity, 0.0);
    }

    #[test]
    fn test_jump_matches_stepwise_scroll() {
        let records = mixed_records(180);
        let cases: [(&[usize], &[usize]); 4] = [
            (&[5], &[0, 1, 2, 3, 4, 5]),
            (&[2, 5], &[0, 1, 2, 3, 4, 5]),
            (&[6, 1], &[0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1]),
            (&[5, 3], &[0, 1, 2, 3, 4, 5, 4, 3]),
        ];

        for (jump, steps) in cases {
            let jumped = replay(&records, jump, false);
            let stepped = replay(&records, steps, true);
            assert_eq!(
                jumped.renderer().snapshot().elements,
                stepped.renderer().snapshot().elements,
                "jump {:?}",
                jump
            );
        }
    }

    #[test]
    fn test_backward_jump_restores_count_title() {
        let canvas = replay(&mixed_records(180), &[6, 1], false);

        let title = attrs(&canvas, &ElementKey::new(ElementGroup::CountTitle, "title"));
        assert_eq!(title.opacity, 1.0);
        assert_eq!(attrs(&canvas, &ElementKey::new(ElementGroup::Axis, "x")).opacity, 0.0);
        for cell in group_attrs(&canvas, ElementGroup::PositiveCells) {
            assert_eq!(cell.opacity, 0.0);
        }
    }

    #[test]
    fn test_two_record_bars_fill_width() {
        let mut canvas = canvas(&two_records(), Scene::new());
        let mut engine = engine();

        engine.activate(5, &mut canvas).unwrap();
        canvas.renderer_mut().settle();

        let scene = canvas.renderer();
        for key in ["joy", "anger"] {
            let bar = scene.attrs(&ElementKey::new(ElementGroup::Bars, key)).unwrap();
            assert_eq!(bar.width, 600.0);
        }
        let axis = scene.attrs(&ElementKey::new(ElementGroup::Axis, "x")).unwrap();
        assert_eq!(axis.opacity, 1.0);
    }

    #[test]
    fn test_hide_bar_retracts() {
        let mut canvas = canvas(&two_records(), Scene::new());
        let mut engine = engine();

        engine.activate(6, &mut canvas).unwrap();
        canvas.renderer_mut().settle();

        let scene = canvas.renderer();
        let bar = scene.attrs(&ElementKey::new(ElementGroup::Bars, "joy")).unwrap();
        let label = scene.attrs(&ElementKey::new(ElementGroup::BarLabels, "joy")).unwrap();
        assert_eq!(bar.width, 0.0);
        assert_eq!(label.opacity, 0.0);
    }
}
