//! Renderer seam
//!
//! The drawing backend is an external collaborator. It receives the bound
//! element set once (and again on rebind) and a stream of tweens to play on
//! its own clock. Nothing here waits for an animation to finish.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;

use crate::surface::{ElementSpec, RenderSurface, Viewport};
use crate::transition::{Transition, Tween};

/// A backend that can draw the canvas elements and animate them
pub trait Renderer {
    /// Size the outer drawing area
    fn resize(&mut self, viewport: Viewport);

    /// Insert or update elements by key. Must never duplicate a key.
    fn reconcile(&mut self, elements: &[ElementSpec]);

    /// Play a batch of tweens. A tween for an element attribute supersedes
    /// any tween for the same attribute from an earlier batch.
    fn schedule(&mut self, tweens: Vec<Tween>);
}

/// A bound render surface paired with the backend drawing it
#[derive(Debug)]
pub struct Canvas<R: Renderer> {
    surface: RenderSurface,
    renderer: R,
}

impl<R: Renderer> Canvas<R> {
    /// Hand the surface baseline to the renderer
    pub fn bootstrap(surface: RenderSurface, mut renderer: R) -> Self {
        renderer.resize(surface.viewport());
        renderer.reconcile(surface.elements());
        debug!("Canvas bootstrapped with {} elements", surface.elements().len());
        Self { surface, renderer }
    }

    /// Replace the bound surface; the renderer reconciles by key
    pub fn rebind(&mut self, surface: RenderSurface) {
        self.renderer.resize(surface.viewport());
        self.renderer.reconcile(surface.elements());
        self.surface = surface;
    }

    /// Resolve and schedule transitions, one renderer batch per transition
    pub fn apply(&mut self, transitions: &[Transition]) {
        for transition in transitions {
            let tweens = self.surface.resolve(transition);
            if !tweens.is_empty() {
                self.renderer.schedule(tweens);
            }
        }
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

/// Renderer that only records what it is asked to do
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub viewport: Option<Viewport>,
    pub reconciled: Vec<ElementSpec>,
    pub batches: Vec<Vec<Tween>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn reconcile(&mut self, elements: &[ElementSpec]) {
        for spec in elements {
            match self.reconciled.iter_mut().find(|existing| existing.key == spec.key) {
                Some(existing) => *existing = spec.clone(),
                None => self.reconciled.push(spec.clone()),
            }
        }
    }

    fn schedule(&mut self, tweens: Vec<Tween>) {
        self.batches.push(tweens);
    }
}
