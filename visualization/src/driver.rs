//! Scroll tracker adapter
//!
//! Consumes the two event streams a scroll tracker produces and forwards
//! them to the session, keeping the narrative step highlight in sync.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ScrollError;
use crate::renderer::Renderer;
use crate::sections::SectionId;
use crate::vis::ScrollVis;

/// Opacity of the narrative step being read
pub const ACTIVE_STEP_OPACITY: f64 = 1.0;

/// Opacity of every other narrative step
pub const INACTIVE_STEP_OPACITY: f64 = 0.1;

/// Event emitted by the scroll tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollEvent {
    /// The section at this index became active
    Active(usize),
    /// Progress through the section at this index
    Progress(usize, f64),
}

#[derive(Debug)]
pub struct ScrollDriver<R: Renderer> {
    vis: ScrollVis<R>,
    active_step: Option<usize>,
}

impl<R: Renderer> ScrollDriver<R> {
    pub fn new(vis: ScrollVis<R>) -> Self {
        Self {
            vis,
            active_step: None,
        }
    }

    pub fn handle(&mut self, event: ScrollEvent) -> Result<(), ScrollError> {
        match event {
            ScrollEvent::Active(index) => {
                let visited = self.vis.activate(index)?;
                self.active_step = Some(index);
                debug!("Step {} active after {} activations", index, visited.len());
            }
            ScrollEvent::Progress(index, progress) => self.vis.update(index, progress)?,
        }
        Ok(())
    }

    /// Feed a sequence of events, stopping at the first error
    pub fn handle_all<I>(&mut self, events: I) -> Result<(), ScrollError>
    where
        I: IntoIterator<Item = ScrollEvent>,
    {
        events.into_iter().try_for_each(|event| self.handle(event))
    }

    /// Per-step text opacity; every step is fully visible until the first
    /// activation.
    pub fn step_opacities(&self) -> Vec<f64> {
        (0..SectionId::COUNT)
            .map(|step| match self.active_step {
                None => ACTIVE_STEP_OPACITY,
                Some(active) if active == step => ACTIVE_STEP_OPACITY,
                Some(_) => INACTIVE_STEP_OPACITY,
            })
            .collect()
    }

    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    pub fn vis(&self) -> &ScrollVis<R> {
        &self.vis
    }

    pub fn vis_mut(&mut self) -> &mut ScrollVis<R> {
        &mut self.vis
    }
}
