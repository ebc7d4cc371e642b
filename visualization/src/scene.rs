//! In-memory retained scene
//!
//! Reference [`Renderer`] that keeps every element's attributes in memory
//! and plays tweens against a millisecond clock that only moves when told
//! to. It is what the demo binary renders into and what the tests inspect.
//!
//! Superseding is per element attribute: scheduling a tween for
//! `(element, attr)` drops every pending or running tween for that pair
//! that came from an earlier batch. The last section to ask for an
//! attribute wins, however many sections were activated in between.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::renderer::Renderer;
use crate::surface::{ElementAttrs, ElementKey, ElementSpec, Viewport};
use crate::transition::{Attr, AttrValue, Tween};

#[derive(Debug, Clone)]
struct ActiveTween {
    attr: Attr,
    batch: u64,
    start_at: u64,
    duration_ms: u64,
    easing: EasingFunction,
    /// Captured when the tween starts
    from: Option<AttrValue>,
    target: AttrValue,
}

impl ActiveTween {
    fn end_at(&self) -> u64 {
        self.start_at + self.duration_ms
    }
}

#[derive(Debug, Clone)]
struct SceneElement {
    spec: ElementSpec,
    tweens: Vec<ActiveTween>,
}

/// Serializable view of the scene at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub clock_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    clock_ms: u64,
    viewport: Option<Viewport>,
    next_batch: u64,
    elements: BTreeMap<ElementKey, SceneElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, key: &ElementKey) -> Option<&ElementSpec> {
        self.elements.get(key).map(|e| &e.spec)
    }

    pub fn attrs(&self, key: &ElementKey) -> Option<&ElementAttrs> {
        self.get(key).map(|spec| &spec.attrs)
    }

    /// Elements in key order
    pub fn elements(&self) -> impl Iterator<Item = &ElementSpec> + '_ {
        self.elements.values().map(|e| &e.spec)
    }

    pub fn pending_tweens(&self) -> usize {
        self.elements.values().map(|e| e.tweens.len()).sum()
    }

    pub fn is_idle(&self) -> bool {
        self.elements.values().all(|e| e.tweens.is_empty())
    }

    /// Move the clock forward and apply every tween that is due
    pub fn advance(&mut self, ms: u64) {
        let now = self.clock_ms.saturating_add(ms);

        for SceneElement { spec, tweens } in self.elements.values_mut() {
            if tweens.is_empty() {
                continue;
            }
            tweens.sort_by_key(|t| (t.start_at, t.batch));

            let attrs = &mut spec.attrs;
            tweens.retain_mut(|tween| {
                if tween.start_at > now {
                    return true;
                }
                let from = *tween.from.get_or_insert_with(|| attrs.get(tween.attr));
                let elapsed = now - tween.start_at;
                if elapsed >= tween.duration_ms {
                    attrs.set(tween.attr, tween.target);
                    false
                } else {
                    let t = tween.easing.apply(elapsed as f64 / tween.duration_ms as f64);
                    attrs.set(tween.attr, from.interpolate(tween.target, t));
                    true
                }
            });
        }

        self.clock_ms = now;
    }

    /// Run every pending tween to completion
    pub fn settle(&mut self) {
        let horizon = self
            .elements
            .values()
            .flat_map(|e| e.tweens.iter().map(ActiveTween::end_at))
            .max();

        if let Some(end) = horizon {
            self.advance(end.saturating_sub(self.clock_ms));
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            clock_ms: self.clock_ms,
            viewport: self.viewport,
            elements: self.elements().cloned().collect(),
        }
    }
}

impl Renderer for Scene {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn reconcile(&mut self, elements: &[ElementSpec]) {
        for spec in elements {
            self.elements
                .entry(spec.key.clone())
                .and_modify(|existing| existing.spec = spec.clone())
                .or_insert_with(|| SceneElement {
                    spec: spec.clone(),
                    tweens: Vec::new(),
                });
        }
    }

    fn schedule(&mut self, tweens: Vec<Tween>) {
        let batch = self.next_batch;
        self.next_batch += 1;
        let now = self.clock_ms;

        for tween in tweens {
            let Some(element) = self.elements.get_mut(&tween.element) else {
                warn!("Tween for unknown element {:?} dropped", tween.element);
                continue;
            };

            let before = element.tweens.len();
            element.tweens.retain(|t| t.batch == batch || t.attr != tween.attr);
            if element.tweens.len() < before {
                trace!("{:?} {:?} superseded by batch {}", tween.element, tween.attr, batch);
            }

            element.tweens.push(ActiveTween {
                attr: tween.attr,
                batch,
                start_at: now + tween.start_ms,
                duration_ms: tween.duration_ms,
                easing: tween.easing,
                from: None,
                target: tween.target,
            });
        }
    }
}
