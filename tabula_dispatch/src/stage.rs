// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tabula_scene::{Draw, PointerEvent, Scene, TransformStats, Visual};

use crate::boundary::{BoundaryConfig, EventBoundary};

/// A scene paired with its event boundary.
#[derive(Debug)]
pub struct Stage<V = ()> {
    scene: Scene<V>,
    boundary: EventBoundary,
}

impl<V> Default for Stage<V> {
    fn default() -> Self {
        Self::new(BoundaryConfig::default())
    }
}

impl<V> Stage<V> {
    /// Creates an empty scene with a fresh boundary.
    #[must_use]
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            scene: Scene::new(),
            boundary: EventBoundary::new(config),
        }
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene<V> {
        &self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene<V> {
        &mut self.scene
    }

    /// The boundary.
    #[must_use]
    pub fn boundary(&self) -> &EventBoundary {
        &self.boundary
    }

    /// Both halves at once, for callers driving the boundary by hand.
    pub fn split_mut(&mut self) -> (&mut Scene<V>, &mut EventBoundary) {
        (&mut self.scene, &mut self.boundary)
    }

    /// Routes one event through the boundary.
    pub fn dispatch(&mut self, event: &mut PointerEvent)
    where
        V: Visual,
    {
        self.boundary.dispatch(&mut self.scene, event);
    }

    /// Forwards a pointer-left-surface notification to the boundary.
    pub fn pointer_left_surface(&mut self, event: &mut PointerEvent) {
        self.boundary.pointer_left_surface(&mut self.scene, event);
    }

    /// Runs the transform pass and draws the scene onto `renderer`.
    pub fn render<R: ?Sized>(&mut self, renderer: &mut R) -> TransformStats
    where
        V: Draw<R>,
    {
        self.scene.render(renderer)
    }
}
