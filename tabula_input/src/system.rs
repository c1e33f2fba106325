// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tabula_dispatch::{BoundaryConfig, EventBoundary};
use tabula_scene::{EventPhase, Point, PointerEvent, Scene, Vec2, Visual};

use crate::native::{NativeEvent, NativeKind, Surface};

/// Adapter configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputConfig {
    /// Physical pixels per surface pixel.
    ///
    /// Non-finite or non-positive values are treated as `1.0`.
    pub device_pixel_ratio: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
        }
    }
}

impl InputConfig {
    /// The ratio actually applied to surface coordinates.
    #[must_use]
    pub fn effective_ratio(&self) -> f64 {
        let dpr = self.device_pixel_ratio;
        if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
    }
}

/// Feeds native notifications for one surface into a scene.
///
/// Owns the scene's [`EventBoundary`] and a single event record that is
/// rewritten for every notification.
#[derive(Clone, Debug, Default)]
pub struct EventSystem {
    config: InputConfig,
    boundary: EventBoundary,
    record: PointerEvent,
}

impl EventSystem {
    /// Creates an adapter with a fresh boundary.
    #[must_use]
    pub fn new(config: InputConfig, boundary: BoundaryConfig) -> Self {
        Self {
            config,
            boundary: EventBoundary::new(boundary),
            record: PointerEvent::default(),
        }
    }

    /// The adapter configuration.
    #[must_use]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Updates the device pixel ratio, e.g. after the window moved to another display.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.config.device_pixel_ratio = ratio;
    }

    /// The boundary state.
    #[must_use]
    pub fn boundary(&self) -> &EventBoundary {
        &self.boundary
    }

    /// Mutable access to the boundary.
    pub fn boundary_mut(&mut self) -> &mut EventBoundary {
        &mut self.boundary
    }

    /// Handles one native notification.
    ///
    /// Pointer and wheel notifications are dispatched through the boundary. A
    /// leave notification clears hover state. After every notification the
    /// resolved cursor is pushed to `surface`.
    pub fn handle<V, S>(&mut self, scene: &mut Scene<V>, surface: &mut S, native: &NativeEvent)
    where
        V: Visual,
        S: Surface + ?Sized,
    {
        log::trace!("native {:?} at {:?}", native.kind, native.offset);
        self.bootstrap(native);

        match native.kind.event_kind() {
            Some(kind) => {
                self.record.kind = kind;
                self.boundary.dispatch(scene, &mut self.record);
            }
            None => self.boundary.pointer_left_surface(scene, &mut self.record),
        }
        surface.set_cursor(self.boundary.cursor());
    }

    fn bootstrap(&mut self, native: &NativeEvent) {
        let dpr = self.config.effective_ratio();
        let ev = &mut self.record;
        ev.target = None;
        ev.current_target = None;
        ev.phase = EventPhase::None;
        ev.reset_propagation();
        ev.is_trusted = native.is_trusted;
        ev.timestamp = native.timestamp;
        ev.global = Point::new(native.offset.x * dpr, native.offset.y * dpr);
        ev.button = native.button;
        ev.buttons = native.buttons;
        ev.delta = match native.kind {
            NativeKind::Wheel => native.delta,
            _ => Vec2::ZERO,
        };
    }

    /// The record as left by the last dispatch.
    #[must_use]
    pub fn last_event(&self) -> &PointerEvent {
        &self.record
    }
}
