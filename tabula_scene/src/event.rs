// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer event record carried through a dispatch.

use kurbo::{Point, Vec2};

use crate::tree::Scene;
use crate::types::NodeId;

/// Event type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer button was pressed.
    MouseDown,
    /// A pointer button was released.
    MouseUp,
    /// The pointer moved.
    MouseMove,
    /// The pointer moved onto a new top target (bubbles).
    MouseOver,
    /// The pointer moved off the previous top target (bubbles).
    MouseOut,
    /// The pointer entered a node or one of its descendants (target only).
    MouseEnter,
    /// The pointer left a node and all of its descendants (target only).
    MouseLeave,
    /// A press and release resolved to a common node.
    Click,
    /// A wheel or trackpad scroll.
    Wheel,
    /// Application-defined event routed through the generic propagation path.
    Custom(u32),
}

/// Where a dispatch currently is in the capture → target → bubble sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    /// Walking from the root towards the target.
    Capturing,
    /// At the target node.
    AtTarget,
    /// Walking from the target back to the root.
    Bubbling,
}

/// The mutable event record handed to every listener.
///
/// A dispatcher may reuse one record across dispatches; listeners must not
/// keep assumptions about its contents past their own invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event type.
    pub kind: EventKind,
    /// The node the event is dispatched to.
    pub target: Option<NodeId>,
    /// The node whose listeners are currently running.
    pub current_target: Option<NodeId>,
    /// Current propagation phase.
    pub phase: EventPhase,
    /// Pointer position in scene (root) coordinates.
    pub global: Point,
    /// Button that changed state (0 primary, 1 auxiliary, 2 secondary, ...).
    pub button: i16,
    /// Bitmask of buttons currently held.
    pub buttons: u16,
    /// Wheel scroll amounts.
    pub delta: Vec2,
    /// Whether the event came from the user rather than a script.
    pub is_trusted: bool,
    /// Milliseconds since an arbitrary epoch.
    pub timestamp: u64,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Creates an undispatched event of `kind` at `global`.
    #[must_use]
    pub fn new(kind: EventKind, global: Point) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            global,
            button: 0,
            buttons: 0,
            delta: Vec2::ZERO,
            is_trusted: true,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Sets the changed button.
    #[must_use]
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Sets the wheel delta.
    #[must_use]
    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    /// Stops propagation after the current listener step.
    ///
    /// Remaining listeners on the current node still run; no further nodes are visited.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns `true` once a listener called [`stop_propagation`](Self::stop_propagation).
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Resets the stop flag at the start of a new dispatch.
    pub fn reset_propagation(&mut self) {
        self.propagation_stopped = false;
    }

    /// Maps [`global`](Self::global) into the current target's local space.
    ///
    /// Returns `None` without a current target or if the target is no longer alive.
    /// A collapsed (singular) node yields a non-finite point.
    pub fn local_point<V>(&self, scene: &Scene<V>) -> Option<Point> {
        let node = self.current_target?;
        Some(scene.world_transform(node)?.apply_inverse(self.global))
    }
}

impl Default for PointerEvent {
    fn default() -> Self {
        Self::new(EventKind::MouseMove, Point::ZERO)
    }
}
