// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event boundary: hit-testing, hover and press state, click synthesis.

use hashbrown::HashMap;
use tabula_scene::{Cursor, EventKind, NodeId, NodePath, PointerEvent, Scene, Visual};

use crate::propagate::{notify_target, propagate};

/// What to do when the pointer leaves the drawing surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SurfaceLeavePolicy {
    /// Forget the hover path silently and reset the cursor.
    #[default]
    ClearOnly,
    /// Fire `MouseOut` at the hovered node and `MouseLeave` at every node of
    /// the hover path (innermost first), then forget it.
    EmitLeave,
}

/// Boundary configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// Cursor reported when nothing is hovered.
    pub default_cursor: Cursor,
    /// Behavior on [`EventBoundary::pointer_left_surface`].
    pub surface_leave: SurfaceLeavePolicy,
}

/// Routes pointer events into one scene and tracks per-scene pointer state.
///
/// State owned by the boundary:
/// - the hover path (root→last hovered node),
/// - one press path per button, recorded on press and consumed on release,
/// - the cursor resolved by the last move.
///
/// Use one boundary per scene; boundaries never share state.
#[derive(Clone, Debug, Default)]
pub struct EventBoundary {
    config: BoundaryConfig,
    hover: NodePath,
    presses: HashMap<i16, NodePath>,
    cursor: Cursor,
}

impl EventBoundary {
    /// Creates a boundary with no hover or press state.
    #[must_use]
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config,
            hover: NodePath::new(),
            presses: HashMap::new(),
            cursor: config.default_cursor,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Root→hovered-node path; empty when nothing is hovered.
    #[must_use]
    pub fn hover_path(&self) -> &[NodeId] {
        &self.hover
    }

    /// The hovered node, if any.
    #[must_use]
    pub fn hover_target(&self) -> Option<NodeId> {
        self.hover.last().copied()
    }

    /// The path recorded when `button` was pressed, until it is released.
    #[must_use]
    pub fn press_path(&self, button: i16) -> Option<&[NodeId]> {
        self.presses.get(&button).map(|p| p.as_slice())
    }

    /// Cursor resolved by the last move or surface leave.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Routes `event` according to its kind.
    ///
    /// The scene is hit-tested against `event.global` using the world matrices
    /// from the last transform pass. Kinds without dedicated handling get a
    /// plain propagation to the hit node.
    pub fn dispatch<V: Visual>(&mut self, scene: &mut Scene<V>, event: &mut PointerEvent) {
        match event.kind {
            EventKind::MouseDown => self.press(scene, event),
            EventKind::MouseUp => self.release(scene, event),
            EventKind::MouseMove => self.moved(scene, event),
            EventKind::Wheel => Self::wheel(scene, event),
            _ => {
                if let Some(target) = scene.hit_test(event.global) {
                    propagate(scene, target, event);
                }
            }
        }
    }

    /// Propagates `event` to an explicit target without hit-testing.
    ///
    /// Returns `false` if a listener stopped propagation.
    pub fn dispatch_to<V>(
        &mut self,
        scene: &mut Scene<V>,
        target: NodeId,
        event: &mut PointerEvent,
    ) -> bool {
        propagate(scene, target, event)
    }

    fn press<V: Visual>(&mut self, scene: &mut Scene<V>, event: &mut PointerEvent) {
        let Some(target) = scene.hit_test(event.global) else {
            return;
        };
        let path = scene.composed_path(target);
        propagate(scene, target, event);
        log::debug!("button {} pressed on {target:?}", event.button);
        self.presses.insert(event.button, path);
    }

    fn release<V: Visual>(&mut self, scene: &mut Scene<V>, event: &mut PointerEvent) {
        let Some(target) = scene.hit_test(event.global) else {
            return;
        };
        let release_path = scene.composed_path(target);
        propagate(scene, target, event);

        let Some(press_path) = self.presses.remove(&event.button) else {
            log::trace!("release of button {} without a press", event.button);
            return;
        };
        let Some(&click) = press_path
            .iter()
            .rev()
            .find(|node| release_path.contains(node))
        else {
            return;
        };
        log::debug!("click synthesized at {click:?}");
        event.kind = EventKind::Click;
        propagate(scene, click, event);
    }

    fn moved<V: Visual>(&mut self, scene: &mut Scene<V>, event: &mut PointerEvent) {
        let hit = scene.hit_test(event.global);
        let new_path = hit.map(|t| scene.composed_path(t)).unwrap_or_default();
        let old_path = core::mem::take(&mut self.hover);
        let old_top = old_path.last().copied();

        if old_top != hit {
            let shared = old_path
                .iter()
                .zip(&new_path)
                .take_while(|(a, b)| a == b)
                .count();

            if let Some(old) = old_top {
                event.kind = EventKind::MouseOut;
                propagate(scene, old, event);

                event.kind = EventKind::MouseLeave;
                for &node in old_path[shared..].iter().rev() {
                    notify_target(scene, node, event);
                }
            }
            if let Some(new) = hit {
                event.kind = EventKind::MouseOver;
                propagate(scene, new, event);

                event.kind = EventKind::MouseEnter;
                for &node in &new_path[shared..] {
                    notify_target(scene, node, event);
                }
            }
            log::debug!("hover {old_top:?} -> {hit:?}");
        }

        if let Some(target) = hit {
            event.kind = EventKind::MouseMove;
            propagate(scene, target, event);
        }

        self.cursor = hit
            .and_then(|t| scene.node(t))
            .map_or(self.config.default_cursor, |n| n.cursor());
        self.hover = new_path;
        event.kind = EventKind::MouseMove;
    }

    fn wheel<V: Visual>(scene: &mut Scene<V>, event: &mut PointerEvent) {
        if let Some(target) = scene.hit_test(event.global) {
            propagate(scene, target, event);
        }
    }

    /// The pointer left the drawing surface.
    ///
    /// Clears the hover path and resets the cursor to the default. Under
    /// [`SurfaceLeavePolicy::EmitLeave`], out/leave events are fired first using
    /// `event` as the record.
    pub fn pointer_left_surface<V>(&mut self, scene: &mut Scene<V>, event: &mut PointerEvent) {
        let old_path = core::mem::take(&mut self.hover);
        self.cursor = self.config.default_cursor;
        log::debug!("pointer left surface, hover cleared");

        if self.config.surface_leave != SurfaceLeavePolicy::EmitLeave {
            return;
        }
        let Some(&old) = old_path.last() else {
            return;
        };
        event.kind = EventKind::MouseOut;
        propagate(scene, old, event);
        event.kind = EventKind::MouseLeave;
        for &node in old_path.iter().rev() {
            notify_target(scene, node, event);
        }
    }

    /// Drops all hover and press state, e.g. after the scene was rebuilt.
    pub fn reset(&mut self) {
        self.hover.clear();
        self.presses.clear();
        self.cursor = self.config.default_cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};

    fn scene_with_cell() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let cell = scene.insert();
        scene.add_child(scene.root(), cell).unwrap();
        let node = scene.node_mut(cell).unwrap();
        node.set_hit_area(Some(alloc::boxed::Box::new(Rect::new(0.0, 0.0, 10.0, 10.0))));
        node.set_cursor(Cursor::Cell);
        scene.update_transforms();
        (scene, cell)
    }

    #[test]
    fn move_resolves_cursor_and_hover() {
        let (mut scene, cell) = scene_with_cell();
        let mut boundary = EventBoundary::new(BoundaryConfig {
            default_cursor: Cursor::Default,
            ..BoundaryConfig::default()
        });
        assert_eq!(boundary.cursor(), Cursor::Default);

        let mut ev = PointerEvent::new(EventKind::MouseMove, Point::new(5.0, 5.0));
        boundary.dispatch(&mut scene, &mut ev);
        assert_eq!(boundary.cursor(), Cursor::Cell);
        assert_eq!(boundary.hover_path(), &[scene.root(), cell]);

        ev.global = Point::new(50.0, 50.0);
        boundary.dispatch(&mut scene, &mut ev);
        assert_eq!(boundary.cursor(), Cursor::Default);
        assert!(boundary.hover_path().is_empty());
    }

    #[test]
    fn press_path_is_consumed_by_release() {
        let (mut scene, cell) = scene_with_cell();
        let mut boundary = EventBoundary::default();
        let mut down = PointerEvent::new(EventKind::MouseDown, Point::new(5.0, 5.0)).with_button(2);
        boundary.dispatch(&mut scene, &mut down);
        assert_eq!(boundary.press_path(2), Some(&[scene.root(), cell][..]));
        assert_eq!(boundary.press_path(0), None);

        let mut up = PointerEvent::new(EventKind::MouseUp, Point::new(5.0, 5.0)).with_button(2);
        boundary.dispatch(&mut scene, &mut up);
        assert_eq!(boundary.press_path(2), None);
        assert_eq!(up.kind, EventKind::Click);
    }

    #[test]
    fn wheel_leaves_pointer_state_alone() {
        let (mut scene, _) = scene_with_cell();
        let mut boundary = EventBoundary::default();
        let mut ev = PointerEvent::new(EventKind::Wheel, Point::new(5.0, 5.0));
        boundary.dispatch(&mut scene, &mut ev);
        assert!(boundary.hover_path().is_empty());
        assert_eq!(boundary.cursor(), Cursor::Auto);
    }

    #[test]
    fn reset_forgets_everything() {
        let (mut scene, _) = scene_with_cell();
        let mut boundary = EventBoundary::default();
        for kind in [EventKind::MouseMove, EventKind::MouseDown] {
            let mut ev = PointerEvent::new(kind, Point::new(5.0, 5.0));
            boundary.dispatch(&mut scene, &mut ev);
        }
        boundary.reset();
        assert!(boundary.hover_path().is_empty());
        assert_eq!(boundary.press_path(0), None);
        assert_eq!(boundary.cursor(), Cursor::Auto);
    }
}
