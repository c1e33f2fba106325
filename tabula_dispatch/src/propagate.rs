// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture → target → bubble propagation over a snapshotted composed path.

use tabula_scene::{EventPhase, ListenerPhase, NodeId, PointerEvent, Scene};

/// Dispatches `event` to `target` with full propagation.
///
/// The root→target path is captured before any listener runs, so handlers may
/// restructure the tree without affecting this walk. Nodes destroyed mid-walk
/// are skipped. Returns `false` if propagation was stopped.
///
/// Order:
/// 1) capture listeners on each ancestor, root first;
/// 2) capture then bubble listeners on the target;
/// 3) bubble listeners on each ancestor, parent first.
///
/// A stop request ends the walk after the listeners of the current step.
pub fn propagate<V>(scene: &mut Scene<V>, target: NodeId, event: &mut PointerEvent) -> bool {
    let path = scene.composed_path(target);
    let Some((_, ancestors)) = path.split_last() else {
        log::trace!("{:?} to dead target {target:?} dropped", event.kind);
        return true;
    };

    event.target = Some(target);
    event.reset_propagation();
    log::trace!("propagating {:?} to {target:?}", event.kind);

    let completed = walk(scene, target, ancestors, event);
    event.phase = EventPhase::None;
    event.current_target = None;
    completed
}

fn walk<V>(
    scene: &mut Scene<V>,
    target: NodeId,
    ancestors: &[NodeId],
    event: &mut PointerEvent,
) -> bool {
    event.phase = EventPhase::Capturing;
    for &node in ancestors {
        scene.emit(node, ListenerPhase::Capture, event);
        if event.is_propagation_stopped() {
            log::trace!("{:?} stopped while capturing at {node:?}", event.kind);
            return false;
        }
    }

    event.phase = EventPhase::AtTarget;
    for phase in [ListenerPhase::Capture, ListenerPhase::Bubble] {
        scene.emit(target, phase, event);
        if event.is_propagation_stopped() {
            log::trace!("{:?} stopped at target {target:?}", event.kind);
            return false;
        }
    }

    event.phase = EventPhase::Bubbling;
    for &node in ancestors.iter().rev() {
        scene.emit(node, ListenerPhase::Bubble, event);
        if event.is_propagation_stopped() {
            log::trace!("{:?} stopped while bubbling at {node:?}", event.kind);
            return false;
        }
    }
    true
}

/// Notifies only `node`: its capture listeners, then its bubble listeners.
///
/// Used for `MouseEnter`/`MouseLeave`, which never walk ancestors.
pub fn notify_target<V>(scene: &mut Scene<V>, node: NodeId, event: &mut PointerEvent) {
    event.target = Some(node);
    event.phase = EventPhase::AtTarget;
    event.reset_propagation();
    scene.emit(node, ListenerPhase::Capture, event);
    scene.emit(node, ListenerPhase::Bubble, event);
    event.phase = EventPhase::None;
    event.current_target = None;
}
