// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabula Dispatch: pointer event routing for [`tabula_scene`] scenes.
//!
//! ## Overview
//!
//! An [`EventBoundary`] owns the pointer state of one scene and turns raw
//! pointer events into listener invocations:
//!
//! - `MouseDown`: hit-test, propagate, remember the pressed path per button.
//! - `MouseUp`: hit-test, propagate, then synthesize exactly one `Click` at
//!   the deepest node shared by the press path and the release path.
//! - `MouseMove`: diff the hover path and fire `MouseOut`, `MouseLeave`,
//!   `MouseOver`, `MouseEnter`, `MouseMove` as needed; resolve the cursor.
//! - `Wheel` and everything else: hit-test and propagate.
//!
//! Propagation runs capture listeners root→target, the target's capture then
//! bubble listeners, then bubble listeners target→root. Enter and leave only
//! notify their own node. Any listener may call
//! [`PointerEvent::stop_propagation`](tabula_scene::PointerEvent::stop_propagation)
//! to end the walk after the current node.
//!
//! ```
//! use kurbo::Rect;
//! use tabula_dispatch::{BoundaryConfig, Stage};
//! use tabula_scene::{Cursor, EventKind, Point, PointerEvent};
//!
//! let mut stage: Stage = Stage::new(BoundaryConfig::default());
//! let scene = stage.scene_mut();
//! let button = scene.insert();
//! scene.add_child(scene.root(), button).unwrap();
//! let node = scene.node_mut(button).unwrap();
//! node.set_hit_area(Some(Box::new(Rect::new(0.0, 0.0, 30.0, 10.0))));
//! node.set_cursor(Cursor::Pointer);
//! scene.update_transforms();
//!
//! let mut ev = PointerEvent::new(EventKind::MouseMove, Point::new(5.0, 5.0));
//! stage.dispatch(&mut ev);
//! assert_eq!(stage.boundary().cursor(), Cursor::Pointer);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod boundary;
mod propagate;
mod stage;

pub use boundary::{BoundaryConfig, EventBoundary, SurfaceLeavePolicy};
pub use propagate::{notify_target, propagate};
pub use stage::Stage;
