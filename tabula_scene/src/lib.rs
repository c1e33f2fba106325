// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabula Scene: a retained-mode 2D scene graph for canvas-drawn UIs.
//!
//! ## Overview
//!
//! A [`Scene`] is an arena of [`Node`]s addressed by generational [`NodeId`]s
//! and rooted at a single stage node. Each node carries:
//!
//! - a [`Transform`] (position, scale, pivot, skew, rotation) with lazily
//!   recomputed local and world [`Matrix`] caches,
//! - presentation state (z-index, alpha, visibility, [`Cursor`]),
//! - an optional [`HitArea`] and an optional visual payload `V`,
//! - a [`Listeners`] registry for pointer events.
//!
//! Children are kept in z-index order (stable, ascending) and re-sorted lazily
//! the next time the tree is walked.
//!
//! ## Frame loop
//!
//! 1) Mutate nodes freely; setters only mark transforms dirty.
//! 2) Call [`Scene::render`] (or [`Scene::update_transforms`] followed by
//!    [`Scene::draw`]). World matrices are rebuilt top-down and every visible
//!    node with a visual is handed a [`DrawContext`].
//! 3) Hit-test with [`Scene::hit_test`], which uses the cached world matrices.
//!
//! Event routing (capture, target, bubble, hover and press tracking) lives in
//! `tabula_dispatch`; this crate only provides the per-node registry and
//! [`Scene::emit`].
//!
//! ```
//! use kurbo::{Point, Rect};
//! use tabula_scene::Scene;
//!
//! let mut scene: Scene = Scene::new();
//! let root = scene.root();
//! let cell = scene.insert_named("A1");
//! scene.add_child(root, cell).unwrap();
//! scene.transform_mut(cell).unwrap().set_position((40.0, 20.0));
//! scene
//!     .node_mut(cell)
//!     .unwrap()
//!     .set_hit_area(Some(Box::new(Rect::new(0.0, 0.0, 80.0, 20.0))));
//!
//! scene.update_transforms();
//! assert_eq!(scene.hit_test(Point::new(50.0, 30.0)), Some(cell));
//! assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), None);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Float math goes through Kurbo;
//! enable exactly one of the `std` (default) or `libm` features.

#![no_std]

extern crate alloc;

mod event;
mod hit_area;
mod listeners;
mod matrix;
mod render;
mod transform;
mod tree;
mod types;

pub use kurbo::{Point, Vec2};

pub use event::{EventKind, EventPhase, PointerEvent};
pub use hit_area::{HitArea, Polygon, Visual};
pub use listeners::{Handler, ListenerId, ListenerOptions, ListenerPhase, Listeners};
pub use matrix::Matrix;
pub use render::{Draw, DrawContext};
pub use transform::{Transform, TransformDirty};
pub use tree::{Node, NodePath, Scene, TransformStats};
pub use types::{Cursor, NodeId, TreeError};
