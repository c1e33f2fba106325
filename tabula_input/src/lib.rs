// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabula Input: turns platform pointer notifications into scene events.
//!
//! The embedder subscribes to pointer down/up/move/leave and wheel
//! notifications on its drawing surface (in capture mode, so nested elements
//! cannot swallow them), converts each into a [`NativeEvent`], and hands it to
//! [`EventSystem::handle`]. The adapter:
//!
//! 1) rewrites its single event record from the notification, scaling the
//!    surface offset by the device pixel ratio,
//! 2) dispatches it through its [`EventBoundary`](tabula_dispatch::EventBoundary),
//! 3) pushes the resolved [`Cursor`](tabula_scene::Cursor) to the [`Surface`].
//!
//! Listeners must not hold on to the record between dispatches; it is reused.
//!
//! ```
//! use tabula_dispatch::BoundaryConfig;
//! use tabula_input::{EventSystem, InputConfig, NativeEvent, NativeKind};
//! use tabula_scene::{Cursor, Scene};
//!
//! let mut scene: Scene = Scene::new();
//! let mut system = EventSystem::new(InputConfig::default(), BoundaryConfig::default());
//! let mut shown = Cursor::Default;
//! let mut surface = |c: Cursor| shown = c;
//!
//! let moved = NativeEvent::new(NativeKind::PointerMove, (4.0, 4.0));
//! system.handle(&mut scene, &mut surface, &moved);
//! assert_eq!(shown, Cursor::Auto);
//! ```

#![no_std]

mod native;
mod system;

pub use native::{NativeEvent, NativeKind, Surface};
pub use system::{EventSystem, InputConfig};
