// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.
//!
//! Every node owns a [`Listeners`] component mapping `(EventKind, ListenerPhase)`
//! to an ordered list of handlers. Handlers receive the whole [`Scene`], so
//! they may add, remove, or restyle nodes while an event is in flight.
//!
//! Invocation ([`Scene::emit`]) snapshots the list first:
//! - handlers registered during the step do not run in that step;
//! - a handler removed by an earlier handler in the same step is skipped;
//! - `once` handlers are unregistered right before they run.

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::event::{EventKind, PointerEvent};
use crate::tree::Scene;
use crate::types::NodeId;

/// A listener callback.
///
/// Handlers are `Fn`; keep mutable state in a `Cell`/`RefCell` you capture.
pub type Handler<V> = Rc<dyn Fn(&mut Scene<V>, &mut PointerEvent)>;

/// Which half of the propagation a listener is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerPhase {
    /// Runs on the way down (root → target) and first at the target.
    Capture,
    /// Runs second at the target and on the way up (target → root).
    Bubble,
}

/// Registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Register for the capture phase instead of the bubble phase.
    pub capture: bool,
    /// Unregister after the first invocation.
    pub once: bool,
}

impl ListenerOptions {
    /// Bubble-phase, persistent.
    pub const BUBBLE: Self = Self {
        capture: false,
        once: false,
    };

    /// Capture-phase, persistent.
    pub const CAPTURE: Self = Self {
        capture: true,
        once: false,
    };

    /// Marks the registration as one-shot.
    #[must_use]
    pub const fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub(crate) const fn phase(self) -> ListenerPhase {
        if self.capture {
            ListenerPhase::Capture
        } else {
            ListenerPhase::Bubble
        }
    }
}

/// Handle returned by [`Scene::add_listener`], used to unregister.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

struct Entry<V> {
    id: ListenerId,
    once: bool,
    handler: Handler<V>,
}

impl<V> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            handler: Rc::clone(&self.handler),
        }
    }
}

type Key = (EventKind, ListenerPhase);

/// The listener registry owned by a node.
pub struct Listeners<V> {
    map: HashMap<Key, SmallVec<[Entry<V>; 2]>>,
}

impl<V> Default for Listeners<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<V> fmt::Debug for Listeners<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, entries) in &self.map {
            map.entry(key, &entries.len());
        }
        map.finish()
    }
}

impl<V> Listeners<V> {
    pub(crate) fn insert(
        &mut self,
        id: ListenerId,
        kind: EventKind,
        options: ListenerOptions,
        handler: Handler<V>,
    ) {
        self.map
            .entry((kind, options.phase()))
            .or_default()
            .push(Entry {
                id,
                once: options.once,
                handler,
            });
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (key, entries) in &mut self.map {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                entries.remove(pos);
                found = true;
                if entries.is_empty() {
                    emptied = Some(*key);
                }
                break;
            }
        }
        if let Some(key) = emptied {
            self.map.remove(&key);
        }
        found
    }

    fn contains(&self, kind: EventKind, phase: ListenerPhase, id: ListenerId) -> bool {
        self.map
            .get(&(kind, phase))
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }

    fn snapshot(&self, kind: EventKind, phase: ListenerPhase) -> SmallVec<[Entry<V>; 4]> {
        self.map
            .get(&(kind, phase))
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of listeners registered for `kind` in `phase`.
    #[must_use]
    pub fn count(&self, kind: EventKind, phase: ListenerPhase) -> usize {
        self.map.get(&(kind, phase)).map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<V> Scene<V> {
    /// Registers `handler` on `node` for events of `kind`.
    ///
    /// Returns `None` if `node` is not alive.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        handler: impl Fn(&mut Self, &mut PointerEvent) + 'static,
    ) -> Option<ListenerId> {
        let id = self.next_listener_id();
        let n = self.node_mut(node)?;
        n.listeners.insert(id, kind, options, Rc::new(handler));
        Some(id)
    }

    /// Unregisters a listener. Returns `false` if it was not registered on `node`.
    pub fn remove_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.node_mut(node)
            .is_some_and(|n| n.listeners.remove(id))
    }

    /// Invokes `node`'s listeners for `event.kind` in `phase`, in registration order.
    ///
    /// Sets `event.current_target` to `node`. Does not look at or modify the
    /// propagation-stopped flag: every listener on the node runs. Returns the
    /// number of listeners invoked.
    pub fn emit(&mut self, node: NodeId, phase: ListenerPhase, event: &mut PointerEvent) -> usize {
        let kind = event.kind;
        let snapshot = match self.node(node) {
            Some(n) => n.listeners.snapshot(kind, phase),
            None => return 0,
        };

        event.current_target = Some(node);
        let mut invoked = 0;
        for entry in snapshot {
            let Some(n) = self.node_mut(node) else {
                // A handler destroyed the node.
                break;
            };
            if !n.listeners.contains(kind, phase, entry.id) {
                continue;
            }
            if entry.once {
                n.listeners.remove(entry.id);
            }
            (entry.handler)(self, event);
            invoked += 1;
        }
        invoked
    }
}
