// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node arena and its ownership operations.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

use crate::hit_area::{HitArea, Visual};
use crate::listeners::{ListenerId, Listeners};
use crate::matrix::Matrix;
use crate::transform::Transform;
use crate::types::{Cursor, NodeId, TreeError};

/// Root→node ancestor chain, inclusive on both ends.
pub type NodePath = SmallVec<[NodeId; 8]>;

/// A node: transform, presentation flags, optional hit area and visual, and its
/// place in the tree.
///
/// Every node can own children; a node with children plays the role of a
/// container. Ownership is single-parent: `parent` is a non-owning back-reference.
pub struct Node<V> {
    name: String,
    z_index: i32,
    alpha: f64,
    visible: bool,
    cursor: Cursor,
    hit_area: Option<Box<dyn HitArea>>,
    visual: Option<V>,
    pub(crate) transform: Transform,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) sort_dirty: bool,
    pub(crate) listeners: Listeners<V>,
}

impl<V> Node<V> {
    fn new(name: String) -> Self {
        Self {
            name,
            z_index: 0,
            alpha: 1.0,
            visible: true,
            cursor: Cursor::Auto,
            hit_area: None,
            visual: None,
            transform: Transform::new(),
            parent: None,
            children: Vec::new(),
            sort_dirty: false,
            listeners: Listeners::default(),
        }
    }

    /// Node name; used by [`Scene::remove_child_by_name`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stacking order among siblings; higher draws later and is hit first.
    ///
    /// Use [`Scene::set_z_index`] to change it so the parent is re-sorted.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Opacity multiplier in `0.0..=1.0`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sets the opacity multiplier.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Whether the node (and therefore its subtree) is drawn and hit-testable.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the node and its subtree.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Cursor requested while this node is the hover target.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Sets the hover cursor.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// The explicit hit area, if any.
    #[must_use]
    pub fn hit_area(&self) -> Option<&dyn HitArea> {
        self.hit_area.as_deref()
    }

    /// Assigns (or clears) the explicit hit area.
    pub fn set_hit_area(&mut self, area: Option<Box<dyn HitArea>>) {
        self.hit_area = area;
    }

    /// The visual payload drawn for this node.
    #[must_use]
    pub fn visual(&self) -> Option<&V> {
        self.visual.as_ref()
    }

    /// Mutable access to the visual payload.
    pub fn visual_mut(&mut self) -> Option<&mut V> {
        self.visual.as_mut()
    }

    /// Replaces the visual payload, returning the previous one.
    pub fn set_visual(&mut self, visual: Option<V>) -> Option<V> {
        core::mem::replace(&mut self.visual, visual)
    }

    /// The node's transform.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the transform. Setters only mark it dirty.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// The cached world matrix.
    #[must_use]
    pub fn world_transform(&self) -> &Matrix {
        self.transform.world()
    }

    /// The owning parent, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in render order (back to front).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether children must be re-sorted before the next walk.
    #[must_use]
    pub fn sort_dirty(&self) -> bool {
        self.sort_dirty
    }

    /// The node's listener registry.
    #[must_use]
    pub fn listeners(&self) -> &Listeners<V> {
        &self.listeners
    }
}

impl<V> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("z_index", &self.z_index)
            .field("alpha", &self.alpha)
            .field("visible", &self.visible)
            .field("cursor", &self.cursor)
            .field("has_hit_area", &self.hit_area.is_some())
            .field("has_visual", &self.visual.is_some())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("sort_dirty", &self.sort_dirty)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

struct Slot<V> {
    generation: u32,
    node: Option<Node<V>>,
}

/// A retained scene: an arena of [`Node`]s rooted at a single stage node.
///
/// `V` is the visual payload type drawn by the render driver; use `()` for
/// scenes that only need geometry and events.
pub struct Scene<V = ()> {
    slots: Vec<Slot<V>>,
    free: Vec<u32>,
    root: NodeId,
    next_listener: u64,
}

impl<V> fmt::Debug for Scene<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("live", &(self.slots.len() - self.free.len()))
            .finish_non_exhaustive()
    }
}

impl<V> Default for Scene<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Scene<V> {
    /// Creates a scene containing only the root node, named `"Stage"`.
    #[must_use]
    pub fn new() -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 1),
            next_listener: 0,
        };
        scene.root = scene.insert_named("Stage");
        scene
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached node.
    pub fn insert(&mut self) -> NodeId {
        self.insert_named(String::new())
    }

    /// Creates a detached node with a name.
    pub fn insert_named(&mut self, name: impl Into<String>) -> NodeId {
        let node = Node::new(name.into());
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            NodeId::new(idx, 1)
        }
    }

    /// Creates a node with a visual payload.
    pub fn insert_visual(&mut self, visual: V) -> NodeId {
        let id = self.insert();
        if let Some(n) = self.node_mut(id) {
            n.visual = Some(visual);
        }
        id
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Shared access to a live node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.node.as_ref())
    }

    /// Mutable access to a live node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.node.as_mut())
    }

    /// Parent of a live node.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of a live node in render order; empty for stale handles.
    #[must_use]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| &n.children)
    }

    /// Cached world matrix of a live node.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Option<&Matrix> {
        self.node(id).map(Node::world_transform)
    }

    /// Mutable access to a node's transform.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.transform)
    }

    /// Sets a node's z-index and marks its parent for re-sorting.
    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        if n.z_index == z_index {
            return;
        }
        n.z_index = z_index;
        if let Some(parent) = n.parent
            && let Some(p) = self.node_mut(parent)
        {
            p.sort_dirty = true;
        }
    }

    /// The root→`id` ancestor chain, inclusive. Empty for stale handles.
    #[must_use]
    pub fn composed_path(&self, id: NodeId) -> NodePath {
        let mut path = NodePath::new();
        let mut cur = self.node(id).map(|_| id);
        while let Some(node) = cur {
            path.push(node);
            cur = self.parent_of(node);
        }
        path.reverse();
        path
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return self.is_alive(n);
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// Appends `child` to `parent`'s children, detaching it from any previous parent first.
    ///
    /// # Errors
    ///
    /// - [`TreeError::StaleNode`] if either handle is dead.
    /// - [`TreeError::Root`] if `child` is the scene root.
    /// - [`TreeError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        for id in [parent, child] {
            if !self.is_alive(id) {
                log::warn!("add_child with stale node {id:?}");
                return Err(TreeError::StaleNode(id));
            }
        }
        if child == self.root {
            log::warn!("refusing to attach the root under {parent:?}");
            return Err(TreeError::Root(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("refusing to attach {child:?} under its descendant {parent:?}");
            return Err(TreeError::Cycle { parent, child });
        }

        if let Some(old) = self.parent_of(child) {
            self.remove_child(old, child);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
            p.sort_dirty = true;
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_world_dirty();
        }
        Ok(())
    }

    /// Detaches `child` from `parent`. No-op if it is not a child of `parent`.
    ///
    /// Returns `true` if the child was removed.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.node_mut(parent) else {
            return false;
        };
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return false;
        };
        p.children.remove(pos);
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
        true
    }

    /// Detaches the first child of `parent` named `name`.
    pub fn remove_child_by_name(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let child = self
            .children_of(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).is_some_and(|n| n.name == name))?;
        self.remove_child(parent, child);
        Some(child)
    }

    /// Detaches every child of `parent`, returning them in their previous order.
    pub fn remove_all_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let Some(p) = self.node_mut(parent) else {
            return Vec::new();
        };
        let children = core::mem::take(&mut p.children);
        for &c in &children {
            if let Some(n) = self.node_mut(c) {
                n.parent = None;
            }
        }
        children
    }

    /// Detaches `id` and frees it together with its whole subtree.
    ///
    /// The root cannot be removed. Returns the number of nodes freed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.is_alive(id) {
            return 0;
        }
        if let Some(parent) = self.parent_of(id) {
            self.remove_child(parent, id);
        }
        let mut stack = Vec::from([id]);
        let mut freed = 0;
        while let Some(cur) = stack.pop() {
            let slot = &mut self.slots[cur.idx()];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                self.free.push(cur.0);
                freed += 1;
            }
        }
        freed
    }

    /// Stable-sorts `id`'s children by ascending z-index if they are marked dirty.
    pub fn sort_children(&mut self, id: NodeId) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        if !n.sort_dirty {
            return;
        }
        let mut children = core::mem::take(&mut n.children);
        children.sort_by_key(|&c| self.node(c).map_or(0, |n| n.z_index));
        if let Some(n) = self.node_mut(id) {
            n.children = children;
            n.sort_dirty = false;
        }
    }

    pub(crate) fn next_listener_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Recomputes world transforms from the root down.
    ///
    /// See [`update_transforms_from`](Self::update_transforms_from).
    pub fn update_transforms(&mut self) -> TransformStats {
        self.update_transforms_from(self.root)
    }

    /// Recomputes world transforms for the subtree at `id`.
    ///
    /// For each visited node: sort its children if needed, then rebuild its
    /// world matrix from the parent's (identity for a node without a parent).
    /// Children of an invisible node are not visited and keep stale matrices.
    /// Children of a visible node are always marked world-dirty before they
    /// are visited, so a visible subtree is recomputed on every pass.
    pub fn update_transforms_from(&mut self, id: NodeId) -> TransformStats {
        let mut stats = TransformStats::default();
        let Some(start) = self.node(id) else {
            return stats;
        };
        let parent_world = start
            .parent
            .and_then(|p| self.world_transform(p).copied())
            .unwrap_or(Matrix::IDENTITY);

        let mut stack: Vec<(NodeId, Matrix)> = Vec::from([(id, parent_world)]);
        while let Some((cur, parent_world)) = stack.pop() {
            self.sort_children(cur);
            let Some(node) = self.node_mut(cur) else {
                continue;
            };
            stats.visited += 1;
            if node.transform.update_transform(&parent_world) {
                stats.recomputed += 1;
            }
            if !node.visible {
                continue;
            }
            let world = *node.transform.world();
            let children = core::mem::take(&mut node.children);
            for &child in children.iter().rev() {
                if let Some(c) = self.node_mut(child) {
                    c.transform.mark_world_dirty();
                    stack.push((child, world));
                }
            }
            if let Some(node) = self.node_mut(cur) {
                node.children = children;
            }
        }
        stats
    }
}

/// Counters reported by [`Scene::update_transforms`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Nodes whose transform was examined.
    pub visited: usize,
    /// Nodes whose world matrix was rebuilt.
    pub recomputed: usize,
}

impl<V: Visual> Scene<V> {
    /// Returns `true` if `global` falls inside `id`'s own geometry.
    ///
    /// Uses the node's hit area if it has one, otherwise its visual's
    /// intrinsic geometry. Children are not consulted.
    #[must_use]
    pub fn contains_point(&self, id: NodeId, global: Point) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let local = node.world_transform().apply_inverse(global);
        if !local.is_finite() {
            return false;
        }
        match (&node.hit_area, &node.visual) {
            (Some(area), _) => HitArea::contains(&**area, local),
            (None, Some(visual)) => Visual::contains(visual, local),
            (None, None) => false,
        }
    }

    /// Finds the deepest, topmost visible node containing `global`.
    ///
    /// Children are tested last-to-first before their parent; the first hit
    /// anywhere ends the search. Uses the world matrices cached by the last
    /// [`update_transforms`](Self::update_transforms).
    #[must_use]
    pub fn hit_test(&self, global: Point) -> Option<NodeId> {
        if !global.is_finite() {
            return None;
        }
        self.hit_test_from(self.root, global)
    }

    fn hit_test_from(&self, id: NodeId, global: Point) -> Option<NodeId> {
        // `(node, expanded)`: a node is tested on its second visit, once its
        // whole subtree has been searched.
        let mut stack: Vec<(NodeId, bool)> = Vec::from([(id, false)]);
        while let Some((cur, expanded)) = stack.pop() {
            if expanded {
                if self.contains_point(cur, global) {
                    return Some(cur);
                }
                continue;
            }
            let Some(node) = self.node(cur) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            stack.push((cur, true));
            // Last child on top so it is searched first.
            stack.extend(node.children.iter().map(|&c| (c, false)));
        }
        None
    }
}
