// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, cursors, and errors.

use core::fmt;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// A small, copyable handle consisting of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On [`Scene::remove`](crate::Scene::remove), the slot is freed and any
///   existing `NodeId` pointing at it becomes stale.
/// - On reuse of a freed slot, its generation is incremented, so a stale
///   `NodeId` never aliases the new node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Packs the handle into a `u64` (generation in the high bits).
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.1 as u64) << 32) | self.0 as u64
    }
}

/// Pointer cursor a node requests while hovered.
///
/// The keywords mirror CSS `cursor` values; [`Cursor::as_css_str`] gives the
/// string form for surfaces that take CSS names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Let the platform decide.
    #[default]
    Auto,
    /// Platform default arrow.
    Default,
    /// Link / clickable hand.
    Pointer,
    /// Text insertion bar.
    Text,
    /// Spreadsheet cell plus.
    Cell,
    /// Precise crosshair.
    Crosshair,
    /// Something can be moved.
    Move,
    /// Something can be grabbed.
    Grab,
    /// Something is being dragged.
    Grabbing,
    /// The action is not allowed.
    NotAllowed,
    /// A column edge can be resized.
    ColResize,
    /// A row edge can be resized.
    RowResize,
    /// East/west resize.
    EwResize,
    /// North/south resize.
    NsResize,
}

impl Cursor {
    /// The CSS keyword for this cursor.
    #[must_use]
    pub const fn as_css_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::Text => "text",
            Self::Cell => "cell",
            Self::Crosshair => "crosshair",
            Self::Move => "move",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::NotAllowed => "not-allowed",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css_str())
    }
}

/// Error returned by fallible tree mutations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The handle does not refer to a live node.
    StaleNode(NodeId),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child (an ancestor of, or equal to, `parent`).
        child: NodeId,
    },
    /// The scene root cannot be attached under another node.
    Root(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNode(id) => write!(f, "node {id:?} is not alive"),
            Self::Cycle { parent, child } => write!(
                f,
                "attaching {child:?} under {parent:?} would create a cycle"
            ),
            Self::Root(id) => write!(f, "root {id:?} cannot become a child"),
        }
    }
}

impl core::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn cursor_css_names() {
        assert_eq!(Cursor::default(), Cursor::Auto);
        assert_eq!(Cursor::ColResize.as_css_str(), "col-resize");
        assert_eq!(Cursor::NotAllowed.to_string(), "not-allowed");
    }

    #[test]
    fn node_id_bits_keep_generation() {
        let a = NodeId::new(3, 1);
        let b = NodeId::new(3, 2);
        assert_ne!(a.to_bits(), b.to_bits());
        assert_eq!(a.to_bits() & 0xFFFF_FFFF, 3);
    }

    #[test]
    fn tree_error_messages() {
        let e = TreeError::StaleNode(NodeId::new(0, 1));
        assert!(e.to_string().contains("not alive"));
        let e = TreeError::Root(NodeId::new(0, 1));
        assert!(e.to_string().contains("cannot become a child"));
    }
}
