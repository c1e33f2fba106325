// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tabula_scene::{Cursor, EventKind, Point, Vec2};

/// Platform notification type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// A button went down over the surface.
    PointerDown,
    /// A button was released.
    PointerUp,
    /// The pointer moved over the surface.
    PointerMove,
    /// The pointer left the surface.
    PointerLeave,
    /// Wheel or trackpad scroll.
    Wheel,
}

impl NativeKind {
    /// The scene event kind this notification is dispatched as.
    ///
    /// `PointerLeave` has no scene event; it only clears hover state.
    #[must_use]
    pub const fn event_kind(self) -> Option<EventKind> {
        match self {
            Self::PointerDown => Some(EventKind::MouseDown),
            Self::PointerUp => Some(EventKind::MouseUp),
            Self::PointerMove => Some(EventKind::MouseMove),
            Self::Wheel => Some(EventKind::Wheel),
            Self::PointerLeave => None,
        }
    }
}

/// A platform pointer or wheel notification, in surface coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NativeEvent {
    /// Notification type.
    pub kind: NativeKind,
    /// Position relative to the surface's top-left corner, in CSS/logical pixels.
    pub offset: Point,
    /// Button that changed state.
    pub button: i16,
    /// Bitmask of held buttons.
    pub buttons: u16,
    /// Wheel deltas; ignored for non-wheel notifications.
    pub delta: Vec2,
    /// Whether the platform flagged the notification as user-generated.
    pub is_trusted: bool,
    /// Milliseconds since an arbitrary epoch.
    pub timestamp: u64,
}

impl NativeEvent {
    /// A trusted notification of `kind` at `offset` with everything else zeroed.
    #[must_use]
    pub fn new(kind: NativeKind, offset: impl Into<Point>) -> Self {
        Self {
            kind,
            offset: offset.into(),
            button: 0,
            buttons: 0,
            delta: Vec2::ZERO,
            is_trusted: true,
            timestamp: 0,
        }
    }

    /// Sets the changed button and the held-buttons mask.
    #[must_use]
    pub fn with_buttons(mut self, button: i16, buttons: u16) -> Self {
        self.button = button;
        self.buttons = buttons;
        self
    }

    /// Sets the wheel delta.
    #[must_use]
    pub fn with_delta(mut self, delta: impl Into<Vec2>) -> Self {
        self.delta = delta.into();
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at_time(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// The drawing surface the adapter reports cursor changes to.
pub trait Surface {
    /// Shows `cursor` over the surface.
    fn set_cursor(&mut self, cursor: Cursor);
}

impl<F: FnMut(Cursor)> Surface for F {
    fn set_cursor(&mut self, cursor: Cursor) {
        self(cursor);
    }
}
