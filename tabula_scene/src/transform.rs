// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node transform state with lazy local/world recomputation.
//!
//! A [`Transform`] owns the decomposed properties of a node (position, scale,
//! pivot, skew, rotation) and two cached matrices. Setting any property only
//! raises [`TransformDirty::LOCAL`]; nothing is recomputed until the render
//! driver walks the tree and calls [`Transform::update_transform`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::matrix::Matrix;

bitflags::bitflags! {
    /// Cached-matrix staleness for a [`Transform`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TransformDirty: u8 {
        /// A decomposed property changed since the local matrix was built.
        const LOCAL = 0b0000_0001;
        /// The world matrix must be recomposed from the parent's.
        const WORLD = 0b0000_0010;
    }
}

/// Decomposed transform properties plus cached local and world matrices.
#[derive(Clone, Debug)]
pub struct Transform {
    position: Point,
    scale: Vec2,
    pivot: Point,
    skew: Vec2,
    rotation: f64,
    pinned: Option<Matrix>,
    local: Matrix,
    world: Matrix,
    dirty: TransformDirty,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// An identity transform with clean caches.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Point::ZERO,
            scale: Vec2::new(1.0, 1.0),
            pivot: Point::ZERO,
            skew: Vec2::ZERO,
            rotation: 0.0,
            pinned: None,
            local: Matrix::IDENTITY,
            world: Matrix::IDENTITY,
            dirty: TransformDirty::empty(),
        }
    }

    /// Position of the pivot point in parent space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Sets the position.
    pub fn set_position(&mut self, position: impl Into<Point>) {
        self.position = position.into();
        self.on_change();
    }

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Sets the horizontal position.
    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
        self.on_change();
    }

    /// Vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Sets the vertical position.
    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
        self.on_change();
    }

    /// Scale factors.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Sets the scale factors.
    pub fn set_scale(&mut self, scale: impl Into<Vec2>) {
        self.scale = scale.into();
        self.on_change();
    }

    /// Local-space point that stays fixed under rotation, skew, and scale.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Sets the pivot.
    pub fn set_pivot(&mut self, pivot: impl Into<Point>) {
        self.pivot = pivot.into();
        self.on_change();
    }

    /// Skew angles in radians.
    #[must_use]
    pub fn skew(&self) -> Vec2 {
        self.skew
    }

    /// Sets the skew angles in radians.
    pub fn set_skew(&mut self, skew: impl Into<Vec2>) {
        self.skew = skew.into();
        self.on_change();
    }

    /// Rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
        self.on_change();
    }

    /// Rotation in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.rotation.to_degrees()
    }

    /// Sets the rotation in degrees.
    pub fn set_angle(&mut self, degrees: f64) {
        self.set_rotation(degrees.to_radians());
    }

    /// Pins the local matrix to `matrix`, bypassing the decomposed properties.
    ///
    /// The pinned matrix is used until [`clear_matrix_override`](Self::clear_matrix_override).
    pub fn set_from_matrix(&mut self, matrix: Matrix) {
        self.pinned = Some(matrix);
        self.on_change();
    }

    /// Returns to building the local matrix from the decomposed properties.
    pub fn clear_matrix_override(&mut self) {
        if self.pinned.take().is_some() {
            self.on_change();
        }
    }

    /// The cached local matrix (may be stale while [`TransformDirty::LOCAL`] is set).
    #[must_use]
    pub fn local(&self) -> &Matrix {
        &self.local
    }

    /// The cached world matrix (may be stale while [`TransformDirty::WORLD`] is set).
    #[must_use]
    pub fn world(&self) -> &Matrix {
        &self.world
    }

    /// Current dirty flags.
    #[must_use]
    pub fn dirty(&self) -> TransformDirty {
        self.dirty
    }

    /// Forces the next [`update_transform`](Self::update_transform) to recompose the world matrix.
    pub fn mark_world_dirty(&mut self) {
        self.dirty.insert(TransformDirty::WORLD);
    }

    fn on_change(&mut self) {
        self.dirty.insert(TransformDirty::LOCAL);
    }

    /// Rebuilds the local matrix if a property changed since the last rebuild.
    ///
    /// The linear part is `rotation · skew · scale`; translation is chosen so the
    /// pivot lands on `position`. A rebuild marks the world matrix dirty.
    pub fn update_local_transform(&mut self) {
        if !self.dirty.contains(TransformDirty::LOCAL) {
            return;
        }

        self.local = match self.pinned {
            Some(pinned) => pinned,
            None => {
                let (sin_r, cos_r) = (self.rotation.sin(), self.rotation.cos());
                let mut linear = Matrix::new(cos_r, sin_r, -sin_r, cos_r, 0.0, 0.0);
                linear
                    .append(&Matrix::new(
                        self.skew.y.cos(),
                        self.skew.y.sin(),
                        self.skew.x.sin(),
                        self.skew.x.cos(),
                        0.0,
                        0.0,
                    ))
                    .append(&Matrix::scale(self.scale.x, self.scale.y));

                let Matrix { a, b, c, d, .. } = linear;
                let tx = self.position.x - (a * self.pivot.x + c * self.pivot.y);
                let ty = self.position.y - (b * self.pivot.x + d * self.pivot.y);
                Matrix::new(a, b, c, d, tx, ty)
            }
        };

        self.dirty.remove(TransformDirty::LOCAL);
        self.dirty.insert(TransformDirty::WORLD);
    }

    /// Brings the local matrix up to date, then recomposes the world matrix
    /// (`local` applied first, then `parent_world`) if it is dirty.
    ///
    /// Returns `true` if the world matrix was recomputed.
    pub fn update_transform(&mut self, parent_world: &Matrix) -> bool {
        self.update_local_transform();

        if !self.dirty.contains(TransformDirty::WORLD) {
            return false;
        }

        let mut world = self.local;
        world.prepend(parent_world);
        self.world = world;
        self.dirty.remove(TransformDirty::WORLD);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn approx_eq(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn new_transform_is_clean_identity() {
        let t = Transform::new();
        assert!(t.dirty().is_empty());
        assert!(t.local().is_identity());
        assert!(t.world().is_identity());
    }

    #[test]
    fn setters_only_mark_local_dirty() {
        let mut t = Transform::new();
        t.set_position((5.0, 6.0));
        assert_eq!(t.dirty(), TransformDirty::LOCAL);
        assert!(t.local().is_identity(), "no eager recompute");
    }

    #[test]
    fn local_rebuild_sets_world_dirty_once() {
        let mut t = Transform::new();
        t.set_x(3.0);
        t.update_local_transform();
        assert_eq!(t.dirty(), TransformDirty::WORLD);
        assert_eq!(t.local().tx, 3.0);

        // Clean local: nothing changes.
        let before = *t.local();
        t.update_local_transform();
        assert_eq!(*t.local(), before);
    }

    #[test]
    fn update_transform_reports_recompute() {
        let mut t = Transform::new();
        assert!(!t.update_transform(&Matrix::IDENTITY), "clean transform skips");

        t.set_position((1.0, 2.0));
        assert!(t.update_transform(&Matrix::translate(10.0, 10.0)));
        assert_eq!(t.world().apply(Point::ZERO), Point::new(11.0, 12.0));
        assert!(!t.update_transform(&Matrix::translate(10.0, 10.0)));

        t.mark_world_dirty();
        assert!(t.update_transform(&Matrix::translate(20.0, 0.0)));
        assert_eq!(t.world().apply(Point::ZERO), Point::new(21.0, 2.0));
    }

    #[test]
    fn pivot_maps_onto_position() {
        let mut t = Transform::new();
        t.set_pivot((10.0, 5.0));
        t.set_position((100.0, 50.0));
        t.set_rotation(FRAC_PI_2);
        t.set_scale((2.0, 3.0));
        t.update_local_transform();
        assert!(approx_eq(t.local().apply(Point::new(10.0, 5.0)), Point::new(100.0, 50.0)));
    }

    #[test]
    fn rotation_quarter_turn() {
        let mut t = Transform::new();
        t.set_angle(90.0);
        t.update_local_transform();
        assert!(approx_eq(t.local().apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
        assert!((t.angle() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn skew_uses_cos_sin_layout() {
        let mut t = Transform::new();
        t.set_skew((0.3, 0.2));
        t.update_local_transform();
        let m = t.local();
        assert!((m.a - 0.2_f64.cos()).abs() < 1e-12);
        assert!((m.b - 0.2_f64.sin()).abs() < 1e-12);
        assert!((m.c - 0.3_f64.sin()).abs() < 1e-12);
        assert!((m.d - 0.3_f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn pinned_matrix_overrides_properties() {
        let mut t = Transform::new();
        t.set_position((50.0, 50.0));
        t.set_from_matrix(Matrix::scale(2.0, 2.0));
        t.update_transform(&Matrix::IDENTITY);
        assert_eq!(*t.local(), Matrix::scale(2.0, 2.0));
        assert!(t.dirty().is_empty());

        t.clear_matrix_override();
        t.update_transform(&Matrix::IDENTITY);
        assert_eq!(*t.local(), Matrix::translate(50.0, 50.0));
    }
}
