// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named-field 2×3 affine matrix.
//!
//! The layout follows the canvas convention:
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```
//!
//! which is the same coefficient order as [`kurbo::Affine`], so conversions in
//! both directions are lossless.

use kurbo::{Affine, Point};

/// Determinants smaller than this in magnitude are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 2D affine transform mapping local coordinates to a parent (or global) space.
///
/// Mutating operations ([`append`](Self::append), [`prepend`](Self::prepend),
/// [`set`](Self::set)) work in place and return `&mut Self` so they can be chained.
/// [`apply`](Self::apply) and [`apply_inverse`](Self::apply_inverse) return new points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    /// Horizontal scale / rotation component.
    pub a: f64,
    /// Vertical skew / rotation component.
    pub b: f64,
    /// Horizontal skew / rotation component.
    pub c: f64,
    /// Vertical scale / rotation component.
    pub d: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from its six coefficients.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a pure translation.
    #[must_use]
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a non-uniform scale.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Overwrites all six coefficients.
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        *self = Self::new(a, b, c, d, tx, ty);
        self
    }

    /// Right-multiplies by `m`: the result applies `m` first, then `self`.
    pub fn append(&mut self, m: &Self) -> &mut Self {
        *self = Self {
            a: self.a * m.a + self.c * m.b,
            b: self.b * m.a + self.d * m.b,
            c: self.a * m.c + self.c * m.d,
            d: self.b * m.c + self.d * m.d,
            tx: self.a * m.tx + self.c * m.ty + self.tx,
            ty: self.b * m.tx + self.d * m.ty + self.ty,
        };
        self
    }

    /// Left-multiplies by `m`: the result applies `self` first, then `m`.
    pub fn prepend(&mut self, m: &Self) -> &mut Self {
        *self = Self {
            a: m.a * self.a + m.c * self.b,
            b: m.b * self.a + m.d * self.b,
            c: m.a * self.c + m.c * self.d,
            d: m.b * self.c + m.d * self.d,
            tx: m.a * self.tx + m.c * self.ty + m.tx,
            ty: m.b * self.tx + m.d * self.ty + m.ty,
        };
        self
    }

    /// Maps a local point forward into the target space.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Maps a point from the target space back into local space.
    ///
    /// A singular (or non-finite) matrix has no inverse; in that case both
    /// coordinates of the result are NaN. Hit areas treat non-finite points as
    /// outside, so a collapsed node can never produce a false positive.
    #[must_use]
    pub fn apply_inverse(&self, p: Point) -> Point {
        match self.inverse() {
            Some(inv) => inv.apply(p),
            None => Point::new(f64::NAN, f64::NAN),
        }
    }

    /// The determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns `true` if the matrix can be inverted.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() >= SINGULAR_EPSILON && self.is_finite()
    }

    /// Returns the inverse matrix, or `None` if the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let id = 1.0 / self.determinant();
        Some(Self {
            a: self.d * id,
            b: -self.b * id,
            c: -self.c * id,
            d: self.a * id,
            tx: (self.c * self.ty - self.d * self.tx) * id,
            ty: (self.b * self.tx - self.a * self.ty) * id,
        })
    }

    /// Returns `true` if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }

    /// Returns `true` if this is exactly the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self { a, b, c, d, tx, ty }
    }
}

impl From<Matrix> for Affine {
    fn from(m: Matrix) -> Self {
        Self::new([m.a, m.b, m.c, m.d, m.tx, m.ty])
    }
}
