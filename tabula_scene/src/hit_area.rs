// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit areas: local-space containment predicates.
//!
//! A node is hit-testable only if it carries a [`HitArea`] or its visual
//! reports intrinsic geometry through [`Visual::contains`]. Bare containers
//! are transparent to hits.
//!
//! All provided implementations reject non-finite points, so a point mapped
//! through a singular world transform is never reported as inside.

use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Ellipse, Point, Rect, RoundedRect, Shape};

/// A containment predicate over a node's local coordinate space.
pub trait HitArea {
    /// Returns `true` if `local` lies inside the area.
    fn contains(&self, local: Point) -> bool;
}

/// Intrinsic geometry of a node's visual payload.
///
/// Nodes without a [`HitArea`] fall back to this. The default reports no
/// geometry, which makes the node transparent to hits.
pub trait Visual {
    /// Returns `true` if `local` lies inside the visual's filled geometry.
    fn contains(&self, local: Point) -> bool {
        let _ = local;
        false
    }
}

impl Visual for () {}

impl HitArea for Rect {
    fn contains(&self, local: Point) -> bool {
        // Closed on all edges so cells sharing a border both claim the border line.
        local.is_finite()
            && local.x >= self.x0
            && local.x <= self.x1
            && local.y >= self.y0
            && local.y <= self.y1
    }
}

impl HitArea for Circle {
    fn contains(&self, local: Point) -> bool {
        local.is_finite() && (local - self.center).hypot2() <= self.radius * self.radius
    }
}

impl HitArea for Ellipse {
    fn contains(&self, local: Point) -> bool {
        local.is_finite() && Shape::contains(self, local)
    }
}

impl HitArea for RoundedRect {
    fn contains(&self, local: Point) -> bool {
        local.is_finite() && Shape::contains(self, local)
    }
}

impl HitArea for BezPath {
    fn contains(&self, local: Point) -> bool {
        local.is_finite() && Shape::contains(self, local)
    }
}

impl<F> HitArea for F
where
    F: Fn(Point) -> bool,
{
    fn contains(&self, local: Point) -> bool {
        local.is_finite() && self(local)
    }
}

/// A closed polygon given by its vertices, tested with the non-zero winding rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Vertices in order; the last vertex connects back to the first.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    fn winding(&self, pt: Point) -> i32 {
        let n = self.points.len();
        let mut winding = 0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let side = (b.x - a.x) * (pt.y - a.y) - (pt.x - a.x) * (b.y - a.y);
            if a.y <= pt.y {
                if b.y > pt.y && side > 0.0 {
                    winding += 1;
                }
            } else if b.y <= pt.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }
}

impl HitArea for Polygon {
    fn contains(&self, local: Point) -> bool {
        self.points.len() >= 3 && local.is_finite() && self.winding(local) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::RoundedRectRadii;

    const NAN_PT: Point = Point::new(f64::NAN, f64::NAN);

    #[test]
    fn rect_is_closed() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(HitArea::contains(&r, Point::new(10.0, 10.0)));
        assert!(!HitArea::contains(&r, Point::new(10.1, 5.0)));
    }

    #[test]
    fn circle_and_ellipse() {
        let c = Circle::new((0.0, 0.0), 5.0);
        assert!(HitArea::contains(&c, Point::new(3.0, 4.0)));
        assert!(!HitArea::contains(&c, Point::new(4.0, 4.0)));

        let e = Ellipse::new((0.0, 0.0), (10.0, 2.0), 0.0);
        assert!(HitArea::contains(&e, Point::new(9.0, 0.0)));
        assert!(!HitArea::contains(&e, Point::new(0.0, 3.0)));
    }

    #[test]
    fn rounded_corners_exclude_the_corner() {
        let rr = RoundedRect::from_rect(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            RoundedRectRadii::new(10.0, 0.0, 0.0, 0.0),
        );
        assert!(!HitArea::contains(&rr, Point::new(1.0, 1.0)));
        // Square top-right corner.
        assert!(HitArea::contains(&rr, Point::new(99.5, 0.5)));
    }

    #[test]
    fn polygon_non_zero() {
        let tri = Polygon::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(tri.contains(Point::new(2.0, 2.0)));
        assert!(!tri.contains(Point::new(8.0, 8.0)));
        assert!(!Polygon::default().contains(Point::ZERO));
    }

    #[test]
    fn non_finite_points_never_hit() {
        let areas: [&dyn HitArea; 5] = [
            &Rect::new(-1e300, -1e300, 1e300, 1e300),
            &Circle::new((0.0, 0.0), f64::INFINITY),
            &Polygon::new([
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(0.0, 1.0),
            ]),
            &|_: Point| true,
            &Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1),
        ];
        for area in areas {
            assert!(!area.contains(NAN_PT));
            assert!(!area.contains(Point::new(f64::INFINITY, 0.0)));
        }
    }
}
