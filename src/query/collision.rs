use crate::math::{Point, Real, Vector, MAX_CONTACTS};
use arrayvec::ArrayVec;

/// A single closest-point result produced by a collision routine.
///
/// Pivots are contact anchors expressed in each body's local frame.
/// `normal_b` is unit-length, expressed in the second body's local frame,
/// and points from the second body toward the first. `distance` is the
/// signed separation along the world-space normal:
/// `dot(n_world, pivot_a_world - pivot_b_world)`; it is negative when the
/// shapes penetrate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionPoint {
    /// The contact anchor on the first body, in its local frame.
    pub pivot_a: Point<Real>,
    /// The contact anchor on the second body, in its local frame.
    pub pivot_b: Point<Real>,
    /// The contact normal in the second body's local frame.
    pub normal_b: Vector<Real>,
    /// The signed separation along the normal.
    pub distance: Real,
}

/// The set of closest points reported by one collision routine invocation.
///
/// Holds at most [`MAX_CONTACTS`] points; routines producing more
/// candidates keep the deepest ones.
#[derive(Clone, Debug, Default)]
pub struct CollisionResult {
    /// The collision points, at most [`MAX_CONTACTS`] of them.
    pub points: ArrayVec<CollisionPoint, MAX_CONTACTS>,
}

impl CollisionResult {
    /// An empty result.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of points in this result.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this result holds no point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds `point` to this result. When the result is full, the shallowest
    /// stored point is replaced if `point` is deeper than it.
    pub fn push_deepest(&mut self, point: CollisionPoint) {
        if let Err(err) = self.points.try_push(point) {
            let point = err.element();
            let mut shallowest = 0;
            for i in 1..self.points.len() {
                if self.points[i].distance > self.points[shallowest].distance {
                    shallowest = i;
                }
            }

            if point.distance < self.points[shallowest].distance {
                self.points[shallowest] = point;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_at(distance: Real) -> CollisionPoint {
        CollisionPoint {
            pivot_a: Point::origin(),
            pivot_b: Point::origin(),
            normal_b: Vector::y(),
            distance,
        }
    }

    #[test]
    fn push_deepest_keeps_the_deepest_points() {
        let mut result = CollisionResult::new();
        for d in [0.0, -0.1, 0.01, -0.2] {
            result.push_deepest(point_at(d));
        }
        assert_eq!(result.len(), MAX_CONTACTS);

        result.push_deepest(point_at(-0.05));
        let distances: Vec<_> = result.points.iter().map(|p| p.distance).collect();
        assert!(distances.contains(&-0.05));
        assert!(!distances.contains(&0.01));

        result.push_deepest(point_at(0.5));
        assert!(!result.points.iter().any(|p| p.distance == 0.5));
    }
}
