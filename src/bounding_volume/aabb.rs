//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;
use num_traits::Bounded;

/// An Axis Aligned Bounding Box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates of this AABB.
    pub mins: Point<Real>,
    /// The point with the largest coordinates of this AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must have coordinates smaller or equal to the corresponding
    /// coordinates of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_value`
    /// and `maxs` components set to `-Real::max_value`.
    ///
    /// Often used as the initial value of a merge.
    #[inline]
    pub fn new_invalid() -> Self {
        let max: Real = Bounded::max_value();
        Self::new(Vector::repeat(max).into(), Vector::repeat(-max).into())
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.coords.inf(&other.mins.coords).into(),
            maxs: self.maxs.coords.sup(&other.maxs.coords).into(),
        }
    }

    /// Checks whether this AABB intersects `other`.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        for i in 0..DIM {
            if self.mins[i] > other.maxs[i] || other.mins[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Checks whether this AABB contains the point `pt`.
    #[inline]
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        for i in 0..DIM {
            if pt[i] < self.mins[i] || pt[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// A new AABB with each face pushed outward by `margin`.
    #[inline]
    pub fn loosened(&self, margin: Real) -> Aabb {
        debug_assert!(margin >= 0.0, "the loosening margin must be positive");
        let margin = Vector::repeat(margin);
        Aabb {
            mins: self.mins - margin,
            maxs: self.maxs + margin,
        }
    }

    /// A new AABB with each face pulled inward by `margin`.
    #[inline]
    pub fn tightened(&self, margin: Real) -> Aabb {
        debug_assert!(margin >= 0.0, "the tightening margin must be positive");
        let margin = Vector::repeat(margin);
        Aabb {
            mins: self.mins + margin,
            maxs: self.maxs - margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: Real) -> Aabb {
        Aabb::from_half_extents(Point::new(x, 0.0, 0.0), Vector::repeat(0.5))
    }

    #[test]
    fn intersects_is_inclusive_at_the_boundary() {
        assert!(unit_at(0.0).intersects(&unit_at(1.0)));
        assert!(!unit_at(0.0).intersects(&unit_at(1.001)));
    }

    #[test]
    fn loosened_bridges_a_gap() {
        let a = unit_at(0.0);
        let b = unit_at(1.01);
        assert!(!a.intersects(&b));
        assert!(a.loosened(0.02).intersects(&b));
    }

    #[test]
    fn merged_and_take_point_agree() {
        let mut a = unit_at(0.0);
        let b = unit_at(3.0);
        let merged = a.merged(&b);
        a.take_point(b.mins);
        a.take_point(b.maxs);
        assert_eq!(a, merged);
    }

    #[test]
    fn invalid_aabb_is_fixed_by_any_point() {
        let mut aabb = Aabb::new_invalid();
        aabb.take_point(Point::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.mins, aabb.maxs);
    }
}
