use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use num_traits::Bounded;

/// A half-space delimited by an infinite plane.
///
/// The plane contains the shape's position; everything on the opposite
/// side of `normal` belongs to the half-space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct HalfSpace {
    /// The halfspace planar boundary's outward normal, in local space.
    pub normal: UnitVector<Real>,
}

impl HalfSpace {
    /// Builds a new halfspace from its planar boundary's outward normal.
    #[inline]
    pub fn new(normal: UnitVector<Real>) -> HalfSpace {
        HalfSpace { normal }
    }

    /// Computes the world-space AABB of this half-space.
    ///
    /// A half-space is unbounded, so this is the largest representable AABB
    /// whatever the transform.
    #[inline]
    pub fn aabb(&self, _pos: &Isometry<Real>) -> Aabb {
        let max: Real = Bounded::max_value();
        Aabb::new(
            Point::from(Vector::repeat(-max)),
            Point::from(Vector::repeat(max)),
        )
    }
}
