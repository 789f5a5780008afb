use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::Ball;

/// A capsule shape defined as the set of points at distance `radius` from
/// the segment joining its two endpoints, aligned with the local `y` axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Capsule {
    /// Half the distance between the centers of the capsule's hemispherical
    /// caps.
    pub half_height: Real,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule aligned with the local `y` axis.
    #[inline]
    pub fn new(half_height: Real, radius: Real) -> Capsule {
        Capsule {
            half_height,
            radius,
        }
    }

    /// The endpoints of this capsule's inner segment, in its local frame.
    #[inline]
    pub fn endpoints(&self) -> [Point<Real>; 2] {
        [
            Point::new(0.0, -self.half_height, 0.0),
            Point::new(0.0, self.half_height, 0.0),
        ]
    }

    /// Computes the world-space AABB of this capsule transformed by `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let cap = Ball::new(self.radius);
        let [a, b] = self.endpoints();
        let aabb_a = cap.aabb(&Isometry::from_parts((pos * a).coords.into(), pos.rotation));
        let aabb_b = cap.aabb(&Isometry::from_parts((pos * b).coords.into(), pos.rotation));
        aabb_a.merged(&aabb_b)
    }
}
