use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::utils::IsometryOps;

/// A cylinder shape aligned with the local `y` axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Cylinder {
    /// The half-height of the cylinder.
    pub half_height: Real,
    /// The radius of the cylinder.
    pub radius: Real,
}

impl Cylinder {
    /// Creates a new cylinder aligned with the local `y` axis.
    #[inline]
    pub fn new(half_height: Real, radius: Real) -> Cylinder {
        Cylinder {
            half_height,
            radius,
        }
    }

    /// Computes a world-space AABB enclosing this cylinder transformed by
    /// `pos`.
    ///
    /// The box bounds the cylinder's own bounding box, which is tight only
    /// for axis-aligned orientations.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let center = Point::from(pos.translation.vector);
        let local_half_extents = Vector::new(self.radius, self.half_height, self.radius);
        let ws_half_extents = pos.absolute_transform_vector(&local_half_extents);
        Aabb::from_half_extents(center, ws_half_extents)
    }
}
