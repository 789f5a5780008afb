//! Miscellaneous utilities.

use crate::math::{Isometry, Point, Real, Vector};

/// Extra operations with isometries.
pub trait IsometryOps {
    /// Transform a vector by the absolute value of the homogeneous matrix
    /// equivalent to `self`.
    fn absolute_transform_vector(&self, v: &Vector<Real>) -> Vector<Real>;
}

impl IsometryOps for Isometry<Real> {
    #[inline]
    fn absolute_transform_vector(&self, v: &Vector<Real>) -> Vector<Real> {
        self.rotation.to_rotation_matrix().into_inner().abs() * *v
    }
}

/// Twice the area of the largest quadrilateral spanned by four points.
///
/// Measured as the cross product of the quadrilateral's diagonals, taking
/// the maximum over the three ways of pairing the points into diagonals so
/// that the result does not depend on the order the points are given in.
#[inline]
pub fn max_quad_area_2x(
    p0: &Point<Real>,
    p1: &Point<Real>,
    p2: &Point<Real>,
    p3: &Point<Real>,
) -> Real {
    let a = (p2 - p0).cross(&(p3 - p1)).norm();
    let b = (p1 - p0).cross(&(p3 - p2)).norm();
    let c = (p3 - p0).cross(&(p2 - p1)).norm();
    a.max(b).max(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_area_of_unit_square() {
        let area = max_quad_area_2x(
            &Point::new(0.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 1.0),
            &Point::new(0.0, 0.0, 1.0),
        );
        approx::assert_relative_eq!(area, 2.0, epsilon = 1.0e-6);
    }

    #[test]
    fn quad_area_ignores_vertex_order() {
        let corners = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        // A crossed ordering of the same square.
        let crossed = max_quad_area_2x(&corners[2], &corners[0], &corners[1], &corners[3]);
        approx::assert_relative_eq!(crossed, 2.0, epsilon = 1.0e-6);
    }

    #[test]
    fn absolute_transform_of_rotated_extents() {
        let m = Isometry::rotation(Vector::y() * core::f64::consts::FRAC_PI_2 as Real);
        let v = m.absolute_transform_vector(&Vector::new(1.0, 2.0, 3.0));
        approx::assert_relative_eq!(v, Vector::new(3.0, 2.0, 1.0), epsilon = 1.0e-5);
    }
}
