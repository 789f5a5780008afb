use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::{Ball, Capsule, Cuboid, Cylinder, HalfSpace};

/// The type of a shape, used for pair-wise dispatch of the collision
/// routines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A ball.
    Ball,
    /// A cuboid.
    Cuboid,
    /// A half-space.
    HalfSpace,
    /// A capsule.
    Capsule,
    /// A cylinder.
    Cylinder,
}

/// A collision shape, as a tagged variant over the supported shape types.
///
/// The contact pipeline dispatches on pairs of variants rather than on
/// trait objects, so the set of shapes is closed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum ShapeKind {
    /// A ball.
    Ball(Ball),
    /// A cuboid.
    Cuboid(Cuboid),
    /// A half-space.
    HalfSpace(HalfSpace),
    /// A capsule.
    Capsule(Capsule),
    /// A cylinder.
    Cylinder(Cylinder),
}

impl ShapeKind {
    /// The type tag of this shape.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Ball(_) => ShapeType::Ball,
            ShapeKind::Cuboid(_) => ShapeType::Cuboid,
            ShapeKind::HalfSpace(_) => ShapeType::HalfSpace,
            ShapeKind::Capsule(_) => ShapeType::Capsule,
            ShapeKind::Cylinder(_) => ShapeType::Cylinder,
        }
    }

    /// Computes the world-space AABB of this shape transformed by `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        match self {
            ShapeKind::Ball(s) => s.aabb(pos),
            ShapeKind::Cuboid(s) => s.aabb(pos),
            ShapeKind::HalfSpace(s) => s.aabb(pos),
            ShapeKind::Capsule(s) => s.aabb(pos),
            ShapeKind::Cylinder(s) => s.aabb(pos),
        }
    }
}

impl From<Ball> for ShapeKind {
    fn from(s: Ball) -> Self {
        ShapeKind::Ball(s)
    }
}

impl From<Cuboid> for ShapeKind {
    fn from(s: Cuboid) -> Self {
        ShapeKind::Cuboid(s)
    }
}

impl From<HalfSpace> for ShapeKind {
    fn from(s: HalfSpace) -> Self {
        ShapeKind::HalfSpace(s)
    }
}

impl From<Capsule> for ShapeKind {
    fn from(s: Capsule) -> Self {
        ShapeKind::Capsule(s)
    }
}

impl From<Cylinder> for ShapeKind {
    fn from(s: Cylinder) -> Self {
        ShapeKind::Cylinder(s)
    }
}
