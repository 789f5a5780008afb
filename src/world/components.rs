use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Rotation, Vector, LARGE_SCALAR};
use crate::shape::ShapeKind;
use crate::world::Component;

/// The world-space position of a body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position(pub Point<Real>);

/// The world-space orientation of a body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orientation(pub Rotation<Real>);

/// The linear velocity of a body.
///
/// The contact pipeline itself never reads it; it is carried, registered
/// and shipped through the dirty log like any other body component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinVel(pub Vector<Real>);

/// Description of the surface and compliance of a body.
///
/// All coefficients are nonnegative. A stiffness or damping at or above
/// [`LARGE_SCALAR`] means the body is rigid along that coefficient.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    /// The restitution coefficient.
    pub restitution: Real,
    /// The friction coefficient.
    pub friction: Real,
    /// The contact stiffness.
    pub stiffness: Real,
    /// The contact damping.
    pub damping: Real,
}

impl Material {
    /// Creates a rigid material with the given restitution and friction.
    pub fn rigid(restitution: Real, friction: Real) -> Self {
        Material {
            restitution,
            friction,
            stiffness: LARGE_SCALAR,
            damping: LARGE_SCALAR,
        }
    }

    /// Creates a compliant material.
    pub fn compliant(restitution: Real, friction: Real, stiffness: Real, damping: Real) -> Self {
        Material {
            restitution,
            friction,
            stiffness,
            damping,
        }
    }

    /// Whether this material's stiffness denotes a rigid contact.
    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.stiffness >= LARGE_SCALAR
    }

    /// Combines the materials of two touching bodies.
    ///
    /// Restitution and friction multiply. Stiffness and damping combine in
    /// series, unless both materials are rigid, in which case the combined
    /// pair stays at [`LARGE_SCALAR`].
    pub fn combine(a: &Material, b: &Material) -> CombinedMaterial {
        let (stiffness, damping) = if a.is_rigid() && b.is_rigid() {
            (LARGE_SCALAR, LARGE_SCALAR)
        } else {
            (
                1.0 / (1.0 / a.stiffness + 1.0 / b.stiffness),
                1.0 / (1.0 / a.damping + 1.0 / b.damping),
            )
        };

        CombinedMaterial {
            restitution: a.restitution * b.restitution,
            friction: a.friction * b.friction,
            stiffness,
            damping,
        }
    }
}

/// The effective coefficients of a contact between two materials.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombinedMaterial {
    /// The combined restitution coefficient.
    pub restitution: Real,
    /// The combined friction coefficient.
    pub friction: Real,
    /// The combined contact stiffness.
    pub stiffness: Real,
    /// The combined contact damping.
    pub damping: Real,
}

impl Component for Position {
    const NAME: &'static str = "position";
}

impl Component for Orientation {
    const NAME: &'static str = "orientation";
}

impl Component for LinVel {
    const NAME: &'static str = "linvel";
}

impl Component for Material {
    const NAME: &'static str = "material";
}

impl Component for Aabb {
    const NAME: &'static str = "aabb";
}

impl Component for ShapeKind {
    const NAME: &'static str = "shape";
}
