//! Linear algebra type aliases and the tunable constants of the contact
//! pipeline.

use na;

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub type Real = f64;

/// The scalar type used throughout this crate.
#[cfg(not(feature = "f64"))]
pub type Real = f32;

/// The dimension of the ambient space.
pub const DIM: usize = 3;

/// The point type.
pub type Point<N> = na::Point3<N>;

/// The vector type.
pub type Vector<N> = na::Vector3<N>;

/// The transformation matrix type.
pub type Isometry<N> = na::Isometry3<N>;

/// The orientation type.
pub type Rotation<N> = na::UnitQuaternion<N>;

/// The translation type.
pub type Translation<N> = na::Translation3<N>;

/// The unit vector type.
pub type UnitVector<N> = na::Unit<na::Vector3<N>>;

/// Maximum separation below which a persisted contact point is kept alive.
///
/// This is also the prediction margin handed to the shape collision
/// routines, and the margin used by the broadphase when deciding whether
/// two bounding boxes are close enough to start tracking.
pub const CONTACT_BREAKING_THRESHOLD: Real = 0.02;

/// Maximum drift of a contact pivot, in either body's local frame, below
/// which an incoming collision point is merged onto a persisted contact
/// instead of starting a new one.
pub const CONTACT_CACHING_THRESHOLD: Real = CONTACT_BREAKING_THRESHOLD;

/// Fixed capacity of a contact manifold.
pub const MAX_CONTACTS: usize = 4;

/// Sentinel above which a material stiffness or damping coefficient is
/// treated as rigid.
pub const LARGE_SCALAR: Real = 1.0e9;

/// General purpose epsilon for geometric degeneracy checks.
pub const EPSILON: Real = 1.0e-6;
