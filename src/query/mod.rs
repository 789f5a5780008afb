//! Shape-vs-shape collision routines.
//!
//! These routines produce the raw [`CollisionResult`]s consumed by the
//! narrowphase; they know nothing about manifolds, persistence or the
//! entity store.

pub use self::collide::collide;
pub use self::collision::{CollisionPoint, CollisionResult};
pub use self::error::Unsupported;

mod collide;
mod collision;
mod error;
