//! Bounding volumes.

pub use self::aabb::Aabb;

mod aabb;
