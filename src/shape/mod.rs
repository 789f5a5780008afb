//! Collision shapes supported by the contact pipeline.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::half_space::HalfSpace;
pub use self::shape::{ShapeKind, ShapeType};

mod ball;
mod capsule;
mod cuboid;
mod cylinder;
mod half_space;
mod shape;
