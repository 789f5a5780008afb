//! The reference entity store consumed by the contact pipeline.
//!
//! Bodies, manifolds, contact points and constraint rows are entities
//! carrying components stored in typed columns. The pipeline stages only
//! touch the store through the column API and the view structs, and report
//! every lifecycle event through the per-entity [`Dirty`] log.

pub use self::column::{Column, ParColumnAccess};
pub use self::components::{CombinedMaterial, LinVel, Material, Orientation, Position};
pub use self::dirty::{Component, ComponentId, ComponentRegistry, Dirty, DirtyKind, DirtyLog};
pub use self::entity::Entity;
pub use self::world::{BodyView, TransformView, World};

mod column;
mod components;
mod dirty;
mod entity;
mod world;
