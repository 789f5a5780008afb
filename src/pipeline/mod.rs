//! The per-step contact maintenance stages.
//!
//! Data flow of one step, driven by [`CollisionPipeline::step`]:
//!
//! 1. [`refresh_aabbs`] recomputes the world-space AABB of every awake
//!    body.
//! 2. [`BroadPhase::update`] reconciles the pair table with the new AABBs,
//!    creating a [`ContactManifold`] per fresh overlap and destroying the
//!    manifolds (and contact points) of separated pairs, with hysteresis
//!    between the two margins.
//! 3. [`NarrowPhase`] refreshes persisted contact distances, then runs the
//!    shape collision routine for each manifold, merges the result into
//!    the manifold's persistent points, and prunes points that separated.
//!
//! Every entity lifecycle event is reported through the world's dirty log.

pub use self::aabb_refresh::refresh_aabbs;
pub use self::broad_phase::{BroadPhase, PairEvent, BREAK_OFFSET, SEPARATION_OFFSET};
pub use self::collision_pipeline::CollisionPipeline;
pub use self::contact_manifold::ContactManifold;
pub use self::contact_point::{ContactConstraint, ContactPoint, ConstraintRow, MAX_ROWS};
pub use self::narrow_phase::NarrowPhase;

mod aabb_refresh;
mod broad_phase;
mod collision_pipeline;
mod contact_manifold;
mod contact_point;
mod narrow_phase;
