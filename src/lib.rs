/*!
riposte
========

**riposte** is the collision bookkeeping core of a rigid-body physics
engine: every simulation step it refreshes world-space bounding boxes,
tracks which body pairs overlap (broadphase), runs exact shape-vs-shape
collision routines for each tracked pair (narrowphase), and maintains a
persistent, fixed-capacity *contact manifold* per pair so that accumulated
solver impulses survive from one frame to the next.

The crate is organized around a small reference entity store
([`world::World`]): bodies, manifolds, contact points and constraint rows
are all entities carrying components, and the per-step stages in
[`pipeline`] communicate exclusively through typed component columns. The
narrowphase can run its per-manifold work on a thread pool; entity
creation and destruction are buffered during the parallel region and
applied in a serial commit phase.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod parallel;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod utils;
pub mod world;
