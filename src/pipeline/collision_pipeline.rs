use crate::parallel::Job;
use crate::pipeline::{refresh_aabbs, BroadPhase, NarrowPhase};
use crate::world::World;

/// The per-step collision pipeline: AABB refresh, broadphase, narrowphase.
///
/// With parallelism enabled, the narrowphase runs its per-manifold work on
/// the worker pool whenever the world holds more than one manifold, and
/// commits the buffered entity mutations serially afterwards. The serial
/// and parallel paths produce the same contact state.
#[derive(Default)]
pub struct CollisionPipeline {
    /// The broadphase pair tracker.
    pub broad_phase: BroadPhase,
    /// The narrowphase.
    pub narrow_phase: NarrowPhase,
    /// Whether the narrowphase may take its parallel path.
    pub parallel: bool,
}

impl CollisionPipeline {
    /// Creates a pipeline running the narrowphase serially.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline running the narrowphase on the worker pool.
    pub fn new_parallel() -> Self {
        CollisionPipeline {
            parallel: true,
            ..Self::default()
        }
    }

    /// Advances the collision state by one step.
    pub fn step(&mut self, world: &mut World) {
        refresh_aabbs(world);
        self.broad_phase.update(world);

        if self.parallel && self.narrow_phase.parallelizable(world) {
            self.narrow_phase.update_parallel(world, Job::noop());
            self.narrow_phase.finish_parallel(world);
        } else {
            self.narrow_phase.update(world);
        }
    }
}
