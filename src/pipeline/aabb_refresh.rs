use crate::bounding_volume::Aabb;
use crate::world::{Entity, World};

/// Recomputes the world-space AABB of every awake body.
///
/// Runs before the broadphase. Sleeping bodies are skipped; their AABBs
/// are still valid from their last active step. Entities carrying an AABB
/// but no shape or pose are left untouched.
pub fn refresh_aabbs(world: &mut World) {
    let mut targets: Vec<Entity> = world
        .aabbs
        .entities()
        .filter(|entity| !world.is_sleeping(*entity))
        .collect();
    targets.sort_unstable();

    for entity in targets {
        let Some(pose) = world.pose(entity) else {
            continue;
        };
        let Some(shape) = world.shapes.get(entity).copied() else {
            continue;
        };

        let aabb = shape.aabb(&pose);
        if let Some(stored) = world.aabbs.get_mut(entity) {
            *stored = aabb;
            let _ = world.dirty.entry(entity).updated::<Aabb>();
        }
    }
}
