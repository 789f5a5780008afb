mod common;

use approx::assert_relative_eq;
use common::spawn_ball;
use riposte::math::{Point, Real};
use riposte::pipeline::CollisionPipeline;
use riposte::world::{Entity, World};

/// Builds 100 independent ball pairs, each in contact within its own
/// cluster.
fn spawn_pair_grid(world: &mut World) -> Vec<(Entity, Entity)> {
    let mut pairs = Vec::new();
    for i in 0..100 {
        let x = i as Real * 10.0;
        let a = spawn_ball(world, Point::new(x, 0.0, 0.0), 0.5);
        let b = spawn_ball(world, Point::new(x, 0.0, 0.9), 0.5);
        pairs.push((a, b));
    }
    pairs
}

fn contact_signature(world: &World, pipeline: &CollisionPipeline, a: Entity, b: Entity) -> Vec<[Real; 11]> {
    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let manifold = world.manifolds.get(manifold_entity).unwrap();

    let mut signature: Vec<[Real; 11]> = manifold
        .points()
        .map(|point| {
            let cp = world.contact_points.get(point).unwrap();
            [
                cp.pivot_a.x,
                cp.pivot_a.y,
                cp.pivot_a.z,
                cp.pivot_b.x,
                cp.pivot_b.y,
                cp.pivot_b.z,
                cp.normal_b.x,
                cp.normal_b.y,
                cp.normal_b.z,
                cp.distance,
                cp.lifetime as Real,
            ]
        })
        .collect();
    signature.sort_by(|lhs, rhs| lhs.partial_cmp(rhs).unwrap());
    signature
}

#[test]
fn serial_and_parallel_paths_agree() {
    let mut serial_world = World::new();
    let mut parallel_world = World::new();
    let mut serial = CollisionPipeline::new();
    let mut parallel = CollisionPipeline::new_parallel();

    let pairs = spawn_pair_grid(&mut serial_world);
    let parallel_pairs = spawn_pair_grid(&mut parallel_world);
    assert_eq!(pairs, parallel_pairs);

    // Two steps: the first creates the contacts, the second exercises the
    // merge path on both sides.
    for _ in 0..2 {
        serial.step(&mut serial_world);
        parallel.step(&mut parallel_world);
    }

    assert_eq!(
        serial.broad_phase.num_pairs(),
        parallel.broad_phase.num_pairs()
    );
    assert_eq!(
        serial_world.contact_points.len(),
        parallel_world.contact_points.len()
    );

    for &(a, b) in &pairs {
        let lhs = contact_signature(&serial_world, &serial, a, b);
        let rhs = contact_signature(&parallel_world, &parallel, a, b);
        assert_eq!(lhs.len(), 1);
        assert_eq!(lhs.len(), rhs.len());

        for (l, r) in lhs.iter().zip(rhs.iter()) {
            for (lv, rv) in l.iter().zip(r.iter()) {
                assert_relative_eq!(*lv, *rv, epsilon = 1.0e-6);
            }
        }
    }
}

#[test]
fn serial_runs_are_deterministic() {
    let run = || {
        let mut world = World::new();
        let mut pipeline = CollisionPipeline::new();
        let pairs = spawn_pair_grid(&mut world);

        for _ in 0..3 {
            pipeline.step(&mut world);
        }

        pairs
            .iter()
            .map(|&(a, b)| contact_signature(&world, &pipeline, a, b))
            .collect::<Vec<_>>()
    };

    // Byte-identical contact state, not merely within tolerance.
    assert_eq!(run(), run());
}

#[test]
fn the_parallel_path_requires_more_than_one_manifold() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new_parallel();

    let _ = spawn_ball(&mut world, Point::origin(), 0.5);
    let _ = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);

    // A single manifold falls back to the serial path; the step still
    // produces the contact.
    pipeline.step(&mut world);
    assert_eq!(world.contact_points.len(), 1);
}
