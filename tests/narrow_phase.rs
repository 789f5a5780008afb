mod common;

use approx::assert_relative_eq;
use common::{first_row_impulse, move_body, set_row_impulses, spawn_ball};
use riposte::math::{Point, Vector};
use riposte::pipeline::CollisionPipeline;
use riposte::world::World;

#[test]
fn touching_balls_produce_one_contact() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);

    pipeline.step(&mut world);

    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let manifold = world.manifolds.get(manifold_entity).unwrap();
    assert_eq!(manifold.len(), 1);

    let cp = world.contact_points.get(manifold.point(0)).unwrap();
    assert_eq!(cp.body, [a, b]);
    assert_relative_eq!(cp.distance, -0.1, epsilon = 1.0e-5);
    assert_relative_eq!(cp.normal_b, Vector::new(0.0, 0.0, -1.0), epsilon = 1.0e-5);
    assert_relative_eq!(cp.pivot_a, Point::new(0.0, 0.0, 0.5), epsilon = 1.0e-5);
    assert_relative_eq!(cp.pivot_b, Point::new(0.0, 0.0, -0.5), epsilon = 1.0e-5);
    assert_eq!(cp.lifetime, 0);

    // Both bodies carry a rigid material: the contact got a constraint
    // with zeroed warm-start rows and multiplied coefficients.
    assert_relative_eq!(cp.restitution, 0.25, epsilon = 1.0e-6);
    assert_relative_eq!(cp.friction, 1.0, epsilon = 1.0e-6);
    let constraint = world.constraints.get(manifold.point(0)).unwrap();
    assert_eq!(constraint.rows().len(), 2);
    assert_eq!(first_row_impulse(&world, manifold.point(0)), 0.0);
}

#[test]
fn a_contact_within_the_breaking_threshold_persists() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);

    pipeline.step(&mut world);
    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let point = world.manifolds.get(manifold_entity).unwrap().point(0);

    // Separated by 0.015 < CONTACT_BREAKING_THRESHOLD: the same point
    // survives, merged, with a refreshed positive distance.
    move_body(&mut world, b, Point::new(0.0, 0.0, 1.015));
    pipeline.step(&mut world);

    let manifold = world.manifolds.get(manifold_entity).unwrap();
    assert_eq!(manifold.len(), 1);
    assert_eq!(manifold.point(0), point);
    let cp = world.contact_points.get(point).unwrap();
    assert_relative_eq!(cp.distance, 0.015, epsilon = 1.0e-5);
    assert_eq!(cp.lifetime, 1);

    // Separated by 0.04 > threshold: the point is pruned, the manifold
    // survives within the hysteresis window.
    move_body(&mut world, b, Point::new(0.0, 0.0, 1.04));
    pipeline.step(&mut world);

    assert!(world.contains(manifold_entity));
    assert_eq!(world.manifolds.get(manifold_entity).unwrap().len(), 0);
    assert!(!world.contains(point));

    // Separated past SEPARATION_OFFSET: the manifold goes too.
    move_body(&mut world, b, Point::new(0.0, 0.0, 1.06));
    pipeline.step(&mut world);
    assert!(!world.contains(manifold_entity));
}

#[test]
fn merging_preserves_warm_start_impulses() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);

    pipeline.step(&mut world);
    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let point = world.manifolds.get(manifold_entity).unwrap().point(0);
    set_row_impulses(&mut world, point, 5.0);

    // A sub-threshold drift merges onto the same point.
    move_body(&mut world, b, Point::new(0.0, 0.0, 0.905));
    pipeline.step(&mut world);

    let manifold = world.manifolds.get(manifold_entity).unwrap();
    assert_eq!(manifold.len(), 1);
    assert_eq!(manifold.point(0), point);
    assert_eq!(world.contact_points.get(point).unwrap().lifetime, 1);
    assert_eq!(first_row_impulse(&world, point), 5.0);
}

#[test]
fn a_flicked_contact_is_replaced_with_reset_state() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);

    pipeline.step(&mut world);
    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let old_point = world.manifolds.get(manifold_entity).unwrap().point(0);
    set_row_impulses(&mut world, old_point, 3.0);

    // One step moves the contact sideways by more than the caching
    // threshold: the slot content is logically new.
    move_body(&mut world, b, Point::new(0.12, 0.0, 0.89));
    pipeline.step(&mut world);

    let manifold = world.manifolds.get(manifold_entity).unwrap();
    assert_eq!(manifold.len(), 1);
    let cp = world.contact_points.get(manifold.point(0)).unwrap();
    assert_eq!(cp.lifetime, 0);
    assert_eq!(first_row_impulse(&world, manifold.point(0)), 0.0);
}

#[test]
fn persisted_distances_match_the_pose_arithmetic() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let _ = spawn_ball(&mut world, Point::origin(), 0.5);
    let _ = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);
    let _ = spawn_ball(&mut world, Point::new(3.0, 0.0, 0.0), 0.5);
    let _ = spawn_ball(&mut world, Point::new(3.0, 0.0, 0.95), 0.5);

    pipeline.step(&mut world);
    pipeline.step(&mut world);

    assert!(!world.contact_points.is_empty());
    for (_, cp) in world.contact_points.iter() {
        let pose_a = world.pose(cp.body[0]).unwrap();
        let pose_b = world.pose(cp.body[1]).unwrap();
        let pa = pose_a * cp.pivot_a;
        let pb = pose_b * cp.pivot_b;
        let n = pose_b.rotation * cp.normal_b;
        assert_relative_eq!(cp.distance, n.dot(&(pa - pb)), epsilon = 1.0e-5);
    }
}
