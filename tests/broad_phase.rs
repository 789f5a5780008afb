mod common;

use common::{move_body, spawn_ball};
use riposte::math::Point;
use riposte::pipeline::{CollisionPipeline, PairEvent};
use riposte::world::World;

#[test]
fn pair_creation_and_destruction_use_asymmetric_margins() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    // Two balls of radius 0.5 on the x axis: the AABB gap equals the
    // center distance minus 1.
    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(1.03, 0.0, 0.0), 0.5);

    // Gap 0.03 > BREAK_OFFSET: no pair yet.
    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.num_pairs(), 0);

    // Gap 0.015 < BREAK_OFFSET: the pair forms.
    move_body(&mut world, b, Point::new(1.015, 0.0, 0.0));
    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.num_pairs(), 1);
    let manifold = pipeline.broad_phase.manifold(a, b).unwrap();

    // Gap between the margins: hysteresis keeps the pair.
    move_body(&mut world, b, Point::new(1.03, 0.0, 0.0));
    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.manifold(a, b), Some(manifold));

    // Gap 0.05 > SEPARATION_OFFSET: the pair dies.
    move_body(&mut world, b, Point::new(1.05, 0.0, 0.0));
    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.num_pairs(), 0);
    assert!(pipeline.broad_phase.manifold(a, b).is_none());
    assert!(!world.contains(manifold));
}

#[test]
fn pair_table_is_symmetric_and_bijective() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.9, 0.0, 0.0), 0.5);
    let c = spawn_ball(&mut world, Point::new(0.0, 0.9, 0.0), 0.5);

    pipeline.step(&mut world);

    let table = pipeline.broad_phase.pair_table();
    for (&(e0, e1), &manifold) in table {
        assert_eq!(table.get(&(e1, e0)), Some(&manifold));
        let m = world.manifolds.get(manifold).unwrap();
        let key = if e0 < e1 { [e0, e1] } else { [e1, e0] };
        assert_eq!(m.body, key);
    }

    // a-b, a-c and b-c all overlap here.
    assert_eq!(pipeline.broad_phase.num_pairs(), 3);
    assert_eq!(world.manifolds.len(), 3);
    assert!(pipeline.broad_phase.manifold(b, a).is_some());
    assert!(pipeline.broad_phase.manifold(c, a).is_some());
}

#[test]
fn overlap_transitions_are_reported_as_events() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.9, 0.0, 0.0), 0.5);

    pipeline.step(&mut world);
    let manifold = pipeline.broad_phase.manifold(a, b).unwrap();
    let events: Vec<_> = pipeline.broad_phase.drain_events().collect();
    assert_eq!(
        events,
        vec![PairEvent::Created {
            body: [a, b],
            manifold
        }]
    );

    move_body(&mut world, b, Point::new(5.0, 0.0, 0.0));
    pipeline.step(&mut world);
    let events: Vec<_> = pipeline.broad_phase.drain_events().collect();
    assert_eq!(
        events,
        vec![PairEvent::Destroyed {
            body: [a, b],
            manifold
        }]
    );
}

#[test]
fn a_vanished_aabb_counts_as_separation() {
    let mut world = World::new();
    let mut pipeline = CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.9, 0.0, 0.0), 0.5);

    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.num_pairs(), 1);

    // Strip one side of the pair of its AABB, shape and pose so the
    // refresher cannot resurrect it.
    let _ = world.aabbs.remove(b);
    let _ = world.shapes.remove(b);

    pipeline.step(&mut world);
    assert_eq!(pipeline.broad_phase.num_pairs(), 0);
    assert!(world.manifolds.is_empty());
    assert!(world.contact_points.is_empty());
}
