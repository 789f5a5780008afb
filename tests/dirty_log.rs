mod common;

use common::{move_body, spawn_ball};
use riposte::math::{Point, Vector};
use riposte::pipeline::{ContactManifold, ContactPoint};
use riposte::world::{Component, DirtyKind, LinVel, World};

#[test]
fn contact_lifecycle_flows_through_the_dirty_log() {
    let mut world = World::new();
    let mut pipeline = riposte::pipeline::CollisionPipeline::new();

    let a = spawn_ball(&mut world, Point::origin(), 0.5);
    let b = spawn_ball(&mut world, Point::new(0.0, 0.0, 0.9), 0.5);
    let _ = world.drain_dirty();

    pipeline.step(&mut world);
    let manifold_entity = pipeline.broad_phase.manifold(a, b).unwrap();
    let point = world.manifolds.get(manifold_entity).unwrap().point(0);

    let drained = world.drain_dirty();
    let find = |entity| {
        drained
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, dirty)| dirty)
    };

    let manifold_dirty = find(manifold_entity).unwrap();
    assert!(manifold_dirty.is_new());
    assert!(manifold_dirty.contains::<ContactManifold>(DirtyKind::Created));
    assert!(manifold_dirty.contains::<ContactManifold>(DirtyKind::Updated));

    let point_dirty = find(point).unwrap();
    assert!(point_dirty.is_new());
    assert!(point_dirty.contains::<ContactPoint>(DirtyKind::Created));

    // The log was consumed: a second drain is empty until more changes
    // happen.
    assert!(world.drain_dirty().is_empty());

    // A merge marks the point updated; separation marks destruction.
    move_body(&mut world, b, Point::new(0.0, 0.0, 0.905));
    pipeline.step(&mut world);
    let drained = world.drain_dirty();
    let point_dirty = drained.iter().find(|(e, _)| *e == point).unwrap();
    assert!(point_dirty.1.contains::<ContactPoint>(DirtyKind::Updated));

    move_body(&mut world, b, Point::new(0.0, 0.0, 5.0));
    pipeline.step(&mut world);
    let drained = world.drain_dirty();
    let point_dirty = drained.iter().find(|(e, _)| *e == point).unwrap();
    assert!(point_dirty.1.contains::<ContactPoint>(DirtyKind::Destroyed));
    let manifold_dirty = drained.iter().find(|(e, _)| *e == manifold_entity).unwrap();
    assert!(manifold_dirty
        .1
        .contains::<ContactManifold>(DirtyKind::Destroyed));
}

/// A user-defined component registered for delta shipping.
struct Health(#[allow(dead_code)] f32);

impl Component for Health {
    const NAME: &'static str = "health";
}

#[test]
fn external_components_can_join_the_delta() {
    let mut world = World::new();
    world.register_component::<Health>();

    let body = spawn_ball(&mut world, Point::origin(), 0.5);
    let _ = world.drain_dirty();

    // `LinVel` is built in but never touched by the pipeline; downstream
    // code marks it like any external component.
    let _ = world.lin_vels.insert(body, LinVel(Vector::zeros()));
    let _ = world
        .dirty
        .entry(body)
        .created::<LinVel>()
        .updated::<Health>();

    let drained = world.drain_dirty();
    assert_eq!(drained.len(), 1);
    assert!(drained[0].1.contains::<LinVel>(DirtyKind::Created));
    assert!(drained[0].1.contains::<Health>(DirtyKind::Updated));

    assert_eq!(
        world
            .registry()
            .name(riposte::world::ComponentId::of::<Health>()),
        Some("health")
    );
}
