#![allow(dead_code)]

use riposte::math::{Point, Real};
use riposte::na;
use riposte::shape::{Ball, ShapeKind};
use riposte::world::{Entity, Material, Orientation, Position, World};

/// Spawns a ball-shaped rigid body with a rigid material.
pub fn spawn_ball(world: &mut World, center: Point<Real>, radius: Real) -> Entity {
    let entity = world.spawn_body(
        Position(center),
        Orientation(na::UnitQuaternion::identity()),
        ShapeKind::from(Ball::new(radius)),
    );
    let _ = world.materials.insert(entity, Material::rigid(0.5, 1.0));
    entity
}

/// Teleports a body, leaving its orientation untouched.
pub fn move_body(world: &mut World, entity: Entity, center: Point<Real>) {
    world.positions.get_mut(entity).unwrap().0 = center;
}

/// The warm-start impulse of the first constraint row of a contact point.
pub fn first_row_impulse(world: &World, point: Entity) -> Real {
    let constraint = world.constraints.get(point).unwrap();
    world
        .constraint_rows
        .get(constraint.rows()[0])
        .unwrap()
        .impulse
}

/// Sets the warm-start impulse of every constraint row of a contact point.
pub fn set_row_impulses(world: &mut World, point: Entity, impulse: Real) {
    let rows = world.constraints.get(point).unwrap().rows().to_vec();
    for row in rows {
        world.constraint_rows.get_mut(row).unwrap().impulse = impulse;
    }
}
