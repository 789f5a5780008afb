use crate::math::{Point, Real, Vector};
use crate::world::{Component, Entity, World};
use arrayvec::ArrayVec;

/// The maximum number of constraint rows attached to one contact.
pub const MAX_ROWS: usize = 3;

/// A persistent contact point between the two bodies of a manifold.
///
/// Pivots are anchors in each body's local frame; `normal_b` is unit
/// length in the second body's local frame and points toward the first
/// body. `distance` is the signed separation along the world-space normal,
/// refreshed from the current poses at the start of every step.
#[derive(Clone, Debug)]
pub struct ContactPoint {
    /// The pair of bodies this contact acts on.
    pub body: [Entity; 2],
    /// The contact anchor on the first body, in its local frame.
    pub pivot_a: Point<Real>,
    /// The contact anchor on the second body, in its local frame.
    pub pivot_b: Point<Real>,
    /// The contact normal in the second body's local frame.
    pub normal_b: Vector<Real>,
    /// The signed separation along the normal.
    pub distance: Real,
    /// The combined friction coefficient of the touching materials.
    pub friction: Real,
    /// The combined restitution coefficient of the touching materials.
    pub restitution: Real,
    /// The number of steps this contact survived through merges.
    pub lifetime: u32,
}

impl Component for ContactPoint {
    const NAME: &'static str = "contact_point";
}

/// The contact constraint attached to a contact point entity.
///
/// Carries the combined compliance of the pair and the entities of the
/// warm-start rows fed to the solver.
#[derive(Clone, Debug)]
pub struct ContactConstraint {
    /// The combined contact stiffness.
    pub stiffness: Real,
    /// The combined contact damping.
    pub damping: Real,
    rows: ArrayVec<Entity, MAX_ROWS>,
}

impl ContactConstraint {
    /// Creates a constraint with no rows yet.
    pub fn new(stiffness: Real, damping: Real) -> Self {
        ContactConstraint {
            stiffness,
            damping,
            rows: ArrayVec::new(),
        }
    }

    /// The entities of this constraint's rows.
    #[inline]
    pub fn rows(&self) -> &[Entity] {
        &self.rows
    }

    pub(crate) fn push_row(&mut self, row: Entity) {
        self.rows.push(row);
    }
}

impl Component for ContactConstraint {
    const NAME: &'static str = "contact_constraint";
}

/// The solver-facing state of one constraint row.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ConstraintRow {
    /// The impulse accumulated by the solver, reused as its initial guess
    /// on the next step.
    pub impulse: Real,
}

impl Component for ConstraintRow {
    const NAME: &'static str = "constraint_row";
}

/// Destroys a contact point entity together with its constraint rows.
///
/// The caller is responsible for the manifold slot bookkeeping.
pub(crate) fn destroy_contact_entity(world: &mut World, point_entity: Entity) {
    let rows: ArrayVec<Entity, MAX_ROWS> = world
        .constraints
        .get(point_entity)
        .map(|constraint| constraint.rows.clone())
        .unwrap_or_default();

    for row in rows {
        world.destroy(row);
    }

    world.destroy(point_entity);
}
