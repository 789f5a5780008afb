use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::pipeline::{ContactConstraint, ContactManifold, ContactPoint, ConstraintRow};
use crate::shape::ShapeKind;
use crate::world::{
    Column, Component, ComponentRegistry, Dirty, DirtyLog, Entity, LinVel, Material, Orientation,
    Position,
};
use hashbrown::HashSet;
use slab::Slab;

/// The entity store the contact pipeline runs against.
///
/// Components live in one public column per type so that pipeline stages
/// can split-borrow exactly the columns they need. The store itself only
/// provides entity allocation, destruction, presence queries, the sleeping
/// set and the dirty log.
pub struct World {
    slots: Slab<()>,
    generations: Vec<u32>,
    sleeping: HashSet<Entity>,
    registry: ComponentRegistry,

    /// World-space positions.
    pub positions: Column<Position>,
    /// World-space orientations.
    pub orientations: Column<Orientation>,
    /// Linear velocities.
    pub lin_vels: Column<LinVel>,
    /// World-space bounding boxes.
    pub aabbs: Column<Aabb>,
    /// Collision shapes.
    pub shapes: Column<ShapeKind>,
    /// Surface materials.
    pub materials: Column<Material>,
    /// Contact manifolds, one per tracked body pair.
    pub manifolds: Column<ContactManifold>,
    /// Persistent contact points.
    pub contact_points: Column<ContactPoint>,
    /// Contact constraints, attached to contact point entities.
    pub constraints: Column<ContactConstraint>,
    /// Constraint rows carrying warm-start impulses.
    pub constraint_rows: Column<ConstraintRow>,
    /// The per-entity change annotations of the current step.
    pub dirty: DirtyLog,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with all built-in component types registered.
    pub fn new() -> Self {
        let mut registry = ComponentRegistry::new();
        registry.register::<Position>();
        registry.register::<Orientation>();
        registry.register::<LinVel>();
        registry.register::<Aabb>();
        registry.register::<ShapeKind>();
        registry.register::<Material>();
        registry.register::<ContactManifold>();
        registry.register::<ContactPoint>();
        registry.register::<ContactConstraint>();
        registry.register::<ConstraintRow>();

        World {
            slots: Slab::new(),
            generations: Vec::new(),
            sleeping: HashSet::new(),
            registry,
            positions: Column::new(),
            orientations: Column::new(),
            lin_vels: Column::new(),
            aabbs: Column::new(),
            shapes: Column::new(),
            materials: Column::new(),
            manifolds: Column::new(),
            contact_points: Column::new(),
            constraints: Column::new(),
            constraint_rows: Column::new(),
            dirty: DirtyLog::default(),
        }
    }

    /// Registers an additional component type for dirty tracking.
    ///
    /// Downstream delta consumers call this at initialization for the
    /// component types they ship out of the store.
    pub fn register_component<T: Component>(&mut self) {
        self.registry.register::<T>();
    }

    /// The registry of component types known to this world.
    #[inline]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Creates a fresh entity.
    pub fn create(&mut self) -> Entity {
        let index = self.slots.insert(());
        if index == self.generations.len() {
            self.generations.push(0);
        }
        Entity::new(index as u32, self.generations[index])
    }

    /// Destroys `entity`, detaching all of its components and recording
    /// their destruction in the dirty log.
    pub fn destroy(&mut self, entity: Entity) {
        if !self.contains(entity) {
            return;
        }

        let dirty = self.dirty.entry(entity);
        if self.positions.remove(entity).is_some() {
            let _ = dirty.destroyed::<Position>();
        }
        if self.orientations.remove(entity).is_some() {
            let _ = dirty.destroyed::<Orientation>();
        }
        if self.lin_vels.remove(entity).is_some() {
            let _ = dirty.destroyed::<LinVel>();
        }
        if self.aabbs.remove(entity).is_some() {
            let _ = dirty.destroyed::<Aabb>();
        }
        if self.shapes.remove(entity).is_some() {
            let _ = dirty.destroyed::<ShapeKind>();
        }
        if self.materials.remove(entity).is_some() {
            let _ = dirty.destroyed::<Material>();
        }
        if self.manifolds.remove(entity).is_some() {
            let _ = dirty.destroyed::<ContactManifold>();
        }
        if self.contact_points.remove(entity).is_some() {
            let _ = dirty.destroyed::<ContactPoint>();
        }
        if self.constraints.remove(entity).is_some() {
            let _ = dirty.destroyed::<ContactConstraint>();
        }
        if self.constraint_rows.remove(entity).is_some() {
            let _ = dirty.destroyed::<ConstraintRow>();
        }

        let _ = self.sleeping.remove(&entity);
        let index = entity.index() as usize;
        let _ = self.slots.remove(index);
        self.generations[index] += 1;
    }

    /// Whether `entity` is alive.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        let index = entity.index() as usize;
        self.slots.contains(index) && self.generations[index] == entity.generation()
    }

    /// The number of live entities.
    #[inline]
    pub fn num_entities(&self) -> usize {
        self.slots.len()
    }

    /// Inserts or removes `entity` from the sleeping set.
    pub fn set_sleeping(&mut self, entity: Entity, sleeping: bool) {
        if sleeping {
            let _ = self.sleeping.insert(entity);
        } else {
            let _ = self.sleeping.remove(&entity);
        }
    }

    /// Whether `entity` is in the sleeping set.
    #[inline]
    pub fn is_sleeping(&self, entity: Entity) -> bool {
        self.sleeping.contains(&entity)
    }

    /// Consumes and clears the dirty annotations of the current step.
    pub fn drain_dirty(&mut self) -> Vec<(Entity, Dirty)> {
        self.dirty.drain(&self.registry)
    }

    /// Creates a body entity carrying a pose, a shape, and the shape's
    /// world-space AABB.
    pub fn spawn_body(
        &mut self,
        position: Position,
        orientation: Orientation,
        shape: ShapeKind,
    ) -> Entity {
        let entity = self.create();
        let pose = Isometry::from_parts(position.0.coords.into(), orientation.0);
        let _ = self.aabbs.insert(entity, shape.aabb(&pose));
        let _ = self.positions.insert(entity, position);
        let _ = self.orientations.insert(entity, orientation);
        let _ = self.shapes.insert(entity, shape);

        let _ = self
            .dirty
            .entry(entity)
            .set_new()
            .created::<Position>()
            .created::<Orientation>()
            .created::<ShapeKind>()
            .created::<Aabb>();

        entity
    }

    /// The world-space pose of `entity`, if it carries one.
    #[inline]
    pub fn pose(&self, entity: Entity) -> Option<Isometry<Real>> {
        self.transform_view().pose(entity)
    }

    /// A read-only view over the columns describing collidable bodies.
    #[inline]
    pub fn body_view(&self) -> BodyView<'_> {
        BodyView {
            aabbs: &self.aabbs,
            shapes: &self.shapes,
            positions: &self.positions,
            orientations: &self.orientations,
        }
    }

    /// A read-only view over the pose columns.
    #[inline]
    pub fn transform_view(&self) -> TransformView<'_> {
        TransformView {
            positions: &self.positions,
            orientations: &self.orientations,
        }
    }
}

/// A view over the columns describing collidable bodies.
#[derive(Copy, Clone)]
pub struct BodyView<'a> {
    /// World-space bounding boxes.
    pub aabbs: &'a Column<Aabb>,
    /// Collision shapes.
    pub shapes: &'a Column<ShapeKind>,
    /// World-space positions.
    pub positions: &'a Column<Position>,
    /// World-space orientations.
    pub orientations: &'a Column<Orientation>,
}

impl<'a> BodyView<'a> {
    /// The world-space pose of `entity`, if it carries one.
    #[inline]
    pub fn pose(&self, entity: Entity) -> Option<Isometry<Real>> {
        let position = self.positions.get(entity)?;
        let orientation = self.orientations.get(entity)?;
        Some(Isometry::from_parts(
            position.0.coords.into(),
            orientation.0,
        ))
    }
}

/// A view over the pose columns.
#[derive(Copy, Clone)]
pub struct TransformView<'a> {
    /// World-space positions.
    pub positions: &'a Column<Position>,
    /// World-space orientations.
    pub orientations: &'a Column<Orientation>,
}

impl<'a> TransformView<'a> {
    /// The world-space pose of `entity`, if it carries one.
    #[inline]
    pub fn pose(&self, entity: Entity) -> Option<Isometry<Real>> {
        let position = self.positions.get(entity)?;
        let orientation = self.orientations.get(entity)?;
        Some(Isometry::from_parts(
            position.0.coords.into(),
            orientation.0,
        ))
    }
}
