use crate::world::Entity;
use core::any::TypeId;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// A component type that can be stored in a [`World`](crate::world::World)
/// column and tracked by the dirty log.
pub trait Component: 'static + Send + Sync {
    /// The name of this component kind, used for diagnostics.
    const NAME: &'static str;
}

/// The identifier of a component type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(TypeId);

impl ComponentId {
    /// The identifier of the component type `T`.
    #[inline]
    pub fn of<T: Component>() -> Self {
        ComponentId(TypeId::of::<T>())
    }
}

/// The kind of change recorded for a component in the dirty log.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DirtyKind {
    /// The component was attached to the entity.
    Created,
    /// The component's value changed.
    Updated,
    /// The component was detached or its entity destroyed.
    Destroyed,
}

/// The set of component changes recorded for one entity since the last
/// drain.
///
/// Records are deduplicated: marking the same `(component, kind)` twice
/// keeps a single record.
#[derive(Clone, Debug, Default)]
pub struct Dirty {
    is_new: bool,
    records: SmallVec<[(ComponentId, DirtyKind); 8]>,
}

impl Dirty {
    /// Flags the entity itself as newly created.
    pub fn set_new(&mut self) -> &mut Self {
        self.is_new = true;
        self
    }

    /// Whether the entity was created since the last drain.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Records the creation of a `T` component.
    pub fn created<T: Component>(&mut self) -> &mut Self {
        self.push(ComponentId::of::<T>(), DirtyKind::Created)
    }

    /// Records an update of a `T` component.
    pub fn updated<T: Component>(&mut self) -> &mut Self {
        self.push(ComponentId::of::<T>(), DirtyKind::Updated)
    }

    /// Records the destruction of a `T` component.
    pub fn destroyed<T: Component>(&mut self) -> &mut Self {
        self.push(ComponentId::of::<T>(), DirtyKind::Destroyed)
    }

    fn push(&mut self, id: ComponentId, kind: DirtyKind) -> &mut Self {
        if !self.records.contains(&(id, kind)) {
            self.records.push((id, kind));
        }
        self
    }

    /// The recorded `(component, kind)` pairs, in recording order.
    #[inline]
    pub fn records(&self) -> &[(ComponentId, DirtyKind)] {
        &self.records
    }

    /// Whether a change of the given kind was recorded for component `T`.
    pub fn contains<T: Component>(&self, kind: DirtyKind) -> bool {
        self.records.contains(&(ComponentId::of::<T>(), kind))
    }
}

/// The registry of component types known to the store.
///
/// Downstream consumers that ship deltas out of the store register their
/// own component types here at initialization; the dirty log only accepts
/// registered components.
#[derive(Default)]
pub struct ComponentRegistry {
    names: HashMap<ComponentId, &'static str>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the component type `T`.
    pub fn register<T: Component>(&mut self) {
        let _ = self.names.insert(ComponentId::of::<T>(), T::NAME);
    }

    /// Whether `id` was registered.
    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.names.contains_key(&id)
    }

    /// The name of a registered component type.
    #[inline]
    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(&id).copied()
    }
}

/// The per-entity dirty annotations accumulated during a step.
#[derive(Default)]
pub struct DirtyLog {
    entries: HashMap<Entity, Dirty>,
}

impl DirtyLog {
    /// The dirty entry of `entity`, created empty on first access.
    pub fn entry(&mut self, entity: Entity) -> &mut Dirty {
        self.entries.entry(entity).or_default()
    }

    /// The dirty entry of `entity`, if any change was recorded.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&Dirty> {
        self.entries.get(&entity)
    }

    /// Whether no change was recorded since the last drain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes and clears all recorded annotations.
    ///
    /// Entries are returned sorted by entity so that downstream consumers
    /// observe a deterministic order. Every recorded component must have
    /// been registered in `registry`.
    pub fn drain(&mut self, registry: &ComponentRegistry) -> Vec<(Entity, Dirty)> {
        let mut drained: Vec<_> = self.entries.drain().collect();
        drained.sort_by_key(|(entity, _)| *entity);

        if cfg!(debug_assertions) {
            for (_, dirty) in &drained {
                for (id, _) in dirty.records() {
                    assert!(
                        registry.contains(*id),
                        "dirty record for an unregistered component"
                    );
                }
            }
        }

        drained
    }
}
