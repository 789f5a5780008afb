use crate::world::Entity;
use core::cell::UnsafeCell;
use hashbrown::HashMap;

/// A typed component column, mapping entities to one component each.
///
/// Cells are wrapped in `UnsafeCell` so that the narrowphase can hand out
/// disjoint mutable references across worker threads through
/// [`ParColumnAccess`]; every safe accessor follows the usual borrow rules
/// and never aliases.
pub struct Column<T> {
    cells: HashMap<Entity, UnsafeCell<T>>,
}

// Concurrent access from several threads only happens through
// `ParColumnAccess`, whose `get_mut` is unsafe and requires callers to
// access disjoint entity sets.
unsafe impl<T: Send> Send for Column<T> {}
unsafe impl<T: Send + Sync> Sync for Column<T> {}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Column {
            cells: HashMap::new(),
        }
    }
}

impl<T> Column<T> {
    /// Creates an empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `value` to `entity`, returning the previous component if
    /// any.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        self.cells
            .insert(entity, UnsafeCell::new(value))
            .map(UnsafeCell::into_inner)
    }

    /// Detaches the component of `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.cells.remove(&entity).map(UnsafeCell::into_inner)
    }

    /// Whether `entity` carries a component in this column.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.cells.contains_key(&entity)
    }

    /// The component of `entity`, if any.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.cells.get(&entity).map(|cell| unsafe { &*cell.get() })
    }

    /// The component of `entity`, if any, mutably.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.cells.get_mut(&entity).map(UnsafeCell::get_mut)
    }

    /// The number of components in this column.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether this column is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the entities carrying a component in this column.
    ///
    /// The order is unspecified; callers needing determinism must sort.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.cells.keys().copied()
    }

    /// Iterates over the components of this column.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.cells
            .iter()
            .map(|(entity, cell)| (*entity, unsafe { &*cell.get() }))
    }

    /// Iterates mutably over the components of this column.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.cells
            .iter_mut()
            .map(|(entity, cell)| (*entity, cell.get_mut()))
    }

    /// A view of this column suitable for sharing with worker threads.
    #[inline]
    pub fn par_access(&self) -> ParColumnAccess<'_, T> {
        ParColumnAccess { column: self }
    }
}

/// Shared access to a [`Column`] from within a parallel region.
///
/// The accessors take `&self` and may be called concurrently from several
/// workers; it is the caller's responsibility to guarantee that the entity
/// sets touched by distinct workers are disjoint, and that no safe access
/// to the column happens while the view is alive.
pub struct ParColumnAccess<'a, T> {
    column: &'a Column<T>,
}

impl<'a, T> Copy for ParColumnAccess<'a, T> {}

impl<'a, T> Clone for ParColumnAccess<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> ParColumnAccess<'a, T> {
    /// Whether `entity` carries a component in this column.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.column.contains(entity)
    }

    /// The component of `entity`, if any.
    ///
    /// # Safety
    ///
    /// No other thread may be mutating the component of `entity`.
    #[inline]
    pub unsafe fn get(&self, entity: Entity) -> Option<&T> {
        self.column
            .cells
            .get(&entity)
            .map(|cell| &*cell.get())
    }

    /// The component of `entity`, if any, mutably.
    ///
    /// # Safety
    ///
    /// No other thread may be accessing the component of `entity`, and the
    /// caller must not request a second reference to it while this one is
    /// alive.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self, entity: Entity) -> Option<&mut T> {
        self.column
            .cells
            .get(&entity)
            .map(|cell| &mut *cell.get())
    }
}
