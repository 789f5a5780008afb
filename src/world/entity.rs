/// A generational handle to an entity of a [`World`](crate::world::World).
///
/// Handles of destroyed entities are never reused: the slot index may be
/// recycled, but with a bumped generation, so stale handles fail presence
/// checks instead of aliasing a new entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    #[inline]
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Entity { index, generation }
    }

    /// The slot index of this handle.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The generation of this handle.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl core::fmt::Display for Entity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
