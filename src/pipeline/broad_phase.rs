use crate::math::{Real, CONTACT_BREAKING_THRESHOLD, MAX_CONTACTS};
use crate::pipeline::contact_point::destroy_contact_entity;
use crate::pipeline::ContactManifold;
use crate::world::{Entity, World};
use arrayvec::ArrayVec;
use hashbrown::HashMap;

/// Margin used when testing whether a pair of AABBs is close enough to
/// start tracking.
pub const BREAK_OFFSET: Real = CONTACT_BREAKING_THRESHOLD;

/// Margin used when testing whether a tracked pair of AABBs has separated.
///
/// Looser than [`BREAK_OFFSET`], so a pair is easier to keep than to form
/// and bodies resting at the break distance do not flicker.
pub const SEPARATION_OFFSET: Real = CONTACT_BREAKING_THRESHOLD * 2.0;

/// An overlap transition reported by the broadphase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairEvent {
    /// The pair's AABBs started overlapping; a manifold was created.
    Created {
        /// The body pair, canonical ordering.
        body: [Entity; 2],
        /// The manifold entity tracking the pair.
        manifold: Entity,
    },
    /// The pair's AABBs separated; the manifold and its contacts were
    /// destroyed.
    Destroyed {
        /// The body pair, canonical ordering.
        body: [Entity; 2],
        /// The destroyed manifold entity.
        manifold: Entity,
    },
}

/// Tracks which body pairs have overlapping AABBs and owns the manifold
/// entity associated with each.
///
/// The pair table stores both orderings of every pair, mapped to the same
/// manifold, so lookups resolve whichever ordering the caller has at hand.
#[derive(Default)]
pub struct BroadPhase {
    pair_table: HashMap<(Entity, Entity), Entity>,
    events: Vec<PairEvent>,
}

impl BroadPhase {
    /// Creates an empty broadphase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the pair table into agreement with the current AABBs.
    ///
    /// Tracked pairs whose AABBs separated past [`SEPARATION_OFFSET`] (or
    /// lost an AABB altogether) are destroyed along with their manifold and
    /// contact points; untracked pairs whose AABBs approach within
    /// [`BREAK_OFFSET`] get a fresh manifold.
    pub fn update(&mut self, world: &mut World) {
        self.destroy_separated_pairs(world);
        self.create_overlapping_pairs(world);
    }

    fn destroy_separated_pairs(&mut self, world: &mut World) {
        let mut doomed: Vec<(Entity, Entity, Entity)> = Vec::new();

        for (&(b0, b1), &manifold) in &self.pair_table {
            if b1 < b0 {
                // The mirrored entry; the canonical one drives the check.
                continue;
            }

            let keep = match (world.aabbs.get(b0), world.aabbs.get(b1)) {
                (Some(aabb0), Some(aabb1)) => {
                    aabb0.loosened(SEPARATION_OFFSET).intersects(aabb1)
                }
                // A vanished AABB counts as separation.
                _ => false,
            };

            if !keep {
                doomed.push((b0, b1, manifold));
            }
        }

        doomed.sort_unstable();
        for (b0, b1, manifold) in doomed {
            self.destroy_pair(world, b0, b1, manifold);
        }
    }

    fn create_overlapping_pairs(&mut self, world: &mut World) {
        let mut entities: Vec<Entity> = world.aabbs.entities().collect();
        entities.sort_unstable();

        for (i, &e0) in entities.iter().enumerate() {
            let aabb0 = match world.aabbs.get(e0) {
                Some(aabb) => aabb.loosened(BREAK_OFFSET),
                None => continue,
            };

            for &e1 in &entities[i + 1..] {
                let overlapping = world
                    .aabbs
                    .get(e1)
                    .is_some_and(|aabb1| aabb0.intersects(aabb1));

                if overlapping && !self.pair_table.contains_key(&(e0, e1)) {
                    let manifold = world.create();
                    let _ = world.manifolds.insert(manifold, ContactManifold::new(e0, e1));
                    let _ = world
                        .dirty
                        .entry(manifold)
                        .set_new()
                        .created::<ContactManifold>();

                    let _ = self.pair_table.insert((e0, e1), manifold);
                    let _ = self.pair_table.insert((e1, e0), manifold);
                    self.events.push(PairEvent::Created {
                        body: [e0, e1],
                        manifold,
                    });
                }
            }
        }
    }

    fn destroy_pair(&mut self, world: &mut World, b0: Entity, b1: Entity, manifold: Entity) {
        let _ = self.pair_table.remove(&(b0, b1));
        let _ = self.pair_table.remove(&(b1, b0));

        let points: ArrayVec<Entity, MAX_CONTACTS> = world
            .manifolds
            .get(manifold)
            .map(|m| m.points().collect())
            .unwrap_or_default();

        for point in points {
            destroy_contact_entity(world, point);
        }

        world.destroy(manifold);
        self.events.push(PairEvent::Destroyed {
            body: [b0, b1],
            manifold,
        });
    }

    /// The manifold tracking the pair `(a, b)`, whichever the ordering.
    #[inline]
    pub fn manifold(&self, a: Entity, b: Entity) -> Option<Entity> {
        self.pair_table.get(&(a, b)).copied()
    }

    /// The number of tracked pairs.
    #[inline]
    pub fn num_pairs(&self) -> usize {
        self.pair_table.len() / 2
    }

    /// The raw pair table, with both orderings of every pair.
    #[inline]
    pub fn pair_table(&self) -> &HashMap<(Entity, Entity), Entity> {
        &self.pair_table
    }

    /// Drains the overlap transitions recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, PairEvent> {
        self.events.drain(..)
    }
}
