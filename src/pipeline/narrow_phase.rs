use crate::math::{
    Isometry, Point, Real, CONTACT_BREAKING_THRESHOLD, CONTACT_CACHING_THRESHOLD, EPSILON,
    MAX_CONTACTS,
};
use crate::parallel::{parallel_for, Job, ParSliceMut};
use crate::pipeline::broad_phase::BREAK_OFFSET;
use crate::pipeline::contact_point::destroy_contact_entity;
use crate::pipeline::{ContactConstraint, ContactManifold, ContactPoint, ConstraintRow};
use crate::query::{collide, CollisionPoint, CollisionResult};
use crate::utils::max_quad_area_2x;
use crate::world::{
    BodyView, Entity, Material, ParColumnAccess, TransformView, World,
};
use arrayvec::ArrayVec;

/// Per-manifold side effects recorded while the pipeline runs.
///
/// During a parallel region, entity creation and destruction are forbidden;
/// each worker records them here (one slot per manifold index) and the
/// serial commit phase applies them.
#[derive(Clone, Default)]
struct ManifoldChange {
    created: ArrayVec<CollisionPoint, MAX_CONTACTS>,
    destroyed: ArrayVec<Entity, MAX_CONTACTS>,
    updated: ArrayVec<Entity, MAX_CONTACTS>,
}

impl ManifoldChange {
    fn mark_updated(&mut self, entity: Entity) {
        if !self.updated.contains(&entity) {
            self.updated.push(entity);
        }
    }
}

/// Shared access to the contact columns from within the per-manifold
/// pipeline.
///
/// Every accessor is unsafe for the same reason: the pipeline may run on
/// several workers at once, and soundness relies on the ownership
/// invariant that each contact point (and its constraint rows) belongs to
/// exactly one manifold, and each manifold is processed by exactly one
/// worker.
#[derive(Copy, Clone)]
struct ContactColumns<'a> {
    points: ParColumnAccess<'a, ContactPoint>,
    constraints: ParColumnAccess<'a, ContactConstraint>,
    rows: ParColumnAccess<'a, ConstraintRow>,
}

impl<'a> ContactColumns<'a> {
    unsafe fn point(&self, entity: Entity) -> &ContactPoint {
        self.points
            .get(entity)
            .expect("manifold slot refers to a missing contact point")
    }

    #[allow(clippy::mut_from_ref)]
    unsafe fn point_mut(&self, entity: Entity) -> &mut ContactPoint {
        self.points
            .get_mut(entity)
            .expect("manifold slot refers to a missing contact point")
    }

    /// Zeroes the warm-start impulses of the constraint rows attached to
    /// `point_entity`, if it carries a constraint.
    unsafe fn zero_impulses(&self, point_entity: Entity) {
        if let Some(constraint) = self.constraints.get(point_entity) {
            for &row in constraint.rows() {
                if let Some(row) = self.rows.get_mut(row) {
                    row.impulse = 0.0;
                }
            }
        }
    }
}

/// Copies the geometric fields of an incoming collision point onto a
/// persisted contact.
fn merge_point(rp: &CollisionPoint, cp: &mut ContactPoint) {
    cp.pivot_a = rp.pivot_a;
    cp.pivot_b = rp.pivot_b;
    cp.normal_b = rp.normal_b;
    cp.distance = rp.distance;
}

/// The slot index of the persisted contact nearest to `rp`, or
/// `manifold.len()` when none is within the caching threshold.
///
/// Proximity is measured in both bodies' local frames; agreement in either
/// is enough for a match.
unsafe fn find_nearest_contact(
    manifold: &ContactManifold,
    rp: &CollisionPoint,
    columns: &ContactColumns,
) -> usize {
    let mut shortest = CONTACT_CACHING_THRESHOLD * CONTACT_CACHING_THRESHOLD;
    let mut nearest = manifold.len();

    for i in 0..manifold.len() {
        let cp = columns.point(manifold.point(i));
        let da = (rp.pivot_a - cp.pivot_a).norm_squared();
        let db = (rp.pivot_b - cp.pivot_b).norm_squared();

        if da < shortest {
            shortest = da;
            nearest = i;
        }

        if db < shortest {
            shortest = db;
            nearest = i;
        }
    }

    nearest
}

/// Chooses the slot for an incoming contact, favouring spatial spread and
/// deep penetration.
///
/// Returns `len` to append while below capacity. At capacity, returns the
/// replacement slot maximizing the quadrilateral area spanned by the
/// pivots after substitution, never evicting a point strictly deeper than
/// the incoming one, or [`MAX_CONTACTS`] when no replacement improves the
/// spanned area.
fn insert_index(
    pivots: &[Point<Real>; MAX_CONTACTS],
    distances: &[Real; MAX_CONTACTS],
    len: usize,
    new_pivot: &Point<Real>,
    new_distance: Real,
) -> usize {
    debug_assert!(len <= MAX_CONTACTS);
    if len < MAX_CONTACTS {
        return len;
    }

    // The deepest existing point is protected when it beats the incoming
    // depth.
    let mut deepest = MAX_CONTACTS;
    let mut min_dist = new_distance;
    for (i, &dist) in distances.iter().enumerate() {
        if dist < min_dist {
            min_dist = dist;
            deepest = i;
        }
    }

    let current_area = max_quad_area_2x(&pivots[0], &pivots[1], &pivots[2], &pivots[3]);
    let mut best_idx = MAX_CONTACTS;
    let mut best_area = current_area;

    for k in 0..MAX_CONTACTS {
        if k == deepest {
            continue;
        }

        let mut candidate = *pivots;
        candidate[k] = *new_pivot;
        let area = max_quad_area_2x(&candidate[0], &candidate[1], &candidate[2], &candidate[3]);

        if area > best_area {
            best_area = area;
            best_idx = k;
        }
    }

    best_idx
}

/// Runs the broad check and the shape collision routine for one manifold.
fn detect_collision(manifold: &ContactManifold, bodies: &BodyView) -> CollisionResult {
    let [b0, b1] = manifold.body;
    let aabb_a = bodies
        .aabbs
        .get(b0)
        .expect("manifold body without an AABB");
    let aabb_b = bodies
        .aabbs
        .get(b1)
        .expect("manifold body without an AABB");

    // A manifold is allowed to exist while the AABB separation is between
    // the break and separation offsets, so a non-intersecting pair is an
    // empty result, not an error: the broadphase owns the destruction.
    if !aabb_a.loosened(BREAK_OFFSET).intersects(aabb_b) {
        return CollisionResult::new();
    }

    let shape_a = bodies.shapes.get(b0).expect("manifold body without a shape");
    let shape_b = bodies.shapes.get(b1).expect("manifold body without a shape");
    let pose_a = bodies.pose(b0).expect("manifold body without a pose");
    let pose_b = bodies.pose(b1).expect("manifold body without a pose");

    match collide(shape_a, &pose_a, shape_b, &pose_b, CONTACT_BREAKING_THRESHOLD) {
        Ok(result) => result,
        Err(err) => {
            log::debug!(
                "{} between {:?} and {:?}",
                err,
                shape_a.shape_type(),
                shape_b.shape_type()
            );
            CollisionResult::new()
        }
    }
}

/// Merges a collision result into a manifold.
///
/// Existing points matched within the caching threshold are updated in
/// place, preserving their warm-start impulses. Unmatched points are
/// appended (recorded in `change.created`), replace an occupied slot, or
/// are dropped, according to the insertion policy. Pending creations from
/// earlier points of the same result occupy capacity like persisted
/// points do, so a result larger than the remaining free slots still ends
/// in the at-capacity replacement policy; a slot holding a pending
/// creation is replaced by overwriting the buffered point, which has no
/// lifetime or impulses yet.
fn process_collision(
    manifold: &mut ContactManifold,
    result: &CollisionResult,
    columns: &ContactColumns,
    change: &mut ManifoldChange,
) {
    for rp in &result.points {
        if rp.normal_b.norm_squared() < EPSILON {
            log::debug!("discarding collision point with a degenerate normal");
            continue;
        }

        // SAFETY: this manifold's points are only touched by the worker
        // processing this manifold.
        let nearest = unsafe { find_nearest_contact(manifold, rp, columns) };

        if nearest < manifold.len() {
            let entity = manifold.point(nearest);
            // SAFETY: as above.
            let cp = unsafe { columns.point_mut(entity) };
            cp.lifetime += 1;
            merge_point(rp, cp);
            change.mark_updated(entity);
        } else {
            let live = manifold.len();
            let total = live + change.created.len();
            debug_assert!(total <= MAX_CONTACTS);

            let mut pivots = [Point::origin(); MAX_CONTACTS];
            let mut distances = [0.0; MAX_CONTACTS];
            for i in 0..live {
                // SAFETY: as above.
                let cp = unsafe { columns.point(manifold.point(i)) };
                pivots[i] = cp.pivot_b;
                distances[i] = cp.distance;
            }
            for (i, pending) in change.created.iter().enumerate() {
                pivots[live + i] = pending.pivot_b;
                distances[live + i] = pending.distance;
            }

            let idx = insert_index(&pivots, &distances, total, &rp.pivot_b, rp.distance);

            if idx == total && idx < MAX_CONTACTS {
                change.created.push(*rp);
            } else if idx < live {
                let entity = manifold.point(idx);
                // SAFETY: as above; the constraint rows of a replaced
                // contact belong to this manifold too.
                unsafe {
                    let cp = columns.point_mut(entity);
                    cp.lifetime = 0;
                    merge_point(rp, cp);
                    columns.zero_impulses(entity);
                }
                change.mark_updated(entity);
            } else if idx < total {
                change.created[idx - live] = *rp;
            }
            // Saturated and no replacement improves the spread: dropped.
        }
    }
}

/// Removes the contact points of `manifold` that separated past the
/// breaking threshold, normally or tangentially.
fn prune(
    manifold: &mut ContactManifold,
    pose_a: &Isometry<Real>,
    pose_b: &Isometry<Real>,
    columns: &ContactColumns,
    destroyed: &mut ArrayVec<Entity, MAX_CONTACTS>,
) {
    let threshold_sqr = CONTACT_BREAKING_THRESHOLD * CONTACT_BREAKING_THRESHOLD;

    for i in (0..manifold.len()).rev() {
        let entity = manifold.point(i);
        // SAFETY: this manifold's points are only touched by the worker
        // processing this manifold.
        let cp = unsafe { columns.point(entity) };

        let pa = pose_a * cp.pivot_a;
        let pb = pose_b * cp.pivot_b;
        let n = pose_b.rotation * cp.normal_b;
        let d = pa - pb;
        let dn = d.dot(&n);
        let dp = d - n * dn;

        if dn > CONTACT_BREAKING_THRESHOLD || dp.norm_squared() > threshold_sqr {
            let removed = manifold.swap_remove(i);
            destroyed.push(removed);
        }
    }
}

/// Refreshes the persisted distance of every contact point from the
/// current poses.
fn update_contact_distances(world: &mut World) {
    let World {
        contact_points,
        positions,
        orientations,
        ..
    } = world;
    let transforms = TransformView {
        positions: &*positions,
        orientations: &*orientations,
    };

    for (_, cp) in contact_points.iter_mut() {
        let pose_a = transforms
            .pose(cp.body[0])
            .expect("contact point body without a pose");
        let pose_b = transforms
            .pose(cp.body[1])
            .expect("contact point body without a pose");

        let pa = pose_a * cp.pivot_a;
        let pb = pose_b * cp.pivot_b;
        let n = pose_b.rotation * cp.normal_b;
        cp.distance = n.dot(&(pa - pb));
    }
}

/// Creates a contact point entity from a buffered collision point and
/// attaches it to its manifold.
///
/// A constraint (with zeroed warm-start rows) is attached when both bodies
/// carry a material. Does nothing when the manifold is already full.
fn create_contact_point(world: &mut World, manifold_entity: Entity, rp: &CollisionPoint) {
    let (body, full) = {
        let manifold = world
            .manifolds
            .get(manifold_entity)
            .expect("committing a contact point to a missing manifold");
        (manifold.body, manifold.len() >= MAX_CONTACTS)
    };

    if full {
        return;
    }

    let contact_entity = world.create();
    let mut cp = ContactPoint {
        body,
        pivot_a: rp.pivot_a,
        pivot_b: rp.pivot_b,
        normal_b: rp.normal_b,
        distance: rp.distance,
        friction: 0.0,
        restitution: 0.0,
        lifetime: 0,
    };

    let materials = (world.materials.get(body[0]), world.materials.get(body[1]));
    if let (Some(mat_a), Some(mat_b)) = materials {
        let combined = Material::combine(mat_a, mat_b);
        cp.restitution = combined.restitution;
        cp.friction = combined.friction;

        let mut constraint = ContactConstraint::new(combined.stiffness, combined.damping);
        // One normal row and one tangential row per contact.
        for _ in 0..2 {
            let row = world.create();
            let _ = world.constraint_rows.insert(row, ConstraintRow::default());
            let _ = world.dirty.entry(row).set_new().created::<ConstraintRow>();
            constraint.push_row(row);
        }

        let _ = world.constraints.insert(contact_entity, constraint);
        let _ = world.dirty.entry(contact_entity).created::<ContactConstraint>();
    }

    let _ = world.contact_points.insert(contact_entity, cp);
    let _ = world
        .dirty
        .entry(contact_entity)
        .set_new()
        .created::<ContactPoint>();

    let pushed = world
        .manifolds
        .get_mut(manifold_entity)
        .expect("committing a contact point to a missing manifold")
        .push(contact_entity);
    debug_assert!(pushed.is_some());

    let _ = world
        .dirty
        .entry(manifold_entity)
        .updated::<ContactManifold>();
}

/// Destroys a pruned contact point entity and its constraint rows.
fn destroy_contact_point(world: &mut World, manifold_entity: Entity, point_entity: Entity) {
    destroy_contact_entity(world, point_entity);
    let _ = world
        .dirty
        .entry(manifold_entity)
        .updated::<ContactManifold>();
}

/// The per-manifold narrowphase and its serial/parallel orchestration.
///
/// Each step, for every manifold: refresh the persisted contact distances,
/// run the broad check and the shape collision routine, merge the result
/// into the manifold, and prune separated points. The parallel path runs
/// the per-manifold work on the worker pool, buffering entity creation and
/// destruction for a serial commit ([`NarrowPhase::finish_parallel`]).
#[derive(Default)]
pub struct NarrowPhase {
    changes: Vec<ManifoldChange>,
    order: Vec<Entity>,
}

impl NarrowPhase {
    /// Creates a new narrowphase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the parallel path may be taken.
    #[inline]
    pub fn parallelizable(&self, world: &World) -> bool {
        world.manifolds.len() > 1
    }

    /// Runs the narrowphase serially, applying entity mutations inline
    /// after each manifold.
    pub fn update(&mut self, world: &mut World) {
        update_contact_distances(world);

        let mut order: Vec<Entity> = world.manifolds.entities().collect();
        order.sort_unstable();

        for manifold_entity in order {
            let mut change = ManifoldChange::default();

            {
                let World {
                    aabbs,
                    shapes,
                    positions,
                    orientations,
                    manifolds,
                    contact_points,
                    constraints,
                    constraint_rows,
                    ..
                } = &mut *world;
                let bodies = BodyView {
                    aabbs: &*aabbs,
                    shapes: &*shapes,
                    positions: &*positions,
                    orientations: &*orientations,
                };
                let columns = ContactColumns {
                    points: contact_points.par_access(),
                    constraints: constraints.par_access(),
                    rows: constraint_rows.par_access(),
                };

                let manifold = manifolds
                    .get_mut(manifold_entity)
                    .expect("narrowphase over a missing manifold");
                let result = detect_collision(manifold, &bodies);
                process_collision(manifold, &result, &columns, &mut change);

                let pose_a = bodies
                    .pose(manifold.body[0])
                    .expect("manifold body without a pose");
                let pose_b = bodies
                    .pose(manifold.body[1])
                    .expect("manifold body without a pose");
                prune(manifold, &pose_a, &pose_b, &columns, &mut change.destroyed);
            }

            Self::apply_change(world, manifold_entity, &change);
        }
    }

    /// Runs the per-manifold pipeline on the worker pool.
    ///
    /// Workers mutate only the manifold assigned to their index and the
    /// contact points it owns; creations and destructions are recorded in
    /// per-index buffers. `completion` is invoked once every iteration has
    /// finished; the caller must then run
    /// [`finish_parallel`](Self::finish_parallel) to commit the buffers.
    pub fn update_parallel(&mut self, world: &mut World, completion: Job) {
        assert!(
            self.parallelizable(world),
            "the parallel narrowphase requires more than one manifold"
        );

        update_contact_distances(world);

        self.order.clear();
        self.order.extend(world.manifolds.entities());
        self.order.sort_unstable();

        let num_manifolds = self.order.len();
        self.changes.clear();
        self.changes.resize_with(num_manifolds, Default::default);

        let World {
            aabbs,
            shapes,
            positions,
            orientations,
            manifolds,
            contact_points,
            constraints,
            constraint_rows,
            ..
        } = &mut *world;
        let bodies = BodyView {
            aabbs: &*aabbs,
            shapes: &*shapes,
            positions: &*positions,
            orientations: &*orientations,
        };
        let manifold_access = manifolds.par_access();
        let columns = ContactColumns {
            points: contact_points.par_access(),
            constraints: constraints.par_access(),
            rows: constraint_rows.par_access(),
        };
        let changes = ParSliceMut::new(&mut self.changes);
        let order = &self.order;

        parallel_for(0, num_manifolds, 1, completion, |i| {
            let manifold_entity = order[i];
            // SAFETY: the manifold order holds each entity once, so
            // iteration `i` is the only accessor of this manifold, of the
            // contact points it owns, and of buffer slot `i`.
            let manifold = unsafe { manifold_access.get_mut(manifold_entity) }
                .expect("narrowphase over a missing manifold");
            let change = unsafe { changes.get_mut(i) };

            let result = detect_collision(manifold, &bodies);
            process_collision(manifold, &result, &columns, change);

            let pose_a = bodies
                .pose(manifold.body[0])
                .expect("manifold body without a pose");
            let pose_b = bodies
                .pose(manifold.body[1])
                .expect("manifold body without a pose");
            prune(manifold, &pose_a, &pose_b, &columns, &mut change.destroyed);
        });
    }

    /// Applies the side effects buffered by
    /// [`update_parallel`](Self::update_parallel): contact points are
    /// created, then destroyed, in manifold-index order, and the buffers
    /// are cleared.
    pub fn finish_parallel(&mut self, world: &mut World) {
        for (i, &manifold_entity) in self.order.iter().enumerate() {
            for &updated in &self.changes[i].updated {
                let _ = world.dirty.entry(updated).updated::<ContactPoint>();
            }
            for rp in &self.changes[i].created {
                create_contact_point(world, manifold_entity, rp);
            }
        }

        for (i, &manifold_entity) in self.order.iter().enumerate() {
            for &point in &self.changes[i].destroyed {
                destroy_contact_point(world, manifold_entity, point);
            }
        }

        self.changes.clear();
        self.order.clear();
    }

    fn apply_change(world: &mut World, manifold_entity: Entity, change: &ManifoldChange) {
        for &updated in &change.updated {
            let _ = world.dirty.entry(updated).updated::<ContactPoint>();
        }
        for rp in &change.created {
            create_contact_point(world, manifold_entity, rp);
        }
        for &point in &change.destroyed {
            destroy_contact_point(world, manifold_entity, point);
        }
    }
}
