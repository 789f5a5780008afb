use crate::math::{Isometry, Point, Real, Vector, EPSILON};
use crate::query::{CollisionPoint, CollisionResult, Unsupported};
use crate::shape::{Ball, Capsule, Cuboid, HalfSpace, ShapeKind};

/// Computes the closest points between two shapes.
///
/// Points are reported only when their signed separation is below
/// `threshold`. See [`CollisionPoint`] for the frame and sign conventions
/// of the returned entries. Returns [`Unsupported`] when no routine exists
/// for the given pair of shape types.
pub fn collide(
    shape_a: &ShapeKind,
    pose_a: &Isometry<Real>,
    shape_b: &ShapeKind,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> Result<CollisionResult, Unsupported> {
    use ShapeKind::*;

    match (shape_a, shape_b) {
        (Ball(a), Ball(b)) => Ok(ball_ball(a, pose_a, b, pose_b, threshold)),
        (Ball(a), HalfSpace(b)) => Ok(ball_halfspace(a, pose_a, b, pose_b, threshold)),
        (HalfSpace(a), Ball(b)) => Ok(flipped(
            ball_halfspace(b, pose_b, a, pose_a, threshold),
            pose_b,
            pose_a,
        )),
        (Ball(a), Cuboid(b)) => Ok(ball_cuboid(a, pose_a, b, pose_b, threshold)),
        (Cuboid(a), Ball(b)) => Ok(flipped(
            ball_cuboid(b, pose_b, a, pose_a, threshold),
            pose_b,
            pose_a,
        )),
        (Cuboid(a), HalfSpace(b)) => Ok(cuboid_halfspace(a, pose_a, b, pose_b, threshold)),
        (HalfSpace(a), Cuboid(b)) => Ok(flipped(
            cuboid_halfspace(b, pose_b, a, pose_a, threshold),
            pose_b,
            pose_a,
        )),
        (Capsule(a), HalfSpace(b)) => Ok(capsule_halfspace(a, pose_a, b, pose_b, threshold)),
        (HalfSpace(a), Capsule(b)) => Ok(flipped(
            capsule_halfspace(b, pose_b, a, pose_a, threshold),
            pose_b,
            pose_a,
        )),
        _ => Err(Unsupported),
    }
}

/// Swaps the roles of the two bodies in `result`.
///
/// `pose_a` and `pose_b` are the poses the original computation used for
/// its first and second body.
fn flipped(
    mut result: CollisionResult,
    pose_a: &Isometry<Real>,
    pose_b: &Isometry<Real>,
) -> CollisionResult {
    for pt in &mut result.points {
        let n_world = pose_b.rotation * pt.normal_b;
        *pt = CollisionPoint {
            pivot_a: pt.pivot_b,
            pivot_b: pt.pivot_a,
            normal_b: pose_a.inverse_transform_vector(&-n_world),
            distance: pt.distance,
        };
    }

    result
}

fn ball_ball(
    ball_a: &Ball,
    pose_a: &Isometry<Real>,
    ball_b: &Ball,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> CollisionResult {
    let mut result = CollisionResult::new();

    let dcenter = pose_a.translation.vector - pose_b.translation.vector;
    let center_dist = dcenter.norm();
    let distance = center_dist - ball_a.radius - ball_b.radius;

    if distance < threshold {
        // Points from the second ball toward the first. Coincident centers
        // leave the direction undefined; any axis separates them.
        let n_world = if center_dist > EPSILON {
            dcenter / center_dist
        } else {
            Vector::y()
        };

        let pa_world = Point::from(pose_a.translation.vector) - n_world * ball_a.radius;
        let pb_world = Point::from(pose_b.translation.vector) + n_world * ball_b.radius;

        result.push_deepest(CollisionPoint {
            pivot_a: pose_a.inverse_transform_point(&pa_world),
            pivot_b: pose_b.inverse_transform_point(&pb_world),
            normal_b: pose_b.inverse_transform_vector(&n_world),
            distance,
        });
    }

    result
}

fn ball_halfspace(
    ball: &Ball,
    pose_a: &Isometry<Real>,
    halfspace: &HalfSpace,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> CollisionResult {
    let mut result = CollisionResult::new();

    let n_world = pose_b.rotation * halfspace.normal;
    let center = Point::from(pose_a.translation.vector);
    let plane_point = Point::from(pose_b.translation.vector);
    let distance = (center - plane_point).dot(&n_world) - ball.radius;

    if distance < threshold {
        let pa_world = center - *n_world * ball.radius;
        let pb_world = pa_world - *n_world * distance;

        result.push_deepest(CollisionPoint {
            pivot_a: pose_a.inverse_transform_point(&pa_world),
            pivot_b: pose_b.inverse_transform_point(&pb_world),
            normal_b: *halfspace.normal,
            distance,
        });
    }

    result
}

fn cuboid_halfspace(
    cuboid: &Cuboid,
    pose_a: &Isometry<Real>,
    halfspace: &HalfSpace,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> CollisionResult {
    let mut result = CollisionResult::new();

    let n_world = pose_b.rotation * halfspace.normal;
    let plane_point = Point::from(pose_b.translation.vector);

    for vertex in cuboid.vertices() {
        let vertex_world = pose_a * vertex;
        let distance = (vertex_world - plane_point).dot(&n_world);

        if distance < threshold {
            let pb_world = vertex_world - *n_world * distance;

            result.push_deepest(CollisionPoint {
                pivot_a: vertex,
                pivot_b: pose_b.inverse_transform_point(&pb_world),
                normal_b: *halfspace.normal,
                distance,
            });
        }
    }

    result
}

fn capsule_halfspace(
    capsule: &Capsule,
    pose_a: &Isometry<Real>,
    halfspace: &HalfSpace,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> CollisionResult {
    let mut result = CollisionResult::new();

    let n_world = pose_b.rotation * halfspace.normal;
    let plane_point = Point::from(pose_b.translation.vector);

    for endpoint in capsule.endpoints() {
        let center = pose_a * endpoint;
        let distance = (center - plane_point).dot(&n_world) - capsule.radius;

        if distance < threshold {
            let pa_world = center - *n_world * capsule.radius;
            let pb_world = pa_world - *n_world * distance;

            result.push_deepest(CollisionPoint {
                pivot_a: pose_a.inverse_transform_point(&pa_world),
                pivot_b: pose_b.inverse_transform_point(&pb_world),
                normal_b: *halfspace.normal,
                distance,
            });
        }
    }

    result
}

fn ball_cuboid(
    ball: &Ball,
    pose_a: &Isometry<Real>,
    cuboid: &Cuboid,
    pose_b: &Isometry<Real>,
    threshold: Real,
) -> CollisionResult {
    let mut result = CollisionResult::new();

    let he = cuboid.half_extents;
    let center = pose_b.inverse_transform_point(&Point::from(pose_a.translation.vector));
    let clamped = Point::new(
        center.x.clamp(-he.x, he.x),
        center.y.clamp(-he.y, he.y),
        center.z.clamp(-he.z, he.z),
    );

    let (pivot_b, normal_b, distance) = if clamped != center {
        // Ball center outside the box: closest point is the clamped center.
        let delta = center - clamped;
        let dist_to_box = delta.norm();
        (clamped, delta / dist_to_box, dist_to_box - ball.radius)
    } else {
        // Ball center inside the box: push out through the nearest face.
        let mut axis = 0;
        let mut depth = he.x - center.x.abs();
        for i in 1..3 {
            let d = he[i] - center[i].abs();
            if d < depth {
                depth = d;
                axis = i;
            }
        }

        let sign: Real = if center[axis] >= 0.0 { 1.0 } else { -1.0 };
        let mut normal = Vector::zeros();
        normal[axis] = sign;
        let mut face_point = center;
        face_point[axis] = sign * he[axis];

        (face_point, normal, -(depth + ball.radius))
    };

    if distance < threshold {
        let n_world = pose_b.rotation * normal_b;
        let pa_world = Point::from(pose_a.translation.vector) - n_world * ball.radius;

        result.push_deepest(CollisionPoint {
            pivot_a: pose_a.inverse_transform_point(&pa_world),
            pivot_b,
            normal_b,
            distance,
        });
    }

    result
}
