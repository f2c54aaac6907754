//! Contact resolution
//!
//! Positions are projected apart first (no velocity change), then sequential
//! impulses fix up velocities with restitution and friction. Iteration counts
//! come from the world each update.

use super::body::RigidBody;
use super::collision::Contact;
use super::vec2::Vec2;

/// Allowed overlap (px) before positions get pushed apart.
const POSITION_SLOP: f64 = 0.05;
/// Share of the remaining overlap removed per position iteration.
const POSITION_FACTOR: f64 = 0.6;
/// Approach speed (px/ms) below which contacts do not bounce.
const RESTITUTION_THRESHOLD: f64 = 0.05;
/// Sliding speed (px/ms) below which static friction applies.
const STATIC_SPEED: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default)]
struct PointState {
    r_a: Vec2,
    r_b: Vec2,
    normal_mass: f64,
    tangent_mass: f64,
    bounce: f64,
    normal_impulse: f64,
    tangent_impulse: f64,
}

/// Solver bookkeeping for one contact.
pub(crate) struct ContactSolve {
    contact: Contact,
    start_a: Vec2,
    start_b: Vec2,
    friction: f64,
    friction_static: f64,
    restitution: f64,
    points: [PointState; 2],
}

impl ContactSolve {
    pub(crate) fn prepare(bodies: &[RigidBody], contacts: Vec<Contact>) -> Vec<ContactSolve> {
        contacts
            .into_iter()
            .map(|contact| {
                let a = &bodies[contact.a];
                let b = &bodies[contact.b];
                ContactSolve {
                    start_a: a.pos,
                    start_b: b.pos,
                    friction: a.friction.min(b.friction),
                    friction_static: a.friction_static.max(b.friction_static),
                    restitution: a.restitution.max(b.restitution),
                    points: [PointState::default(); 2],
                    contact,
                }
            })
            .collect()
    }
}

/// Borrow two distinct bodies mutably.
fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(a < b);
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

/// Push overlapping bodies apart along the contact normal.
pub(crate) fn solve_positions(bodies: &mut [RigidBody], solves: &[ContactSolve], iterations: u32) {
    for _ in 0..iterations {
        for solve in solves {
            let c = &solve.contact;
            let (a, b) = pair_mut(bodies, c.a, c.b);
            let total_inv = a.inv_mass + b.inv_mass;
            if total_inv == 0.0 {
                continue;
            }

            let moved = ((b.pos - solve.start_b) - (a.pos - solve.start_a)).dot(c.normal);
            let overlap = c.depth - moved - POSITION_SLOP;
            if overlap <= 0.0 {
                continue;
            }

            let push = c.normal * (overlap * POSITION_FACTOR / total_inv);
            if !a.is_immovable() {
                a.pos -= push * a.inv_mass;
            }
            if !b.is_immovable() {
                b.pos += push * b.inv_mass;
            }
        }
    }
}

/// Sequential impulses over every contact point.
pub(crate) fn solve_velocities(bodies: &mut [RigidBody], solves: &mut [ContactSolve], iterations: u32) {
    for solve in solves.iter_mut() {
        let n = solve.contact.normal;
        let t = n.perp();
        let (a, b) = pair_mut(bodies, solve.contact.a, solve.contact.b);
        for (i, &p) in solve.contact.points().iter().enumerate() {
            let r_a = p - a.pos;
            let r_b = p - b.pos;
            let effective = |axis: Vec2| {
                let ra = r_a.cross(axis);
                let rb = r_b.cross(axis);
                let k = a.inv_mass + b.inv_mass + a.inv_inertia * ra * ra + b.inv_inertia * rb * rb;
                if k > 0.0 { 1.0 / k } else { 0.0 }
            };
            let approach = (b.velocity_at(r_b) - a.velocity_at(r_a)).dot(n);
            solve.points[i] = PointState {
                r_a,
                r_b,
                normal_mass: effective(n),
                tangent_mass: effective(t),
                bounce: if approach < -RESTITUTION_THRESHOLD { -solve.restitution * approach } else { 0.0 },
                normal_impulse: 0.0,
                tangent_impulse: 0.0,
            };
        }
    }

    for _ in 0..iterations {
        for solve in solves.iter_mut() {
            let n = solve.contact.normal;
            let t = n.perp();
            let count = solve.contact.point_count;
            let (a, b) = pair_mut(bodies, solve.contact.a, solve.contact.b);

            for point in solve.points[..count].iter_mut() {
                // normal
                let rv = b.velocity_at(point.r_b) - a.velocity_at(point.r_a);
                let vn = rv.dot(n);
                let dj = (point.bounce - vn) * point.normal_mass;
                let total = (point.normal_impulse + dj).max(0.0);
                let dj = total - point.normal_impulse;
                point.normal_impulse = total;
                let impulse = n * dj;
                a.apply_impulse(-impulse, point.r_a);
                b.apply_impulse(impulse, point.r_b);

                // friction
                let rv = b.velocity_at(point.r_b) - a.velocity_at(point.r_a);
                let vt = rv.dot(t);
                let mut max_friction = solve.friction * point.normal_impulse;
                if vt.abs() < STATIC_SPEED {
                    max_friction *= 1.0 + solve.friction_static;
                }
                let djt = -vt * point.tangent_mass;
                let total = (point.tangent_impulse + djt).clamp(-max_friction, max_friction);
                let djt = total - point.tangent_impulse;
                point.tangent_impulse = total;
                let impulse = t * djt;
                a.apply_impulse(-impulse, point.r_a);
                b.apply_impulse(impulse, point.r_b);
            }
        }
    }
}
