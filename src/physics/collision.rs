//! Box-box contacts
//!
//! Broad phase: sweep-and-prune over x-sorted AABBs.
//! Narrow phase: separating-axis test over the four face normals, then
//! contact points from corners that sit inside the other box.

use super::body::RigidBody;
use super::vec2::Vec2;

/// Corners closer than this (px) count as inside the other box.
const CONTAINS_MARGIN: f64 = 0.05;

/// A touching pair found during one world update.
#[derive(Clone, Debug)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    /// Unit normal pointing from `a` towards `b`.
    pub normal: Vec2,
    /// Penetration depth along `normal` (px).
    pub depth: f64,
    pub points: [Vec2; 2],
    pub point_count: usize,
}

impl Contact {
    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.point_count]
    }
}

/// Find every touching pair of bodies. Pairs of two immovable bodies are skipped.
pub fn detect_contacts(bodies: &[RigidBody]) -> Vec<Contact> {
    let bounds: Vec<(Vec2, Vec2)> = bodies.iter().map(RigidBody::aabb).collect();
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    order.sort_by(|&i, &j| bounds[i].0.x.total_cmp(&bounds[j].0.x));

    let mut contacts = Vec::new();
    for (n, &i) in order.iter().enumerate() {
        let (min_i, max_i) = bounds[i];
        for &j in &order[n + 1..] {
            let (min_j, max_j) = bounds[j];
            if min_j.x > max_i.x {
                break;
            }
            if min_j.y > max_i.y || max_j.y < min_i.y {
                continue;
            }
            if bodies[i].is_immovable() && bodies[j].is_immovable() {
                continue;
            }
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            if let Some(mut contact) = collide(&bodies[a], &bodies[b]) {
                contact.a = a;
                contact.b = b;
                contacts.push(contact);
            }
        }
    }
    contacts
}

/// Separating-axis test for two oriented rectangles.
///
/// The returned contact carries placeholder indices; [`detect_contacts`] fills them in.
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    let corners_a = a.corners();
    let corners_b = b.corners();
    let [a0, a1] = a.axes();
    let [b0, b1] = b.axes();

    let mut depth = f64::INFINITY;
    let mut normal = Vec2::zero();
    for axis in [a0, a1, b0, b1] {
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        let overlap = (max_a - min_b).min(max_b - min_a);
        if overlap <= 0.0 {
            return None;
        }
        if overlap < depth {
            depth = overlap;
            normal = axis;
        }
    }

    if (b.pos - a.pos).dot(normal) < 0.0 {
        normal = -normal;
    }

    let (_, max_a) = project(&corners_a, normal);
    let (min_b, _) = project(&corners_b, normal);

    // (point, penetration) candidates
    let mut candidates: Vec<(Vec2, f64)> = Vec::with_capacity(8);
    for &p in &corners_b {
        if contains(a, p) {
            candidates.push((p, max_a - p.dot(normal)));
        }
    }
    for &p in &corners_a {
        if contains(b, p) {
            candidates.push((p, p.dot(normal) - min_b));
        }
    }
    if candidates.is_empty() {
        // Edge-edge crossing with no corner inside: use b's deepest corner.
        let deepest = corners_b
            .iter()
            .copied()
            .min_by(|p, q| p.dot(normal).total_cmp(&q.dot(normal)))
            .unwrap_or(b.pos);
        candidates.push((deepest, depth));
    }
    candidates.sort_by(|p, q| q.1.total_cmp(&p.1));

    let mut points = [Vec2::zero(); 2];
    let mut point_count = 0;
    for (p, _) in candidates {
        if point_count == 2 {
            break;
        }
        if point_count == 1 && (points[0] - p).length_squared() < 0.25 {
            continue;
        }
        points[point_count] = p;
        point_count += 1;
    }

    Some(Contact { a: 0, b: 0, normal, depth, points, point_count })
}

fn project(corners: &[Vec2; 4], axis: Vec2) -> (f64, f64) {
    let mut min = corners[0].dot(axis);
    let mut max = min;
    for c in &corners[1..] {
        let p = c.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

fn contains(body: &RigidBody, point: Vec2) -> bool {
    let local = body.world_to_local(point);
    local.x.abs() <= body.half_width.abs() + CONTAINS_MARGIN
        && local.y.abs() <= body.half_height.abs() + CONTAINS_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyOptions;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> RigidBody {
        RigidBody::new_rect(x, y, w, h, &BodyOptions::default())
    }

    #[test]
    fn test_separated_boxes_do_not_collide() {
        assert!(collide(&rect(0.0, 0.0, 10.0, 10.0), &rect(20.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn test_resting_box_gets_two_points_and_upward_normal() {
        // b sits on top of a, overlapping by 1px (y grows downwards)
        let a = rect(0.0, 30.0, 30.0, 30.0);
        let b = rect(0.0, 1.0, 30.0, 30.0);
        let contact = collide(&a, &b).expect("boxes overlap");
        assert!((contact.depth - 1.0).abs() < 1e-9);
        assert!((contact.normal.y + 1.0).abs() < 1e-9);
        assert_eq!(contact.point_count, 2);
    }

    #[test]
    fn test_normal_points_from_a_to_b() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 0.0, 10.0, 10.0);
        let contact = collide(&a, &b).expect("boxes overlap");
        assert!(contact.normal.x > 0.99);
        assert!((contact.depth - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_detect_skips_static_pairs() {
        let wall = RigidBody::new_rect(0.0, 0.0, 100.0, 10.0, &BodyOptions::fixed());
        let other = RigidBody::new_rect(5.0, 0.0, 100.0, 10.0, &BodyOptions::fixed());
        let falling = rect(0.0, -9.0, 10.0, 10.0);
        let contacts = detect_contacts(&[wall, other, falling]);
        assert!(contacts.iter().all(|c| c.b == 2 || c.a == 2));
        assert_eq!(contacts.len(), 2);
    }
}
