//! Pointer-drag constraint
//!
//! A spring between the pointer and a point on the grabbed body. The host feeds
//! pointer events; the world resolves the grab and solves the spring during
//! `update`.

use super::body::{BodyHandle, RigidBody};
use super::vec2::Vec2;

/// Latest pointer state reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub pressed: bool,
}

#[derive(Clone, Debug)]
pub struct MouseConstraint {
    pub pointer: Pointer,
    /// 0..1; share of the anchor-to-pointer gap closed per iteration.
    pub stiffness: f64,
    /// 0..1; share of the anchor's velocity along the spring removed per iteration.
    pub damping: f64,
    grabbed: Option<BodyHandle>,
    /// Grab point in the body's local frame.
    local_anchor: Vec2,
}

impl MouseConstraint {
    pub fn new(stiffness: f64) -> Self {
        Self {
            pointer: Pointer::default(),
            stiffness,
            damping: 0.0,
            grabbed: None,
            local_anchor: Vec2::zero(),
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer = Pointer { position: Vec2::new(x, y), pressed: true };
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.position = Vec2::new(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.pressed = false;
    }

    pub fn grabbed(&self) -> Option<BodyHandle> {
        self.grabbed
    }

    /// Grab the topmost movable body under a pressed pointer; let go on release.
    pub(crate) fn update_grab(&mut self, bodies: &[RigidBody]) {
        if !self.pointer.pressed {
            self.grabbed = None;
            return;
        }
        if self.grabbed.is_some() {
            return;
        }
        let point = self.pointer.position;
        if let Some((index, body)) = bodies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| !b.is_immovable() && b.contains_point(point))
        {
            self.grabbed = Some(BodyHandle(index));
            self.local_anchor = body.world_to_local(point);
        }
    }

    pub(crate) fn solve(&self, bodies: &mut [RigidBody], delta_ms: f64, iterations: u32) {
        let Some(handle) = self.grabbed else {
            return;
        };
        let Some(body) = bodies.get_mut(handle.0) else {
            return;
        };
        if body.is_immovable() {
            return;
        }

        for _ in 0..iterations {
            let anchor = body.local_to_world(self.local_anchor);
            let r = anchor - body.pos;
            let gap = self.pointer.position - anchor;
            if gap.length_squared() < 1e-12 {
                break;
            }

            let correction = gap * self.stiffness;
            let spin = r.cross(correction) * body.inv_inertia * body.mass;
            body.pos += correction;
            body.angle += spin;
            body.velocity += correction * (1.0 / delta_ms);
            body.angular_vel += spin / delta_ms;

            if self.damping > 0.0 {
                let along = gap.normalize();
                let speed = body.velocity_at(r).dot(along);
                body.velocity -= along * (speed * self.damping);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyOptions;

    fn bodies() -> Vec<RigidBody> {
        vec![
            RigidBody::new_rect(0.0, 0.0, 100.0, 100.0, &BodyOptions::fixed()),
            RigidBody::new_rect(10.0, 10.0, 30.0, 30.0, &BodyOptions::default()),
        ]
    }

    #[test]
    fn test_grabs_dynamic_body_under_pointer() {
        let bodies = bodies();
        let mut mouse = MouseConstraint::new(0.1);
        mouse.pointer_down(12.0, 8.0);
        mouse.update_grab(&bodies);
        assert_eq!(mouse.grabbed(), Some(BodyHandle(1)));
    }

    #[test]
    fn test_ignores_static_body_and_releases() {
        let bodies = bodies();
        let mut mouse = MouseConstraint::new(0.1);
        mouse.pointer_down(-40.0, -40.0);
        mouse.update_grab(&bodies);
        assert_eq!(mouse.grabbed(), None);

        mouse.pointer_move(10.0, 10.0);
        mouse.update_grab(&bodies);
        assert_eq!(mouse.grabbed(), Some(BodyHandle(1)));

        mouse.pointer_up();
        mouse.update_grab(&bodies);
        assert_eq!(mouse.grabbed(), None);
    }

    #[test]
    fn test_spring_pulls_towards_pointer() {
        let mut bodies = bodies();
        let mut mouse = MouseConstraint::new(0.2);
        mouse.pointer_down(10.0, 10.0);
        mouse.update_grab(&bodies);
        mouse.pointer_move(60.0, 10.0);
        mouse.solve(&mut bodies, 16.0, 2);
        assert!(bodies[1].pos.x > 10.0);
        assert!(bodies[1].velocity.x > 0.0);
        assert_eq!(bodies[0].pos, Vec2::zero());
    }
}
