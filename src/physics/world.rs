//! PhysicsWorld - owns every rigid body plus the global simulation knobs
//!
//! Per update:
//! 1. Integrate gravity and air friction
//! 2. Solve the pointer-drag constraint (constraint iterations)
//! 3. Detect contacts
//! 4. Project overlapping bodies apart (position iterations)
//! 5. Resolve contact velocities (velocity iterations)

use super::body::{BodyHandle, BodyOptions, RigidBody};
use super::collision::detect_contacts;
use super::mouse::MouseConstraint;
use super::solver::{solve_positions, solve_velocities, ContactSolve};
use super::vec2::Vec2;

/// Nominal frame length the air-friction coefficient is expressed against (ms).
const AIR_FRICTION_BASE_MS: f64 = 16.0;

/// Gravity as direction times strength: acceleration = (x, y) * scale px/ms².
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { scale: 0.001, x: 0.0, y: 1.0 }
    }
}

/// Solver passes per update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverIterations {
    pub constraint: u32,
    pub position: u32,
    pub velocity: u32,
}

impl SolverIterations {
    pub const BASE: SolverIterations = SolverIterations { constraint: 2, position: 6, velocity: 4 };
}

impl Default for SolverIterations {
    fn default() -> Self {
        Self::BASE
    }
}

/// Manages all rigid bodies in the simulation
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    pub gravity: Gravity,
    pub iterations: SolverIterations,
    mouse: Option<MouseConstraint>,
    contact_count: usize,
    elapsed_ms: f64,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Gravity::default(),
            iterations: SolverIterations::default(),
            mouse: None,
            contact_count: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Add a rectangular body centered at `(x, y)`.
    pub fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64, options: &BodyOptions) -> BodyHandle {
        self.add_body(RigidBody::new_rect(x, y, width, height, options))
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Install the pointer-drag constraint, replacing any previous one.
    pub fn set_mouse_constraint(&mut self, mouse: MouseConstraint) {
        self.mouse = Some(mouse);
    }

    pub fn mouse(&self) -> Option<&MouseConstraint> {
        self.mouse.as_ref()
    }

    pub fn mouse_mut(&mut self) -> Option<&mut MouseConstraint> {
        self.mouse.as_mut()
    }

    /// Contacts found during the last update.
    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    /// Simulated time so far (ms).
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance the simulation by `delta_ms`. Non-positive or non-finite deltas do nothing.
    pub fn update(&mut self, delta_ms: f64) {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return;
        }

        self.integrate(delta_ms);

        if let Some(mouse) = self.mouse.as_mut() {
            mouse.update_grab(&self.bodies);
            mouse.solve(&mut self.bodies, delta_ms, self.iterations.constraint);
        }

        let contacts = detect_contacts(&self.bodies);
        self.contact_count = contacts.len();
        let mut solves = ContactSolve::prepare(&self.bodies, contacts);
        solve_positions(&mut self.bodies, &solves, self.iterations.position);
        solve_velocities(&mut self.bodies, &mut solves, self.iterations.velocity);

        self.elapsed_ms += delta_ms;
    }

    fn integrate(&mut self, delta_ms: f64) {
        let accel = Vec2::new(self.gravity.x, self.gravity.y) * self.gravity.scale;
        for body in self.bodies.iter_mut() {
            if body.is_immovable() {
                continue;
            }
            let keep = (1.0 - body.friction_air * delta_ms / AIR_FRICTION_BASE_MS).max(0.0);
            body.velocity = (body.velocity + accel * delta_ms) * keep;
            body.angular_vel *= keep;
            body.pos += body.velocity * delta_ms;
            body.angle += body.angular_vel * delta_ms;
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
