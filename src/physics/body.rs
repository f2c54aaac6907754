use super::vec2::Vec2;

/// Index of a rigid body in its [`PhysicsWorld`](super::PhysicsWorld).
///
/// Handles stay valid for the lifetime of the world; bodies are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Creation options for a rectangular body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyOptions {
    /// Static bodies never move and have infinite mass.
    pub is_static: bool,
    /// Kinetic friction coefficient.
    pub friction: f64,
    /// Velocity loss per 16ms while airborne.
    pub friction_air: f64,
    /// Multiplier on friction while the contact is (nearly) at rest.
    pub friction_static: f64,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f64,
    /// Mass per square pixel.
    pub density: f64,
    /// Initial rotation (radians)
    pub angle: f64,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            is_static: false,
            friction: 0.1,
            friction_air: 0.01,
            friction_static: 0.5,
            restitution: 0.0,
            density: 0.001,
            angle: 0.0,
        }
    }
}

impl BodyOptions {
    pub fn fixed() -> Self {
        Self { is_static: true, ..Self::default() }
    }
}

/// Rigid Body - an oriented rectangle that moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (pixels per millisecond)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f64,
    /// Angular velocity (radians per millisecond)
    pub angular_vel: f64,

    // === Mass ===
    pub mass: f64,
    pub inv_mass: f64,
    /// Moment of inertia for a solid rectangle: m(w² + h²)/12
    pub inertia: f64,
    pub inv_inertia: f64,
    pub is_static: bool,

    // === Shape ===
    pub half_width: f64,
    pub half_height: f64,

    // === Material properties ===
    pub friction: f64,
    pub friction_air: f64,
    pub friction_static: f64,
    pub restitution: f64,
}

impl RigidBody {
    /// Create a rectangular rigid body centered at `(x, y)`.
    ///
    /// Zero or negative extents are accepted; such a body simply has no mass
    /// to speak of and is treated like a static one by the solver.
    pub fn new_rect(x: f64, y: f64, width: f64, height: f64, options: &BodyOptions) -> Self {
        let area = (width * height).abs();
        let (mass, inertia) = if options.is_static {
            (f64::INFINITY, f64::INFINITY)
        } else {
            let m = area * options.density;
            (m, m * (width * width + height * height) / 12.0)
        };

        let inv = |v: f64| if v.is_finite() && v > 0.0 { 1.0 / v } else { 0.0 };

        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            angle: options.angle,
            angular_vel: 0.0,
            mass,
            inv_mass: inv(mass),
            inertia,
            inv_inertia: inv(inertia),
            is_static: options.is_static,
            half_width: width / 2.0,
            half_height: height / 2.0,
            friction: options.friction,
            friction_air: options.friction_air,
            friction_static: options.friction_static,
            restitution: options.restitution,
        }
    }

    /// True when impulses and corrections have no effect on this body.
    #[inline]
    pub fn is_immovable(&self) -> bool {
        self.is_static || self.inv_mass == 0.0
    }

    /// Transform local coordinates to world coordinates
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.pos + local.rotate(self.angle)
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        (world - self.pos).rotate(-self.angle)
    }

    /// Corners in world space, in winding order.
    pub fn corners(&self) -> [Vec2; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [
            self.local_to_world(Vec2::new(-hw, -hh)),
            self.local_to_world(Vec2::new(hw, -hh)),
            self.local_to_world(Vec2::new(hw, hh)),
            self.local_to_world(Vec2::new(-hw, hh)),
        ]
    }

    /// The two face normals (the other two are their negations).
    pub fn axes(&self) -> [Vec2; 2] {
        let x = Vec2::new(1.0, 0.0).rotate(self.angle);
        [x, x.perp()]
    }

    /// Axis-aligned bounds `(min, max)` of the rotated rectangle.
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let (sin, cos) = self.angle.sin_cos();
        let ex = (self.half_width * cos).abs() + (self.half_height * sin).abs();
        let ey = (self.half_width * sin).abs() + (self.half_height * cos).abs();
        (
            Vec2::new(self.pos.x - ex, self.pos.y - ey),
            Vec2::new(self.pos.x + ex, self.pos.y + ey),
        )
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let local = self.world_to_local(point);
        local.x.abs() <= self.half_width.abs() && local.y.abs() <= self.half_height.abs()
    }

    /// Velocity of a point offset `r` from the center of mass.
    #[inline]
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + r.cross_scalar(self.angular_vel)
    }

    /// Apply impulse at an offset `r` from the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_immovable() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_vel += r.cross(impulse) * self.inv_inertia;
    }

    /// Shift position (and rotation) without touching velocity.
    pub fn apply_correction(&mut self, correction: Vec2, r: Vec2) {
        if self.is_immovable() {
            return;
        }
        self.pos += correction * self.inv_mass;
        self.angle += r.cross(correction) * self.inv_inertia;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_mass_and_inertia() {
        let body = RigidBody::new_rect(0.0, 0.0, 30.0, 30.0, &BodyOptions::default());
        assert!((body.mass - 0.9).abs() < 1e-12);
        assert!((body.inertia - 0.9 * 1800.0 / 12.0).abs() < 1e-9);
        assert!(body.inv_mass > 0.0);
    }

    #[test]
    fn test_static_body_ignores_impulse() {
        let mut body = RigidBody::new_rect(5.0, 5.0, 10.0, 10.0, &BodyOptions::fixed());
        body.apply_impulse(Vec2::new(100.0, 0.0), Vec2::zero());
        body.apply_correction(Vec2::new(100.0, 0.0), Vec2::zero());
        assert_eq!(body.velocity, Vec2::zero());
        assert_eq!(body.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_zero_size_body_is_immovable() {
        let body = RigidBody::new_rect(0.0, 0.0, 0.0, 0.0, &BodyOptions::default());
        assert!(body.is_immovable());
    }

    #[test]
    fn test_rotated_aabb_grows() {
        let mut body = RigidBody::new_rect(0.0, 0.0, 20.0, 20.0, &BodyOptions::default());
        body.angle = std::f64::consts::FRAC_PI_4;
        let (min, max) = body.aabb();
        let half_diag = 10.0 * std::f64::consts::SQRT_2;
        assert!((max.x - half_diag).abs() < 1e-9);
        assert!((min.y + half_diag).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point_respects_rotation() {
        let mut body = RigidBody::new_rect(0.0, 0.0, 40.0, 4.0, &BodyOptions::default());
        assert!(body.contains_point(Vec2::new(15.0, 0.0)));
        body.angle = std::f64::consts::FRAC_PI_2;
        assert!(!body.contains_point(Vec2::new(15.0, 0.0)));
        assert!(body.contains_point(Vec2::new(0.0, 15.0)));
    }
}
