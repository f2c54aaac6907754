use crate::physics::{BodyHandle, BodyOptions, PhysicsWorld};
use crate::render::{Color, Surface};
use crate::settings::Settings;

/// A drawable rectangle backed by one rigid body in the world.
///
/// The world owns the rigid body; `Body` keeps only its handle plus the
/// visual size and color. Size always equals the rigid body's extents.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    handle: BodyHandle,
    width: f64,
    height: f64,
    color: Color,
}

impl Body {
    /// Create the rigid body centered at `(x, y)` and wrap it.
    ///
    /// Dimensions go to the world unchecked.
    pub fn new(
        world: &mut PhysicsWorld,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        options: &BodyOptions,
    ) -> Self {
        let handle = world.add_rect(x, y, width, height, options);
        Self { handle, width, height, color }
    }

    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Copy the shared material settings onto the rigid body.
    pub fn apply_material(&self, world: &mut PhysicsWorld, settings: &Settings) -> Result<(), String> {
        let body = world
            .body_mut(self.handle)
            .ok_or_else(|| format!("body {} is not in the world", self.handle.index()))?;
        body.friction = settings.friction.normal;
        body.friction_air = settings.friction.air;
        body.friction_static = settings.friction.static_;
        body.restitution = settings.restitution;
        Ok(())
    }

    /// Paint the body at its rigid body's current position and angle.
    ///
    /// The surface's transform stack is restored even if a transform call fails.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        world: &PhysicsWorld,
        surface: &mut S,
        glow_intensity: f64,
    ) -> Result<(), String> {
        let body = world
            .body(self.handle)
            .ok_or_else(|| format!("body {} is not in the world", self.handle.index()))?;

        let css = self.color.to_css();
        surface.set_fill_color(&css);
        surface.set_shadow_color(&css);
        surface.set_shadow_blur(glow_intensity);

        surface.save();
        let painted = self.paint(surface, body.pos.x, body.pos.y, body.angle);
        surface.restore();
        painted
    }

    fn paint<S: Surface + ?Sized>(&self, surface: &mut S, x: f64, y: f64, angle: f64) -> Result<(), String> {
        surface.translate(x, y)?;
        surface.rotate(angle)?;
        surface.fill_rect(-self.width / 2.0, -self.height / 2.0, self.width, self.height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingSurface, Transform};

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_draw_fills_centered_rect() {
        let mut world = PhysicsWorld::new();
        let body = Body::new(&mut world, 100.0, 100.0, 30.0, 30.0, RED, &BodyOptions::default());
        let mut surface = RecordingSurface::new();

        body.draw(&world, &mut surface, 0.0).expect("draws");

        let fills = surface.fills();
        assert_eq!(fills.len(), 1);
        let (x0, y0, x1, y1) = fills[0].bounds();
        assert!((x0 - 85.0).abs() < 1e-9 && (y0 - 85.0).abs() < 1e-9);
        assert!((x1 - 115.0).abs() < 1e-9 && (y1 - 115.0).abs() < 1e-9);
        assert_eq!(fills[0].fill, "rgb(255, 0, 0)");
        assert_eq!(fills[0].shadow_color, "rgb(255, 0, 0)");
        assert_eq!(fills[0].shadow_blur, 0.0);
    }

    #[test]
    fn test_draw_follows_rotation() {
        let mut world = PhysicsWorld::new();
        let body = Body::new(&mut world, 50.0, 50.0, 40.0, 10.0, RED, &BodyOptions::default());
        if let Some(rb) = world.body_mut(body.handle()) {
            rb.angle = std::f64::consts::FRAC_PI_2;
        }
        let mut surface = RecordingSurface::new();
        body.draw(&world, &mut surface, 5.0).expect("draws");

        let (x0, y0, x1, y1) = surface.fills()[0].bounds();
        assert!((x1 - x0 - 10.0).abs() < 1e-9);
        assert!((y1 - y0 - 40.0).abs() < 1e-9);
        assert_eq!(surface.fills()[0].shadow_blur, 5.0);
    }

    #[test]
    fn test_draw_restores_transform_stack() {
        let mut world = PhysicsWorld::new();
        let bodies: Vec<Body> = (0..5)
            .map(|i| {
                let x = 20.0 + i as f64 * 35.0;
                Body::new(&mut world, x, 40.0, 30.0, 30.0, RED, &BodyOptions::default())
            })
            .collect();
        if let Some(rb) = world.body_mut(bodies[2].handle()) {
            rb.angle = 0.7;
        }

        let mut surface = RecordingSurface::new();
        surface.translate(3.0, 4.0).expect("translate");
        let before = surface.transform();
        for body in &bodies {
            body.draw(&world, &mut surface, 10.0).expect("draws");
            assert_eq!(surface.transform(), before);
            assert_eq!(surface.depth(), 0);
        }
        assert_ne!(surface.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_failed_transform_still_restores() {
        let mut world = PhysicsWorld::new();
        let body = Body::new(&mut world, 10.0, 10.0, 5.0, 5.0, RED, &BodyOptions::default());
        let mut surface = RecordingSurface::new();
        surface.fail_transforms = true;

        assert!(body.draw(&world, &mut surface, 0.0).is_err());
        assert_eq!(surface.depth(), 0);
        assert!(surface.fills().is_empty());
    }

    #[test]
    fn test_apply_material_writes_all_four_fields() {
        let mut world = PhysicsWorld::new();
        let body = Body::new(&mut world, 0.0, 0.0, 10.0, 10.0, RED, &BodyOptions::default());
        let mut settings = Settings::default();
        settings.friction.normal = 0.7;
        settings.friction.air = 0.2;
        settings.friction.static_ = 4.0;
        settings.restitution = 0.9;

        body.apply_material(&mut world, &settings).expect("body exists");

        let rb = world.body(body.handle()).expect("body exists");
        assert_eq!((rb.friction, rb.friction_air, rb.friction_static, rb.restitution), (0.7, 0.2, 4.0, 0.9));
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let mut world = PhysicsWorld::new();
        let body = Body::new(&mut world, 0.0, 0.0, 10.0, 10.0, RED, &BodyOptions::default());
        let empty = PhysicsWorld::new();
        let mut surface = RecordingSurface::new();
        assert!(body.draw(&empty, &mut surface, 0.0).is_err());
    }
}
