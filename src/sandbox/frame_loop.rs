//! Frame Loop - per-frame orchestration
//!
//! Each tick re-arms the driver first, then pushes the current settings into
//! the world, draws every body and advances the simulation once. The loop
//! never calls itself: a driver (animation frames in the browser, a manual
//! counter elsewhere) resumes it, and stopping means the driver is simply
//! not asked again.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::random::Rng;
use crate::physics::{PhysicsWorld, SolverIterations};
use crate::render::{Color, Surface};
use crate::settings::{Settings, SharedSettings};

use super::body::Body;
use super::builder::{build_world, WorldLayout};
use super::stats::FrameStats;
use super::timer::FrameTimer;

/// Simulated milliseconds per tick at `time.speed == 1`.
pub const BASE_TIMESTEP_MS: f64 = 16.0;

/// Solver passes for a time speed: the base counts divided by `speed`, rounded.
///
/// Slow motion runs more passes per (shorter) step. A speed that is not a
/// positive number yields the base counts.
pub fn solver_iterations(speed: f64) -> SolverIterations {
    let base = SolverIterations::BASE;
    if !(speed.is_finite() && speed > 0.0) {
        return base;
    }
    let scaled = |count: u32| {
        let n = (count as f64 / speed).round();
        if n.is_finite() { n as u32 } else { count }
    };
    SolverIterations {
        constraint: scaled(base.constraint),
        position: scaled(base.position),
        velocity: scaled(base.velocity),
    }
}

/// Host hook that arranges for the next tick.
pub trait FrameDriver {
    fn request_frame(&mut self) -> Result<(), String>;
}

/// Driver for hosts that call `tick` themselves; it only counts requests.
#[derive(Clone, Debug, Default)]
pub struct ManualDriver {
    pub requested: u64,
}

impl FrameDriver for ManualDriver {
    fn request_frame(&mut self) -> Result<(), String> {
        self.requested += 1;
        Ok(())
    }
}

/// Shared run flag. Clearing it stops the loop at its next tick.
#[derive(Clone, Debug)]
pub struct RunToken(Rc<Cell<bool>>);

impl RunToken {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn resume(&self) {
        self.0.set(true);
    }
}

impl Default for RunToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Work done; the driver was asked for another frame.
    Continue,
    /// Token cleared; nothing drawn, nothing scheduled.
    Stopped,
}

pub struct FrameLoop {
    world: PhysicsWorld,
    bodies: Vec<Body>,
    settings: SharedSettings,
    width: f64,
    height: f64,
    token: RunToken,
    stats: FrameStats,
}

impl FrameLoop {
    /// Build the standard world for `layout` and wrap it in a loop.
    pub fn new(layout: &WorldLayout, settings: SharedSettings, rng: &mut Rng) -> Self {
        let (world, bodies) = build_world(layout, &settings.borrow(), rng);
        Self::from_parts(world, bodies, settings, layout.width, layout.height)
    }

    pub fn from_parts(
        world: PhysicsWorld,
        bodies: Vec<Body>,
        settings: SharedSettings,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            world,
            bodies,
            settings,
            width,
            height,
            token: RunToken::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn settings(&self) -> SharedSettings {
        Rc::clone(&self.settings)
    }

    pub fn run_token(&self) -> RunToken {
        self.token.clone()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if let Some(mouse) = self.world.mouse_mut() {
            mouse.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(mouse) = self.world.mouse_mut() {
            mouse.pointer_move(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(mouse) = self.world.mouse_mut() {
            mouse.pointer_up();
        }
    }

    /// Run one frame.
    pub fn tick<D, S>(&mut self, driver: &mut D, surface: &mut S) -> Result<Tick, String>
    where
        D: FrameDriver + ?Sized,
        S: Surface + ?Sized,
    {
        if !self.token.is_running() {
            return Ok(Tick::Stopped);
        }
        driver.request_frame()?;

        let timer = FrameTimer::start();
        // One snapshot per tick: every body sees the same values.
        let settings: Settings = *self.settings.borrow();

        surface.set_fill_color(&Color::BACKGROUND.to_css());
        surface.fill_rect(0.0, 0.0, self.width, self.height);

        if let Some(mouse) = self.world.mouse_mut() {
            mouse.damping = settings.drag.damping;
            mouse.stiffness = settings.drag.stiffness;
        }

        self.world.gravity.scale = settings.gravity.strength;
        self.world.gravity.x = settings.gravity.x;
        self.world.gravity.y = settings.gravity.y;

        self.world.iterations = solver_iterations(settings.time.speed);

        for body in &self.bodies {
            body.apply_material(&mut self.world, &settings)?;
            body.draw(&self.world, surface, settings.glow_intensity)?;
        }

        self.world.update(BASE_TIMESTEP_MS * settings.time.speed);

        self.stats.record(
            timer.elapsed_ms(),
            self.world.body_count(),
            self.world.contact_count(),
            self.world.elapsed_ms(),
        );
        Ok(Tick::Continue)
    }
}
