//! Rigid-body world for the sandbox
//!
//! Oriented rectangles only. Bodies live in the world's table and are
//! addressed by [`BodyHandle`].

mod body;
mod collision;
mod mouse;
mod solver;
mod vec2;
mod world;

pub use body::{BodyHandle, BodyOptions, RigidBody};
pub use collision::{collide, detect_contacts, Contact};
pub use mouse::{MouseConstraint, Pointer};
pub use vec2::Vec2;
pub use world::{Gravity, PhysicsWorld, SolverIterations};
