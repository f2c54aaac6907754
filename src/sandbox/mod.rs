//! Sandbox - the glowing-boxes demo on top of the physics world
//!
//! - `body`: drawable wrapper around one rigid body
//! - `builder`: startup layout (walls, stacks, drag constraint)
//! - `frame_loop`: per-frame orchestration

pub mod body;
pub mod builder;
pub mod frame_loop;
mod stats;
mod timer;

pub use body::Body;
pub use builder::{build_world, ColorPolicy, StackSpec, WorldLayout};
pub use frame_loop::{solver_iterations, FrameDriver, FrameLoop, ManualDriver, RunToken, Tick, BASE_TIMESTEP_MS};
pub use stats::FrameStats;
