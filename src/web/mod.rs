//! Browser surface: the exported app and its animation-frame driver.

mod driver;
mod facade;

pub use driver::AnimationFrameDriver;
pub use facade::PhysicsBoxApp;
