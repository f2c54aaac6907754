//! Drawing surfaces
//!
//! - `Surface`: the immediate-mode 2D contract the sandbox draws through
//! - `CanvasRenderingContext2d`: the browser implementation
//! - `RecordingSurface`: headless implementation that records calls

mod canvas;
mod color;
mod recording;
mod surface;

pub use color::{Color, PALETTE};
pub use recording::{DrawCommand, FilledRect, RecordingSurface, Transform};
pub use surface::Surface;
