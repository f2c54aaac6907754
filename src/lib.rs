//! PhysicsBox - glowing rigid-body sandbox in WASM
//!
//! Architecture:
//! - core/      - logging macros, RNG
//! - settings/  - tunable parameters and the slider panel over them
//! - physics/   - rigid-body world (bodies, contacts, solver, drag constraint)
//! - render/    - drawing surfaces and colors
//! - sandbox/   - drawable bodies, world builder, frame loop
//! - web/       - browser app and animation-frame driver
//! - editor     - note editor tool wiring

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod editor;
pub mod physics;
pub mod render;
pub mod sandbox;
pub mod settings;
pub mod web;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("📦 PhysicsBox WASM initialized!");
}

/// Get crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use editor::{note_editor_tools, note_editor_tools_json, EditorTool};
pub use physics::{BodyHandle, BodyOptions, PhysicsWorld};
pub use render::{Color, RecordingSurface, Surface};
pub use sandbox::{Body, FrameDriver, FrameLoop, FrameStats, ManualDriver, RunToken, Tick, WorldLayout};
pub use settings::panel::ParameterPanel;
pub use settings::{SettingPath, Settings, SharedSettings};
pub use web::PhysicsBoxApp;
