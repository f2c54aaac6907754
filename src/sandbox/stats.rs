use wasm_bindgen::prelude::*;

/// Ticks slower than this get a console warning the first time they set a new record.
const SLOW_TICK_MS: f64 = 50.0;

/// Per-tick diagnostics for the frame loop.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub(super) frames: u32,
    pub(super) last_tick_ms: f64,
    pub(super) slowest_tick_ms: f64,
    pub(super) body_count: u32,
    pub(super) contact_count: u32,
    pub(super) simulated_ms: f64,
}

#[wasm_bindgen]
impl FrameStats {
    /// Completed ticks since start
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u32 { self.frames }
    /// Wall-clock cost of the last tick
    #[wasm_bindgen(getter)]
    pub fn last_tick_ms(&self) -> f64 { self.last_tick_ms }
    #[wasm_bindgen(getter)]
    pub fn slowest_tick_ms(&self) -> f64 { self.slowest_tick_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn contact_count(&self) -> u32 { self.contact_count }
    /// Simulated time so far, in engine milliseconds
    #[wasm_bindgen(getter)]
    pub fn simulated_ms(&self) -> f64 { self.simulated_ms }
}

impl FrameStats {
    pub(super) fn record(&mut self, tick_ms: f64, body_count: usize, contact_count: usize, simulated_ms: f64) {
        self.frames = self.frames.wrapping_add(1);
        self.last_tick_ms = tick_ms;
        self.body_count = body_count as u32;
        self.contact_count = contact_count as u32;
        self.simulated_ms = simulated_ms;
        if tick_ms > self.slowest_tick_ms {
            self.slowest_tick_ms = tick_ms;
            if tick_ms > SLOW_TICK_MS {
                console_warn!("slow frame: {:.1}ms with {} bodies, {} contacts", tick_ms, body_count, contact_count);
            }
        }
    }
}
