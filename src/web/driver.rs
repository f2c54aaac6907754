use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::sandbox::FrameDriver;

/// The callback each animation frame runs. Filled once the app has built it.
pub(crate) type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Schedules ticks with `window.requestAnimationFrame`.
pub struct AnimationFrameDriver {
    window: Window,
    callback: FrameCallback,
    pending: Rc<Cell<bool>>,
}

impl AnimationFrameDriver {
    pub(crate) fn new(window: Window, callback: FrameCallback, pending: Rc<Cell<bool>>) -> Self {
        Self { window, callback, pending }
    }

    /// True while a requested frame has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Mark the requested frame as running.
    pub(crate) fn begin_frame(&self) {
        self.pending.set(false);
    }
}

impl FrameDriver for AnimationFrameDriver {
    fn request_frame(&mut self) -> Result<(), String> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or("frame callback not installed")?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.pending.set(true);
        Ok(())
    }
}
