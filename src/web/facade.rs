use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::driver::{AnimationFrameDriver, FrameCallback};
use crate::core::random::Rng;
use crate::sandbox::{FrameLoop, FrameStats, ManualDriver, Tick, WorldLayout};
use crate::settings::panel::ParameterPanel;
use crate::settings::{Settings, SharedSettings};

struct AppState {
    frame_loop: FrameLoop,
    ctx: CanvasRenderingContext2d,
}

/// The sandbox bound to one page canvas.
#[wasm_bindgen]
pub struct PhysicsBoxApp {
    state: Rc<RefCell<AppState>>,
    settings: SharedSettings,
    panel: ParameterPanel,
    window: Window,
    callback: FrameCallback,
    pending: Rc<Cell<bool>>,
}

fn canvas_context(window: &Window, canvas_id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))?;

    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("Canvas element not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    Ok((canvas, ctx))
}

fn window_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(800.0);
    let height = window.inner_height()?.as_f64().unwrap_or(600.0);
    Ok((width, height))
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

#[wasm_bindgen]
impl PhysicsBoxApp {
    /// Fill the window with the canvas `canvas_id` and build the standard world on it.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<PhysicsBoxApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let (width, height) = window_size(&window)?;
        Self::build(window, canvas_id, WorldLayout::new(width, height))
    }

    /// Like `new`, with the body stacks and colors read from a layout JSON.
    /// The canvas is sized to the layout's `width`/`height`.
    #[wasm_bindgen(js_name = withLayout)]
    pub fn with_layout(canvas_id: &str, layout_json: &str) -> Result<PhysicsBoxApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let layout = WorldLayout::from_json(layout_json).map_err(to_js)?;
        Self::build(window, canvas_id, layout)
    }

    /// Begin (or resume) animating. A frame already pending keeps the chain going
    /// instead of a second one being started.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.state.borrow().frame_loop.run_token().resume();
        if self.pending.get() {
            return Ok(());
        }
        let mut driver = self.driver();
        run_frame(&self.state, &mut driver).map(|_| ()).map_err(to_js)
    }

    /// Stop at the next frame.
    pub fn stop(&mut self) {
        self.state.borrow().frame_loop.run_token().stop();
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.state.borrow().frame_loop.run_token().is_running()
    }

    /// Run a single frame without scheduling another. Returns false when stopped.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let mut state = self.state.borrow_mut();
        let AppState { frame_loop, ctx } = &mut *state;
        let tick = frame_loop.tick(&mut ManualDriver::default(), ctx).map_err(to_js)?;
        Ok(tick == Tick::Continue)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.state.borrow_mut().frame_loop.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.state.borrow_mut().frame_loop.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.state.borrow_mut().frame_loop.pointer_up();
    }

    /// Set a parameter by key (e.g. `"gravity.strength"`). Returns the stored value
    /// after slider clamping.
    pub fn set_param(&mut self, key: &str, value: f64) -> Result<f64, JsValue> {
        self.panel
            .set_by_key(&mut self.settings.borrow_mut(), key, value)
            .map_err(to_js)
    }

    pub fn get_param(&self, key: &str) -> Result<f64, JsValue> {
        self.panel.get_by_key(&self.settings.borrow(), key).map_err(to_js)
    }

    /// Slider groups for the page's GUI.
    pub fn panel_schema_json(&self) -> Result<String, JsValue> {
        self.panel.schema_json().map_err(to_js)
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.settings.borrow().to_json().map_err(to_js)
    }

    /// Replace all settings at once. Values are taken as given, without slider clamping.
    pub fn load_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let loaded = Settings::from_json(json).map_err(to_js)?;
        *self.settings.borrow_mut() = loaded;
        Ok(())
    }

    pub fn stats(&self) -> FrameStats {
        self.state.borrow().frame_loop.stats().clone()
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 {
        self.state.borrow().frame_loop.world().body_count() as u32
    }
}

impl PhysicsBoxApp {
    fn build(window: Window, canvas_id: &str, layout: WorldLayout) -> Result<PhysicsBoxApp, JsValue> {
        let (canvas, ctx) = canvas_context(&window, canvas_id)?;
        canvas.set_width(layout.width.max(0.0) as u32);
        canvas.set_height(layout.height.max(0.0) as u32);

        let settings = Settings::default().shared();
        let mut rng = Rng::from_entropy();
        let frame_loop = FrameLoop::new(&layout, Rc::clone(&settings), &mut rng);

        let app = Self {
            state: Rc::new(RefCell::new(AppState { frame_loop, ctx })),
            settings,
            panel: ParameterPanel::standard(),
            window,
            callback: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(false)),
        };

        let state = Rc::clone(&app.state);
        let mut driver = app.driver();
        *app.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Err(e) = run_frame(&state, &mut driver) {
                console_warn!("frame loop halted: {}", e);
            }
        }) as Box<dyn FnMut()>));

        console_log!("PhysicsBox ready on #{} ({}x{})", canvas_id, layout.width, layout.height);
        Ok(app)
    }

    fn driver(&self) -> AnimationFrameDriver {
        AnimationFrameDriver::new(self.window.clone(), Rc::clone(&self.callback), Rc::clone(&self.pending))
    }
}

impl Drop for PhysicsBoxApp {
    fn drop(&mut self) {
        // A pending frame still owns the callback; it sees the stop and ends the chain.
        if let Ok(state) = self.state.try_borrow() {
            state.frame_loop.run_token().stop();
        }
    }
}

/// One animation frame. A failed tick stops the loop so a frame it already
/// requested does nothing.
fn run_frame(state: &Rc<RefCell<AppState>>, driver: &mut AnimationFrameDriver) -> Result<Tick, String> {
    driver.begin_frame();
    let mut state = state
        .try_borrow_mut()
        .map_err(|_| "frame skipped: app state busy".to_string())?;
    let AppState { frame_loop, ctx } = &mut *state;
    let result = frame_loop.tick(driver, ctx);
    if result.is_err() {
        frame_loop.run_token().stop();
    }
    result
}
