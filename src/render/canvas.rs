use web_sys::CanvasRenderingContext2d;

use super::surface::Surface;

fn js_err(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl Surface for CanvasRenderingContext2d {
    fn set_fill_color(&mut self, css: &str) {
        self.set_fill_style_str(css);
    }

    fn set_shadow_color(&mut self, css: &str) {
        CanvasRenderingContext2d::set_shadow_color(self, css);
    }

    fn set_shadow_blur(&mut self, blur: f64) {
        CanvasRenderingContext2d::set_shadow_blur(self, blur);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), String> {
        CanvasRenderingContext2d::translate(self, x, y).map_err(js_err)
    }

    fn rotate(&mut self, angle: f64) -> Result<(), String> {
        CanvasRenderingContext2d::rotate(self, angle).map_err(js_err)
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }
}
