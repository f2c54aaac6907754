/// Immediate-mode 2D drawing surface.
///
/// Mirrors the subset of the canvas 2D API the sandbox needs. Calls that can
/// fail in the browser return `Err(String)`.
pub trait Surface {
    fn set_fill_color(&mut self, css: &str);
    fn set_shadow_color(&mut self, css: &str);
    fn set_shadow_blur(&mut self, blur: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), String>;
    fn rotate(&mut self, angle: f64) -> Result<(), String>;
    /// Push the current transform and style state.
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);
}
