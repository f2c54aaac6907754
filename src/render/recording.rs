//! RecordingSurface - a headless `Surface`
//!
//! Keeps a real transform/state stack and records every call, so callers can
//! check exactly what was painted and where.

use super::surface::Surface;

/// 2D affine transform `[a c e; b d f; 0 0 1]`, same layout as the canvas API.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    fn then_translate(&self, x: f64, y: f64) -> Self {
        let (e, f) = self.apply(x, y);
        Self { e, f, ..*self }
    }

    fn then_rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: -self.a * sin + self.c * cos,
            d: -self.b * sin + self.d * cos,
            e: self.e,
            f: self.f,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct State {
    transform: Transform,
    fill: String,
    shadow_color: String,
    shadow_blur: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: "#000000".to_string(),
            shadow_color: "rgba(0, 0, 0, 0)".to_string(),
            shadow_blur: 0.0,
        }
    }
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetFillColor(String),
    SetShadowColor(String),
    SetShadowBlur(f64),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    Translate(f64, f64),
    Rotate(f64),
    Save,
    Restore,
}

/// A filled rectangle resolved to surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FilledRect {
    pub corners: [(f64, f64); 4],
    pub fill: String,
    pub shadow_color: String,
    pub shadow_blur: f64,
}

impl FilledRect {
    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    state: State,
    stack: Vec<State>,
    commands: Vec<DrawCommand>,
    fills: Vec<FilledRect>,
    /// When set, `translate`/`rotate` fail; lets callers test error paths.
    pub fail_transforms: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Number of `save` calls not yet matched by `restore`.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fills(&self) -> &[FilledRect] {
        &self.fills
    }

    /// Forget recorded calls; the current state and stack are kept.
    pub fn clear_recording(&mut self) {
        self.commands.clear();
        self.fills.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_fill_color(&mut self, css: &str) {
        self.state.fill = css.to_string();
        self.commands.push(DrawCommand::SetFillColor(css.to_string()));
    }

    fn set_shadow_color(&mut self, css: &str) {
        self.state.shadow_color = css.to_string();
        self.commands.push(DrawCommand::SetShadowColor(css.to_string()));
    }

    fn set_shadow_blur(&mut self, blur: f64) {
        self.state.shadow_blur = blur;
        self.commands.push(DrawCommand::SetShadowBlur(blur));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let t = self.state.transform;
        self.fills.push(FilledRect {
            corners: [
                t.apply(x, y),
                t.apply(x + width, y),
                t.apply(x + width, y + height),
                t.apply(x, y + height),
            ],
            fill: self.state.fill.clone(),
            shadow_color: self.state.shadow_color.clone(),
            shadow_blur: self.state.shadow_blur,
        });
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), String> {
        if self.fail_transforms {
            return Err("translate rejected".to_string());
        }
        self.state.transform = self.state.transform.then_translate(x, y);
        self.commands.push(DrawCommand::Translate(x, y));
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<(), String> {
        if self.fail_transforms {
            return Err("rotate rejected".to_string());
        }
        self.state.transform = self.state.transform.then_rotate(angle);
        self.commands.push(DrawCommand::Rotate(angle));
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // Canvas semantics: restore on an empty stack is a no-op.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.commands.push(DrawCommand::Restore);
    }
}
