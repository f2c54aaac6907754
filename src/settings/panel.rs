//! Parameter panel
//!
//! Slider schema over the settings model, grouped like the on-page GUI. The
//! page renders the schema (`schema_json`) and routes every slider change
//! back through `set`, which is where range limits are enforced.

use serde::Serialize;

use super::{SettingPath, Settings};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SliderControl {
    pub path: SettingPath,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderControl {
    fn new(path: SettingPath, min: f64, max: f64, step: f64, label: &str) -> Self {
        Self { path, label: label.to_string(), min, max, step }
    }

    /// Clamp to `[min, max]` and snap to the step grid, like a slider would.
    pub fn constrain(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelGroup {
    pub label: String,
    /// Expanded when the page first renders.
    pub open: bool,
    pub controls: Vec<SliderControl>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterPanel {
    pub groups: Vec<PanelGroup>,
}

impl ParameterPanel {
    /// The sandbox's standard controls.
    pub fn standard() -> Self {
        use SettingPath::*;

        let body = PanelGroup {
            label: "Body Properties".to_string(),
            open: true,
            controls: vec![
                SliderControl::new(FrictionNormal, 0.0, 1.0, 0.01, "Friction: How much does it slow down during collisions?"),
                SliderControl::new(FrictionAir, 0.0, 1.0, 0.01, "Air Friction: How much does it slow down during flight?"),
                SliderControl::new(FrictionStatic, 0.0, 10.0, 0.01, "Static Friction: How much does it slow down over time?"),
                SliderControl::new(Restitution, 0.0, 1.0, 0.01, "Restitution: How many times & how high can it bounce?"),
                SliderControl::new(GlowIntensity, 0.0, 100.0, 1.0, "Intensity: How bright does it glow? ( Warning: Laggy! )"),
            ],
        };
        let gravity = PanelGroup {
            label: "Gravity".to_string(),
            open: true,
            controls: vec![
                SliderControl::new(GravityStrength, 0.0, 0.01, 0.0001, "Strength: How strong is the gravity in this simulation?"),
                SliderControl::new(GravityX, -1.0, 1.0, 0.01, "X: Which direction, if any, should horizontal gravity pull?"),
                SliderControl::new(GravityY, -1.0, 1.0, 0.01, "Y: Which direction, if any, should vertical gravity pull?"),
            ],
        };
        let time = PanelGroup {
            label: "Time".to_string(),
            open: true,
            controls: vec![SliderControl::new(TimeSpeed, 0.1, 1.0, 0.01, "Scale: How slowly does time move in this simulation?")],
        };
        let drag = PanelGroup {
            label: "Drag".to_string(),
            open: false,
            controls: vec![
                SliderControl::new(DragStiffness, 0.0, 1.0, 0.001, "Stiffness: How hard does the cursor pull a grabbed body?"),
                SliderControl::new(DragDamping, 0.0, 1.0, 0.01, "Damping: How quickly does a dragged body stop wobbling?"),
            ],
        };

        Self { groups: vec![body, gravity, time, drag] }
    }

    pub fn controls(&self) -> impl Iterator<Item = &SliderControl> {
        self.groups.iter().flat_map(|g| g.controls.iter())
    }

    pub fn control(&self, path: SettingPath) -> Option<&SliderControl> {
        self.controls().find(|c| c.path == path)
    }

    pub fn value(&self, settings: &Settings, path: SettingPath) -> f64 {
        settings.get(path)
    }

    /// Write a slider value into the settings. Returns the value actually stored.
    ///
    /// Paths without a control are written unconstrained.
    pub fn set(&self, settings: &mut Settings, path: SettingPath, value: f64) -> Result<f64, String> {
        if !value.is_finite() {
            return Err(format!("{} must be a finite number, got {}", path.key(), value));
        }
        let stored = match self.control(path) {
            Some(control) => control.constrain(value),
            None => value,
        };
        settings.set(path, stored);
        Ok(stored)
    }

    pub fn set_by_key(&self, settings: &mut Settings, key: &str, value: f64) -> Result<f64, String> {
        let path = SettingPath::from_key(key).ok_or_else(|| format!("unknown setting '{}'", key))?;
        self.set(settings, path, value)
    }

    pub fn get_by_key(&self, settings: &Settings, key: &str) -> Result<f64, String> {
        let path = SettingPath::from_key(key).ok_or_else(|| format!("unknown setting '{}'", key))?;
        Ok(self.value(settings, path))
    }

    pub fn schema_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self::standard()
    }
}
