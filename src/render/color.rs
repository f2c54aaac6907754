use serde::{Deserialize, Serialize};

/// RGBA color; channels 0-255, alpha 0.0-1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

/// Body colors the stacks pick from.
pub const PALETTE: [Color; 6] = [
    Color::rgb(214, 48, 49),
    Color::rgb(9, 132, 227),
    Color::rgb(0, 184, 148),
    Color::rgb(253, 203, 110),
    Color::rgb(108, 92, 231),
    Color::rgb(223, 230, 233),
];

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };
    /// Frame clear color.
    pub const BACKGROUND: Color = Color::rgb(45, 52, 54);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string, e.g. `rgb(214, 48, 49)` or `rgba(0, 0, 0, 0)`.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}
