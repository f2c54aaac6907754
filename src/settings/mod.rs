//! Settings model
//!
//! Plain tunable state shared by the parameter panel (writer) and the frame
//! loop (reader). The model never validates: ranges are the panel's job.

pub mod panel;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Handle passed to everything that reads or writes the settings.
pub type SharedSettings = Rc<RefCell<Settings>>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravitySettings {
    /// Acceleration scale (px/ms²)
    pub strength: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self { strength: 0.001, x: 0.0, y: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeSettings {
    /// 1.0 = real time; smaller is slow motion.
    pub speed: f64,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrictionSettings {
    pub normal: f64,
    pub air: f64,
    #[serde(rename = "static")]
    pub static_: f64,
}

impl Default for FrictionSettings {
    fn default() -> Self {
        Self { normal: 0.1, air: 0.01, static_: 0.5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragSettings {
    pub damping: f64,
    pub stiffness: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self { damping: 0.0, stiffness: 0.01 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub gravity: GravitySettings,
    pub time: TimeSettings,
    pub friction: FrictionSettings,
    pub restitution: f64,
    pub glow_intensity: f64,
    pub drag: DragSettings,
}

/// Names one numeric field of [`Settings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SettingPath {
    GravityStrength,
    GravityX,
    GravityY,
    TimeSpeed,
    FrictionNormal,
    FrictionAir,
    FrictionStatic,
    Restitution,
    GlowIntensity,
    DragDamping,
    DragStiffness,
}

impl SettingPath {
    pub const ALL: [SettingPath; 11] = [
        SettingPath::GravityStrength,
        SettingPath::GravityX,
        SettingPath::GravityY,
        SettingPath::TimeSpeed,
        SettingPath::FrictionNormal,
        SettingPath::FrictionAir,
        SettingPath::FrictionStatic,
        SettingPath::Restitution,
        SettingPath::GlowIntensity,
        SettingPath::DragDamping,
        SettingPath::DragStiffness,
    ];

    /// Dotted key, matching the JSON layout of [`Settings`].
    pub fn key(&self) -> &'static str {
        match self {
            SettingPath::GravityStrength => "gravity.strength",
            SettingPath::GravityX => "gravity.x",
            SettingPath::GravityY => "gravity.y",
            SettingPath::TimeSpeed => "time.speed",
            SettingPath::FrictionNormal => "friction.normal",
            SettingPath::FrictionAir => "friction.air",
            SettingPath::FrictionStatic => "friction.static",
            SettingPath::Restitution => "restitution",
            SettingPath::GlowIntensity => "glow_intensity",
            SettingPath::DragDamping => "drag.damping",
            SettingPath::DragStiffness => "drag.stiffness",
        }
    }

    pub fn from_key(key: &str) -> Option<SettingPath> {
        SettingPath::ALL.iter().copied().find(|p| p.key() == key)
    }
}

impl TryFrom<String> for SettingPath {
    type Error = String;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        SettingPath::from_key(&key).ok_or_else(|| format!("unknown setting '{}'", key))
    }
}

impl From<SettingPath> for String {
    fn from(path: SettingPath) -> Self {
        path.key().to_string()
    }
}

impl Settings {
    pub fn shared(self) -> SharedSettings {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, path: SettingPath) -> f64 {
        match path {
            SettingPath::GravityStrength => self.gravity.strength,
            SettingPath::GravityX => self.gravity.x,
            SettingPath::GravityY => self.gravity.y,
            SettingPath::TimeSpeed => self.time.speed,
            SettingPath::FrictionNormal => self.friction.normal,
            SettingPath::FrictionAir => self.friction.air,
            SettingPath::FrictionStatic => self.friction.static_,
            SettingPath::Restitution => self.restitution,
            SettingPath::GlowIntensity => self.glow_intensity,
            SettingPath::DragDamping => self.drag.damping,
            SettingPath::DragStiffness => self.drag.stiffness,
        }
    }

    /// Write one field as-is; no range checks.
    pub fn set(&mut self, path: SettingPath, value: f64) {
        let slot = match path {
            SettingPath::GravityStrength => &mut self.gravity.strength,
            SettingPath::GravityX => &mut self.gravity.x,
            SettingPath::GravityY => &mut self.gravity.y,
            SettingPath::TimeSpeed => &mut self.time.speed,
            SettingPath::FrictionNormal => &mut self.friction.normal,
            SettingPath::FrictionAir => &mut self.friction.air,
            SettingPath::FrictionStatic => &mut self.friction.static_,
            SettingPath::Restitution => &mut self.restitution,
            SettingPath::GlowIntensity => &mut self.glow_intensity,
            SettingPath::DragDamping => &mut self.drag.damping,
            SettingPath::DragStiffness => &mut self.drag.stiffness,
        };
        *slot = value;
    }

    /// Parse settings JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.gravity, GravitySettings { strength: 0.001, x: 0.0, y: 1.0 });
        assert_eq!(s.time.speed, 1.0);
        assert_eq!(s.friction.normal, 0.1);
        assert_eq!(s.friction.air, 0.01);
        assert_eq!(s.friction.static_, 0.5);
        assert_eq!(s.restitution, 0.0);
        assert_eq!(s.glow_intensity, 0.0);
        assert_eq!(s.drag, DragSettings { damping: 0.0, stiffness: 0.01 });
    }

    #[test]
    fn test_keys_resolve_to_their_paths() {
        for path in SettingPath::ALL {
            assert_eq!(SettingPath::from_key(path.key()), Some(path));
        }
        assert_eq!(SettingPath::from_key("gravity.z"), None);
    }

    #[test]
    fn test_set_then_get_every_field() {
        let mut s = Settings::default();
        for (i, path) in SettingPath::ALL.iter().enumerate() {
            s.set(*path, i as f64 + 0.5);
        }
        for (i, path) in SettingPath::ALL.iter().enumerate() {
            assert_eq!(s.get(*path), i as f64 + 0.5);
        }
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let mut s = Settings::default();
        s.set(SettingPath::FrictionNormal, -3.0);
        assert_eq!(s.friction.normal, -3.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"friction":{"static":2.0},"glow_intensity":40}"#)
            .expect("valid settings");
        assert_eq!(s.friction.static_, 2.0);
        assert_eq!(s.friction.normal, 0.1);
        assert_eq!(s.glow_intensity, 40.0);
        assert_eq!(s.time.speed, 1.0);
    }

    #[test]
    fn test_unknown_json_field_is_rejected() {
        assert!(Settings::from_json(r#"{"gravity":{"z":1.0}}"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_json_uses_static_key() {
        let json = Settings::default().to_json().expect("serializes");
        assert!(json.contains("\"static\":0.5"));
    }
}
