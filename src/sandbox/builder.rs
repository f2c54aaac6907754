//! World Builder - one-shot startup layout
//!
//! Four invisible walls around the canvas, three stacks of small boxes and
//! the pointer-drag constraint. Layout is computed from the canvas size at
//! build time only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::random::Rng;
use crate::physics::{BodyOptions, MouseConstraint, PhysicsWorld};
use crate::render::{Color, PALETTE};
use crate::settings::Settings;

use super::body::Body;

/// A grid of identical boxes.
///
/// The stack's top-left corner sits at `(width/2 + offset_x, height + offset_y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackSpec {
    pub offset_x: f64,
    pub offset_y: f64,
    pub columns: u32,
    pub rows: u32,
    /// Stacks with the same group share a color under [`ColorPolicy::PerGroup`].
    #[serde(default)]
    pub color_group: u32,
}

impl StackSpec {
    pub fn body_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// How stack bodies pick their color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorPolicy {
    /// One random palette color per color group.
    PerGroup,
    /// A random palette color for every body.
    PerBody,
    /// The same color everywhere.
    Fixed { color: Color },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub width: f64,
    pub height: f64,
    /// Walls extend this far past the canvas edges so corners seal.
    pub wall_thickness: f64,
    /// Side length of every stack box.
    pub body_size: f64,
    pub stacks: Vec<StackSpec>,
    pub color_policy: ColorPolicy,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl WorldLayout {
    /// Standard layout: two 5x5 stacks near the floor, a 15x15 stack between them.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            wall_thickness: 1000.0,
            body_size: 30.0,
            stacks: vec![
                StackSpec { offset_x: -450.0, offset_y: -150.0, columns: 5, rows: 5, color_group: 0 },
                StackSpec { offset_x: 300.0, offset_y: -150.0, columns: 5, rows: 5, color_group: 0 },
                StackSpec { offset_x: -225.0, offset_y: -450.0, columns: 15, rows: 15, color_group: 1 },
            ],
            color_policy: ColorPolicy::PerGroup,
        }
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.stacks.iter().map(StackSpec::body_count).sum()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Top-left corner of a stack, pulled inside the canvas when the stack fits.
    fn stack_origin(&self, stack: &StackSpec) -> (f64, f64) {
        let stack_w = stack.columns as f64 * self.body_size;
        let stack_h = stack.rows as f64 * self.body_size;
        let x = (self.width / 2.0 + stack.offset_x).clamp(0.0, (self.width - stack_w).max(0.0));
        let y = (self.height + stack.offset_y).clamp(0.0, (self.height - stack_h).max(0.0));
        (x, y)
    }
}

struct ColorPicker<'a> {
    policy: ColorPolicy,
    rng: &'a mut Rng,
    groups: HashMap<u32, Color>,
}

impl ColorPicker<'_> {
    fn pick(&mut self, group: u32) -> Color {
        match self.policy {
            ColorPolicy::Fixed { color } => color,
            ColorPolicy::PerBody => PALETTE[self.rng.index(PALETTE.len())],
            ColorPolicy::PerGroup => {
                let rng = &mut *self.rng;
                *self.groups.entry(group).or_insert_with(|| PALETTE[rng.index(PALETTE.len())])
            }
        }
    }
}

/// Build the world and the render registry.
///
/// Registry order: top, bottom, left, right walls, then every stack in
/// layout order, row by row.
pub fn build_world(layout: &WorldLayout, settings: &Settings, rng: &mut Rng) -> (PhysicsWorld, Vec<Body>) {
    let mut world = PhysicsWorld::new();
    let mut bodies = Vec::with_capacity(4 + layout.dynamic_body_count());

    let (w, h, t) = (layout.width, layout.height, layout.wall_thickness);
    let walls = [
        (w / 2.0, -t / 2.0, w + t, t),
        (w / 2.0, h + t / 2.0, w + t, t),
        (-t / 2.0, h / 2.0, t, h + t),
        (w + t / 2.0, h / 2.0, t, h + t),
    ];
    let fixed = BodyOptions::fixed();
    for (x, y, width, height) in walls {
        bodies.push(Body::new(&mut world, x, y, width, height, Color::TRANSPARENT, &fixed));
    }

    let mut colors = ColorPicker { policy: layout.color_policy, rng, groups: HashMap::new() };
    let size = layout.body_size;
    let dynamic = BodyOptions::default();
    for stack in &layout.stacks {
        let (ox, oy) = layout.stack_origin(stack);
        for row in 0..stack.rows {
            for column in 0..stack.columns {
                let x = ox + size / 2.0 + column as f64 * size;
                let y = oy + size / 2.0 + row as f64 * size;
                let color = colors.pick(stack.color_group);
                bodies.push(Body::new(&mut world, x, y, size, size, color, &dynamic));
            }
        }
    }

    let mut mouse = MouseConstraint::new(settings.drag.stiffness);
    mouse.damping = settings.drag.damping;
    world.set_mouse_constraint(mouse);

    console_log!(
        "world built: {} walls, {} stack bodies on {}x{}",
        walls.len(),
        bodies.len() - walls.len(),
        w,
        h
    );

    (world, bodies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(layout: &WorldLayout) -> (PhysicsWorld, Vec<Body>) {
        build_world(layout, &Settings::default(), &mut Rng::new(42))
    }

    #[test]
    fn test_counts_walls_and_stacks() {
        let layout = WorldLayout::new(1280.0, 720.0);
        let (world, bodies) = build(&layout);
        assert_eq!(layout.dynamic_body_count(), 275);
        assert_eq!(bodies.len(), 279);
        assert_eq!(world.body_count(), 279);
        let statics = world.bodies().iter().filter(|b| b.is_static).count();
        assert_eq!(statics, 4);
    }

    #[test]
    fn test_walls_are_invisible_and_seal_corners() {
        let layout = WorldLayout::new(800.0, 600.0);
        let (world, bodies) = build(&layout);
        for wall in &bodies[..4] {
            assert_eq!(wall.color(), Color::TRANSPARENT);
        }
        let top = world.body(bodies[0].handle()).expect("top wall");
        assert_eq!(top.pos.x, 400.0);
        assert_eq!(top.pos.y, -500.0);
        assert_eq!(top.half_width * 2.0, 1800.0);
        let right = world.body(bodies[3].handle()).expect("right wall");
        assert_eq!(right.pos.x, 1300.0);
        assert_eq!(right.half_height * 2.0, 1600.0);
    }

    #[test]
    fn test_dynamic_bodies_start_inside_canvas() {
        for (w, h) in [(1280.0, 720.0), (1920.0, 1080.0), (900.0, 500.0)] {
            let (world, bodies) = build(&WorldLayout::new(w, h));
            for body in &bodies[4..] {
                let rb = world.body(body.handle()).expect("registered");
                assert!(!rb.is_static);
                assert!(rb.pos.x > 0.0 && rb.pos.x < w, "x = {} on {}", rb.pos.x, w);
                assert!(rb.pos.y > 0.0 && rb.pos.y < h, "y = {} on {}", rb.pos.y, h);
            }
        }
    }

    #[test]
    fn test_stack_grid_positions() {
        let (world, bodies) = build(&WorldLayout::new(1280.0, 720.0));
        // left stack: origin (190, 570)
        let first = world.body(bodies[4].handle()).expect("registered");
        assert_eq!((first.pos.x, first.pos.y), (205.0, 585.0));
        let second = world.body(bodies[5].handle()).expect("registered");
        assert_eq!((second.pos.x, second.pos.y), (235.0, 585.0));
        assert_eq!(bodies[4].width(), 30.0);
        assert_eq!(bodies[4].height(), 30.0);
    }

    #[test]
    fn test_per_group_colors() {
        let (_, bodies) = build(&WorldLayout::new(1280.0, 720.0));
        let left_and_right = &bodies[4..54];
        let middle = &bodies[54..];
        assert!(left_and_right.iter().all(|b| b.color() == left_and_right[0].color()));
        assert!(middle.iter().all(|b| b.color() == middle[0].color()));
        assert!(PALETTE.contains(&middle[0].color()));
    }

    #[test]
    fn test_fixed_color_policy() {
        let mut layout = WorldLayout::new(1280.0, 720.0);
        layout.color_policy = ColorPolicy::Fixed { color: Color::rgb(1, 2, 3) };
        let (_, bodies) = build(&layout);
        assert!(bodies[4..].iter().all(|b| b.color() == Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_drag_constraint_installed_from_settings() {
        let mut settings = Settings::default();
        settings.drag.stiffness = 0.3;
        let (world, _) = build_world(&WorldLayout::default(), &settings, &mut Rng::new(1));
        let mouse = world.mouse().expect("mouse constraint");
        assert_eq!(mouse.stiffness, 0.3);
        assert_eq!(mouse.grabbed(), None);
    }

    #[test]
    fn test_layout_json() {
        let layout = WorldLayout::from_json(
            r#"{"width":640,"height":480,"stacks":[{"offset_x":0,"offset_y":-60,"columns":2,"rows":2}],"color_policy":{"kind":"per_body"}}"#,
        )
        .expect("valid layout");
        assert_eq!(layout.dynamic_body_count(), 4);
        assert_eq!(layout.wall_thickness, 1000.0);
        assert_eq!(layout.color_policy, ColorPolicy::PerBody);
    }
}
