//! Point masses tracked by the simulation

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color, display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for shaders
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// A body in the simulation with mass, position, and velocity
///
/// `radius`, `color` and `stroke_width` are only read by the renderer.
/// `total_force` and `acceleration` hold the values from the most recent
/// unpaused step so the debug overlay can draw them while paused.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub color: Rgb,
    /// Outline width in pixels, 0 draws a filled disk
    pub stroke_width: u32,
    pub total_force: DVec2,
    pub acceleration: DVec2,
}

impl Body {
    pub fn new(name: impl Into<String>, position: DVec2, velocity: DVec2, mass: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity,
            mass,
            radius: 25.0,
            color: Rgb::WHITE,
            stroke_width: 0,
            total_force: DVec2::ZERO,
            acceleration: DVec2::ZERO,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new("BODY", DVec2::ZERO, DVec2::ZERO, 1.0)
    }
}
