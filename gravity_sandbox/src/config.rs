//! Configuration types for loading a simulation from JSON
//!
//! ```json
//! {
//!   "settings": {
//!     "G": 1000.0,
//!     "paused_at_start": false,
//!     "debug_mode": false,
//!     "show_names": true,
//!     "seed": 42,
//!     "timestep": "variable"
//!   },
//!   "bodies": [
//!     {
//!       "name": "Sun",
//!       "position": { "x": 0.0, "y": 0.0 },
//!       "velocity": { "x": 0.0, "y": 0.0 },
//!       "radius": 40.0,
//!       "mass": 1000.0,
//!       "color": { "r": 255, "g": 200, "b": 0 },
//!       "width": 0
//!     }
//!   ]
//! }
//! ```
//!
//! `seed` and `timestep` are optional. `timestep` is either `"variable"` or
//! `{ "fixed": <seconds> }`.

use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, Rgb};
use crate::clock::Timestep;
use crate::error::ConfigError;

/// Global physics and view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant, any sign
    #[serde(default)]
    pub paused_at_start: bool,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub show_names: bool,
    #[serde(default)]
    pub seed: Option<u64>, // nudge RNG seed, entropy when absent
    #[serde(default)]
    pub timestep: Timestep,
}

/// `{ "x": .., "y": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Initial state of a single body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub position: Point,
    pub velocity: Point,
    pub radius: f64,
    pub mass: f64,
    pub color: Rgb,
    pub width: u32, // outline width in pixels, 0 = filled
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::new(
            self.name.clone(),
            self.position.into(),
            self.velocity.into(),
            self.mass,
        )
        .with_radius(self.radius)
        .with_color(self.color)
        .with_stroke_width(self.width)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let non_finite = |field| ConfigError::NonFinite {
            index,
            name: self.name.clone(),
            field,
        };

        let checks = [
            ("position", self.position.x.is_finite() && self.position.y.is_finite()),
            ("velocity", self.velocity.x.is_finite() && self.velocity.y.is_finite()),
            ("radius", self.radius.is_finite()),
            ("mass", self.mass.is_finite()),
        ];
        if let Some((field, _)) = checks.iter().find(|(_, ok)| !ok) {
            return Err(non_finite(*field));
        }

        // acceleration divides by mass every step
        if self.mass == 0.0 {
            return Err(ConfigError::ZeroMass {
                index,
                name: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
    pub bodies: Vec<BodyConfig>,
}

impl Config {
    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Timestep::Fixed(step) = self.settings.timestep {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::InvalidTimestep(step));
            }
        }

        self.bodies
            .iter()
            .enumerate()
            .try_for_each(|(index, body)| body.validate(index))
    }

    /// Runtime bodies in configuration order
    pub fn bodies(&self) -> Vec<Body> {
        self.bodies.iter().map(BodyConfig::to_body).collect()
    }
}
