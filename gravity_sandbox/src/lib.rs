//! Configurable 2D N-body gravity sandbox
//!
//! Point masses loaded from a JSON file attract each other under Newtonian
//! gravity and are advanced once per rendered frame:
//!
//! - **Forces**: exact pairwise O(n²) summation, with a random nudge for bodies
//!   that sit on exactly the same spot
//! - **Integration**: RK4 stage weighting with the acceleration held constant
//!   over the step
//! - **Barycenter**: mass-weighted centroid, drawn by the debug overlay
//!
//! Rendering (wgpu), the HUD (egui) and input handling live in their own
//! modules and never feed back into the physics except through the pause flag.

pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod forces;
pub mod hud;
pub mod integrator;
pub mod renderer;
pub mod scene;
pub mod vector;
pub mod view;
pub mod world;

pub use body::{Body, Rgb};
pub use clock::{FrameClock, Timestep};
pub use config::{BodyConfig, Config, Settings};
pub use error::ConfigError;
pub use forces::{FixedNudge, Gravity, Nudge, RandomNudge};
pub use integrator::rk4;
pub use world::{barycenter, total_mass, World};
