//! Common utilities for the gravity sandbox
//!
//! Shared graphics setup, the pan/zoom camera, and vertex types used by the
//! simulation crates.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
