//! Pan/zoom camera for 2D simulations
//!
//! World positions map to screen pixels as `world * zoom + offset`, with the
//! screen origin at the centre of the window and +y pointing up.

use glam::{Mat4, Vec2, Vec3};

/// Smallest zoom factor reachable through input
pub const MIN_ZOOM: f32 = 0.05;

/// Largest zoom factor reachable through input
pub const MAX_ZOOM: f32 = 10.0;

/// 2D orthographic camera measured in screen pixels
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Pan offset in pixels
    pub offset: Vec2,
    /// Pixels per world unit
    pub zoom: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            viewport: Vec2::new(width, height),
        }
    }

    /// Map a world position to centred screen pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.offset
    }

    /// Map a world position to window pixels (origin top-left, +y down)
    pub fn world_to_window(&self, world: Vec2) -> Vec2 {
        let screen = self.world_to_screen(world);
        let half = self.viewport * 0.5;
        Vec2::new(half.x + screen.x, half.y - screen.y)
    }

    /// Length in world units covering `pixels` on screen
    pub fn pixels_to_world(&self, pixels: f32) -> f32 {
        pixels / self.zoom
    }

    pub fn clamp_zoom(&mut self) {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half = self.viewport * 0.5;

        let projection = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);

        let view = Mat4::from_translation(self.offset.extend(0.0))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0));

        projection * view
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// offset.x, offset.y, zoom, unused
    pub pan_zoom: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            pan_zoom: [camera.offset.x, camera.offset.y, camera.zoom, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_screen_applies_zoom_then_offset() {
        let mut camera = Camera2D::new(1280.0, 720.0);
        camera.zoom = 2.0;
        camera.offset = Vec2::new(10.0, -5.0);

        let screen = camera.world_to_screen(Vec2::new(3.0, 4.0));
        assert_eq!(screen, Vec2::new(16.0, 3.0));
    }

    #[test]
    fn view_projection_matches_screen_mapping() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom = 0.5;
        camera.offset = Vec2::new(100.0, 30.0);

        let world = Vec2::new(200.0, -60.0);
        let clip = camera.view_projection().project_point3(world.extend(0.0));
        let screen = camera.world_to_screen(world);

        assert!((clip.x - screen.x / 400.0).abs() < 1e-5);
        assert!((clip.y - screen.y / 300.0).abs() < 1e-5);
    }

    #[test]
    fn window_coordinates_flip_y_around_centre() {
        let camera = Camera2D::new(800.0, 600.0);
        let window = camera.world_to_window(Vec2::new(10.0, 20.0));
        assert_eq!(window, Vec2::new(410.0, 280.0));
    }

    #[test]
    fn zoom_is_clamped_to_range() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom = 50.0;
        camera.clamp_zoom();
        assert_eq!(camera.zoom, MAX_ZOOM);
        camera.zoom = 0.0;
        camera.clamp_zoom();
        assert_eq!(camera.zoom, MIN_ZOOM);
    }
}
