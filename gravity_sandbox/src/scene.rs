//! CPU-side geometry for a frame: grid, body circles and debug overlay

use common::{Camera2D, Vertex};
use glam::{DVec2, Vec2};

use crate::body::{Body, Rgb};
use crate::vector::to_render;

/// World units between grid lines
pub const GRID_SPACING: f32 = 50.0;

/// Grid spacing multiplier once zoomed out past [`GRID_DETAIL_ZOOM`]
pub const UNZOOMED_GRID_SPACING_MULTIPLIER: f32 = 10.0;

/// Zoom at or below which the coarse grid is used
pub const GRID_DETAIL_ZOOM: f32 = 0.33;

/// Half-length of the axes in world units
pub const GRID_EXTENT: f32 = 65536.0;

/// Smallest on-screen body radius in pixels
pub const MIN_BODY_PIXELS: f32 = 5.0;

/// Barycenter marker radius in pixels
pub const BARYCENTER_PIXELS: f32 = 5.0;

const AXIS_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
const GRID_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.15];

/// Per-instance data for the circle pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    /// Radius in world units
    pub radius: f32,
    /// Ring thickness as a fraction of the radius, 0 fills the disk
    pub stroke: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    /// Circle of `pixels` on-screen radius at `center`
    pub fn screen_sized(camera: &Camera2D, center: Vec2, pixels: f32, stroke_pixels: u32, color: Rgb) -> Self {
        let stroke = if stroke_pixels == 0 {
            0.0
        } else {
            (stroke_pixels as f32 / pixels).min(1.0)
        };

        Self {
            center: center.to_array(),
            radius: camera.pixels_to_world(pixels),
            stroke,
            color: color.to_rgba(),
        }
    }

    pub fn for_body(camera: &Camera2D, body: &Body) -> Self {
        let pixels = (body.radius as f32 * camera.zoom).max(MIN_BODY_PIXELS);
        Self::screen_sized(camera, to_render(body.position), pixels, body.stroke_width, body.color)
    }
}

fn line(vertices: &mut Vec<Vertex>, from: Vec2, to: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(from.extend(0.0).to_array(), color));
    vertices.push(Vertex::new(to.extend(0.0).to_array(), color));
}

/// Axes plus evenly spaced grid lines, coarser when zoomed far out
pub fn grid_lines(zoom: f32) -> Vec<Vertex> {
    let spacing = if zoom > GRID_DETAIL_ZOOM {
        GRID_SPACING
    } else {
        GRID_SPACING * UNZOOMED_GRID_SPACING_MULTIPLIER
    };
    let half = GRID_EXTENT / 2.0;
    let count = (half / spacing).ceil() as usize;

    let mut vertices = Vec::with_capacity(8 * count + 4);

    line(&mut vertices, Vec2::new(-GRID_EXTENT, 0.0), Vec2::new(GRID_EXTENT, 0.0), AXIS_COLOR);
    line(&mut vertices, Vec2::new(0.0, -GRID_EXTENT), Vec2::new(0.0, GRID_EXTENT), AXIS_COLOR);

    for i in 1..count {
        let d = i as f32 * spacing;
        for offset in [d, -d] {
            line(&mut vertices, Vec2::new(-GRID_EXTENT, offset), Vec2::new(GRID_EXTENT, offset), GRID_COLOR);
            line(&mut vertices, Vec2::new(offset, -GRID_EXTENT), Vec2::new(offset, GRID_EXTENT), GRID_COLOR);
        }
    }

    vertices
}

/// Velocity (green), force direction (red) and barycenter (white) lines
pub fn debug_lines(bodies: &[Body], barycenter: DVec2) -> Vec<Vertex> {
    let green = Rgb::GREEN.to_rgba();
    let red = Rgb::RED.to_rgba();
    let white = Rgb::WHITE.to_rgba();
    let barycenter = to_render(barycenter);

    let mut vertices = Vec::with_capacity(bodies.len() * 6);
    for body in bodies {
        let position = body.position;
        let force_tip = position + body.total_force.normalize_or_zero() * body.radius * 3.0;

        line(&mut vertices, to_render(position), to_render(position + body.velocity), green);
        line(&mut vertices, to_render(position), to_render(force_tip), red);
        line(&mut vertices, to_render(position), barycenter, white);
    }
    vertices
}

/// Circles for every body, followed by the barycenter marker when `debug`
pub fn circle_instances(camera: &Camera2D, bodies: &[Body], barycenter: DVec2, debug: bool) -> Vec<CircleInstance> {
    let mut instances: Vec<CircleInstance> = bodies
        .iter()
        .map(|body| CircleInstance::for_body(camera, body))
        .collect();

    if debug {
        instances.push(CircleInstance::screen_sized(
            camera,
            to_render(barycenter),
            BARYCENTER_PIXELS,
            0,
            Rgb::WHITE,
        ));
    }
    instances
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_switches_to_coarse_spacing_when_zoomed_out() {
        let fine = grid_lines(1.0);
        let coarse = grid_lines(0.2);
        assert!(fine.len() > coarse.len() * 9);
        // axes first
        assert_eq!(fine[0].position, [-GRID_EXTENT, 0.0, 0.0]);
        assert_eq!(fine[3].position, [0.0, GRID_EXTENT, 0.0]);
    }

    #[test]
    fn small_bodies_keep_minimum_screen_size() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom = 0.1;
        let body = Body::default().with_radius(10.0);

        let instance = CircleInstance::for_body(&camera, &body);
        // 5 pixels at zoom 0.1 is 50 world units
        assert!((instance.radius - 50.0).abs() < 1e-4);
        assert_eq!(instance.stroke, 0.0);
    }

    #[test]
    fn stroke_is_fraction_of_radius() {
        let camera = Camera2D::new(800.0, 600.0);
        let body = Body::default().with_radius(20.0).with_stroke_width(5);
        let instance = CircleInstance::for_body(&camera, &body);
        assert_eq!(instance.stroke, 0.25);
    }

    #[test]
    fn debug_lines_follow_velocity_force_and_barycenter() {
        let mut body = Body::new("a", DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0), 1.0).with_radius(2.0);
        body.total_force = DVec2::new(0.0, -10.0);

        let v = debug_lines(&[body], DVec2::new(-4.0, 1.0));
        assert_eq!(v.len(), 6);
        assert_eq!(v[1].position, [3.0, 1.0, 0.0]);
        assert_eq!(v[3].position, [1.0, -5.0, 0.0]);
        assert_eq!(v[5].position, [-4.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_force_draws_degenerate_force_line() {
        let body = Body::default();
        let v = debug_lines(&[body], DVec2::ZERO);
        assert_eq!(v[2].position, v[3].position);
    }

    #[test]
    fn barycenter_marker_only_in_debug() {
        let camera = Camera2D::new(800.0, 600.0);
        let bodies = [Body::default(), Body::default()];
        assert_eq!(circle_instances(&camera, &bodies, DVec2::ZERO, false).len(), 2);
        assert_eq!(circle_instances(&camera, &bodies, DVec2::ZERO, true).len(), 3);
    }
}
