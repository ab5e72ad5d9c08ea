//! On-screen text: debug statistics, control hints and body names
//!
//! Row text is built by plain functions so it can be checked without a GPU;
//! the `draw_*` functions only paint it with egui.

use common::Camera2D;
use egui::{Align2, Color32, Context, FontId, Id, LayerId, Order, RichText};
use glam::{DVec2, Vec2};

use crate::vector::to_render;
use crate::view::ViewSettings;
use crate::world::World;

/// Margin from the window edge, in points
const MARGIN: f32 = 32.0;

/// World-space offset of a name label from its body
pub const NAME_OFFSET: DVec2 = DVec2::new(32.0, 16.0);

/// Exponentially smoothed frame rate
#[derive(Debug, Clone)]
pub struct FrameTimer {
    smoothed_dt: f64,
    last_dt: f64,
}

impl FrameTimer {
    const SMOOTHING: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            smoothed_dt: 0.0,
            last_dt: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.last_dt = dt;
        self.smoothed_dt = if self.smoothed_dt == 0.0 {
            dt
        } else {
            self.smoothed_dt + (dt - self.smoothed_dt) * Self::SMOOTHING
        };
    }

    pub fn fps(&self) -> f64 {
        if self.smoothed_dt > 0.0 {
            1.0 / self.smoothed_dt
        } else {
            0.0
        }
    }

    pub fn last_dt(&self) -> f64 {
        self.last_dt
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-left statistics block
pub fn stats_rows(timer: &FrameTimer, world: &World) -> Vec<String> {
    vec![
        format!("FPS: {:.2}", timer.fps()),
        format!("FRAME TIME / TIMESTEP: {:.3}s", timer.last_dt()),
        format!("ELAPSED TIME: {:.3}s", world.elapsed_time),
        format!("FRAME: {}", world.frame),
        format!("OBJECT COUNT: {}", world.len()),
        format!("TOTAL MASS: {:.2}", world.total_mass()),
    ]
}

/// Bottom-left block of toggles and camera state
pub fn controls_rows(paused: bool, view: ViewSettings, camera: &Camera2D) -> Vec<String> {
    vec![
        format!("PAUSED (SPACEBAR): {}", paused).to_uppercase(),
        format!("DEBUG MODE (1): {}", view.debug).to_uppercase(),
        format!("SHOW NAMES (2): {}", view.show_names).to_uppercase(),
        format!("CAMERA POS (MOUSE): [{:.0}, {:.0}]", camera.offset.x, camera.offset.y),
        format!("ZOOM (+/-): {:.2}", camera.zoom),
    ]
}

fn text_block(ctx: &Context, id: &str, anchor: Align2, offset: [f32; 2], rows: &[String]) {
    egui::Area::new(Id::new(id))
        .anchor(anchor, offset)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::BLACK)
                .inner_margin(4.0)
                .show(ui, |ui| {
                    for row in rows {
                        ui.label(RichText::new(row).color(Color32::WHITE).size(16.0));
                    }
                });
        });
}

/// Stats and controls panels, shown only in debug mode
pub fn draw_debug_panels(ctx: &Context, timer: &FrameTimer, world: &World, view: ViewSettings, camera: &Camera2D) {
    if !view.debug {
        return;
    }

    text_block(ctx, "stats_panel", Align2::LEFT_TOP, [MARGIN, MARGIN], &stats_rows(timer, world));
    text_block(
        ctx,
        "controls_panel",
        Align2::LEFT_BOTTOM,
        [MARGIN, -MARGIN],
        &controls_rows(world.paused, view, camera),
    );
}

/// Window pixel position of a body's name label
pub fn name_anchor(camera: &Camera2D, position: DVec2) -> Vec2 {
    camera.world_to_window(to_render(position + NAME_OFFSET))
}

/// Body names next to each body
pub fn draw_names(ctx: &Context, world: &World, view: ViewSettings, camera: &Camera2D) {
    if !view.show_names {
        return;
    }

    let painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("body_names")));
    let pixels_per_point = ctx.pixels_per_point();

    for body in &world.bodies {
        let anchor = name_anchor(camera, body.position) / pixels_per_point;
        let pos = egui::pos2(anchor.x, anchor.y);
        let galley = painter.layout_no_wrap(body.name.clone(), FontId::proportional(18.0), Color32::WHITE);
        let rect = Align2::LEFT_BOTTOM.anchor_size(pos, galley.size());

        painter.rect_filled(rect, 0.0, Color32::BLACK);
        painter.galley(rect.min, galley, Color32::WHITE);
    }
}
