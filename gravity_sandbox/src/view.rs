//! View toggles and per-frame input handling
//!
//! Controls:
//! - Esc: Quit
//! - Space: Pause/resume simulation
//! - 1: Toggle debug overlay
//! - 2: Toggle body names
//! - Left mouse drag: Pan camera
//! - =/- (held) or scroll: Zoom in/out

use std::collections::HashSet;

use common::Camera2D;
use glam::Vec2;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::config::Settings;

/// Display toggles that never affect the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSettings {
    pub debug: bool,
    pub show_names: bool,
}

impl ViewSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            debug: settings.debug_mode,
            show_names: settings.show_names,
        }
    }
}

/// Discrete commands triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    ToggleDebug,
    ToggleNames,
}

impl Action {
    pub fn for_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Escape => Some(Action::Quit),
            KeyCode::Space => Some(Action::TogglePause),
            KeyCode::Digit1 => Some(Action::ToggleDebug),
            KeyCode::Digit2 => Some(Action::ToggleNames),
            _ => None,
        }
    }
}

/// Keyboard and mouse state collected between two frames
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    pressed: Vec<KeyCode>,
    dragging: bool,
    cursor: Option<Vec2>,
    mouse_motion: Vec2,
    wheel: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_event(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // ignore OS key repeat
                if self.held.insert(key) {
                    self.pressed.push(key);
                }
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    /// Left button change; presses over the UI do not start a drag
    pub fn mouse_button(&mut self, state: ElementState, over_ui: bool) {
        match state {
            ElementState::Pressed if !over_ui => self.dragging = true,
            ElementState::Pressed => {}
            // releases always end a drag
            ElementState::Released => self.dragging = false,
        }
    }

    /// Cursor position in window pixels (+y down)
    pub fn cursor_moved(&mut self, position: Vec2) {
        if let (true, Some(last)) = (self.dragging, self.cursor) {
            self.mouse_motion += position - last;
        }
        self.cursor = Some(position);
    }

    /// Scroll in lines, positive away from the user
    pub fn scroll(&mut self, lines: f32) {
        self.wheel += lines;
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Actions for keys first pressed since the last [`InputState::end_frame`]
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.pressed.iter().copied().filter_map(Action::for_key)
    }

    pub fn mouse_motion(&self) -> Vec2 {
        self.mouse_motion
    }

    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.mouse_motion = Vec2::ZERO;
        self.wheel = 0.0;
    }

    fn zoom_in_held(&self) -> bool {
        self.key_held(KeyCode::Equal) || self.key_held(KeyCode::NumpadAdd)
    }

    fn zoom_out_held(&self) -> bool {
        self.key_held(KeyCode::Minus) || self.key_held(KeyCode::NumpadSubtract)
    }
}

/// Apply one frame of pan and zoom input to the camera
pub fn apply_frame_input(camera: &mut Camera2D, input: &InputState) {
    let motion = input.mouse_motion();
    camera.offset.x += motion.x;
    camera.offset.y -= motion.y;

    match (input.zoom_in_held(), input.zoom_out_held()) {
        (true, false) => camera.zoom += camera.zoom / 50.0,
        (false, true) => camera.zoom -= camera.zoom / 50.0,
        _ => {}
    }

    camera.zoom += camera.zoom / 10.0 * input.wheel();
    camera.clamp_zoom();
}
