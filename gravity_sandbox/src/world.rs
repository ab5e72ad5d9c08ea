//! Simulation state and the per-frame physics step

use glam::DVec2;

use crate::body::Body;
use crate::clock::FrameClock;
use crate::config::Config;
use crate::forces::{Gravity, Nudge, RandomNudge};
use crate::integrator::rk4;

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

/// Mass-weighted centroid of `bodies`
///
/// Returns the origin when the total mass is zero, including for an empty
/// slice.
pub fn barycenter(bodies: &[Body]) -> DVec2 {
    let total_mass = total_mass(bodies);

    if total_mass == 0.0 {
        return DVec2::ZERO;
    }

    let weighted = bodies
        .iter()
        .fold(DVec2::ZERO, |acc, b| acc + b.position * b.mass);
    weighted / total_mass
}

/// The bodies being simulated and the global physics parameters
///
/// Bodies are identified by their index, which stays stable for the whole run.
pub struct World {
    pub bodies: Vec<Body>,
    pub gravity: Gravity,
    pub paused: bool,
    /// Simulated seconds, only advances while unpaused
    pub elapsed_time: f64,
    /// Frames that advanced the simulation
    pub frame: u64,
    nudge: Box<dyn Nudge>,
}

impl World {
    pub fn new(bodies: Vec<Body>, g: f64) -> Self {
        Self {
            bodies,
            gravity: Gravity::new(g),
            paused: false,
            elapsed_time: 0.0,
            frame: 0,
            nudge: Box::new(RandomNudge::from_entropy()),
        }
    }

    /// Build the initial world described by a validated configuration
    pub fn from_config(config: &Config) -> Self {
        let nudge = match config.settings.seed {
            Some(seed) => RandomNudge::seeded(seed),
            None => RandomNudge::from_entropy(),
        };

        let mut world = Self::new(config.bodies(), config.settings.g).with_nudge(nudge);
        world.paused = config.settings.paused_at_start;
        world
    }

    /// Replace the source used for coincident-pair forces
    pub fn with_nudge(mut self, nudge: impl Nudge + 'static) -> Self {
        self.nudge = Box::new(nudge);
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        total_mass(&self.bodies)
    }

    pub fn barycenter(&self) -> DVec2 {
        barycenter(&self.bodies)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance every body by `dt` seconds
    ///
    /// Returns `false` without touching any body when paused. All forces are
    /// computed from the positions at the start of the step before any body
    /// moves, so iteration order does not matter.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }

        self.accumulate_forces();

        for body in &mut self.bodies {
            body.acceleration = body.total_force / body.mass;
            let (position, velocity) = rk4(body.position, body.velocity, body.acceleration, dt);
            body.position = position;
            body.velocity = velocity;
        }

        self.elapsed_time += dt;
        true
    }

    /// Run the steps `clock` schedules for one rendered frame
    ///
    /// Returns the number of steps taken.
    pub fn advance(&mut self, clock: &mut FrameClock, frame_dt: f64) -> usize {
        if self.paused {
            return 0;
        }

        let mut taken = 0;
        for dt in clock.steps(frame_dt) {
            self.step(dt);
            taken += 1;
        }
        self.frame += 1;
        taken
    }

    /// Sum the force from every other body onto each body, O(n^2)
    ///
    /// Each unordered pair is evaluated from both sides.
    fn accumulate_forces(&mut self) {
        let n = self.bodies.len();
        let mut forces = vec![DVec2::ZERO; n];

        for (i, total) in forces.iter_mut().enumerate() {
            for j in 0..n {
                if i == j {
                    continue;
                }
                *total += self
                    .gravity
                    .force(&self.bodies[i], &self.bodies[j], self.nudge.as_mut());
            }
        }

        for (body, force) in self.bodies.iter_mut().zip(forces) {
            body.total_force = force;
        }
    }
}
