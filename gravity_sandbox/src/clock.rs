//! Conversion from wall-clock frame time to simulation steps

use std::iter::{repeat, Repeat, Take};

use serde::{Deserialize, Serialize};

/// Upper bound on fixed steps run in a single frame
pub const MAX_STEPS_PER_FRAME: usize = 8;

/// How frame time is turned into integration steps
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestep {
    /// One step per frame using the frame's elapsed time
    #[default]
    Variable,
    /// Steps of exactly this many seconds, accumulated across frames
    Fixed(f64),
}

/// Accumulates frame time for [`Timestep::Fixed`]
#[derive(Debug, Clone)]
pub struct FrameClock {
    timestep: Timestep,
    accumulator: f64,
}

impl FrameClock {
    pub fn new(timestep: Timestep) -> Self {
        Self {
            timestep,
            accumulator: 0.0,
        }
    }

    /// Step sizes to run for a frame that lasted `frame_dt` seconds
    ///
    /// In fixed mode any backlog beyond [`MAX_STEPS_PER_FRAME`] whole steps is
    /// dropped; the fractional remainder carries over.
    pub fn steps(&mut self, frame_dt: f64) -> Take<Repeat<f64>> {
        match self.timestep {
            Timestep::Variable => repeat(frame_dt).take(1),
            Timestep::Fixed(step) => {
                self.accumulator += frame_dt;

                let mut count = 0;
                while self.accumulator >= step && count < MAX_STEPS_PER_FRAME {
                    self.accumulator -= step;
                    count += 1;
                }
                if self.accumulator >= step {
                    log::warn!(
                        "simulation falling behind, dropping {:.3}s of backlog",
                        self.accumulator - self.accumulator % step
                    );
                    self.accumulator %= step;
                }

                repeat(step).take(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_runs_one_step_of_frame_time() {
        let mut clock = FrameClock::new(Timestep::Variable);
        let steps: Vec<f64> = clock.steps(0.016).collect();
        assert_eq!(steps, vec![0.016]);
    }

    #[test]
    fn fixed_carries_remainder_between_frames() {
        let mut clock = FrameClock::new(Timestep::Fixed(0.01));

        assert_eq!(clock.steps(0.025).count(), 2);
        // 0.005 carried + 0.006 crosses one more step
        assert_eq!(clock.steps(0.006).count(), 1);
        assert_eq!(clock.steps(0.001).count(), 0);
    }

    #[test]
    fn fixed_caps_steps_per_frame() {
        let mut clock = FrameClock::new(Timestep::Fixed(0.01));
        assert_eq!(clock.steps(1.0).count(), MAX_STEPS_PER_FRAME);
        assert_eq!(clock.steps(0.0).count(), 0);
    }

    #[test]
    fn timestep_parses_from_json() {
        let variable: Timestep = serde_json::from_str("\"variable\"").unwrap();
        let fixed: Timestep = serde_json::from_str("{\"fixed\": 0.02}").unwrap();
        assert_eq!(variable, Timestep::Variable);
        assert_eq!(fixed, Timestep::Fixed(0.02));
    }
}
