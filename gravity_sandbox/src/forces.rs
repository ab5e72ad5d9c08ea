//! Pairwise Newtonian gravity
//!
//! Defines the force law between two bodies and the perturbation applied when
//! two bodies occupy exactly the same position.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::{rngs::StdRng, SeedableRng};

use crate::body::Body;
use crate::vector::random_polar;

/// Lower bound (inclusive) of the coincident-pair nudge magnitude
pub const NUDGE_MIN_MAGNITUDE: f64 = 50.0;

/// Upper bound (exclusive) of the coincident-pair nudge magnitude
pub const NUDGE_MAX_MAGNITUDE: f64 = 200.0;

/// Source of the force returned for two bodies at the same position
///
/// Without it the direction of attraction is undefined and the pair stays
/// stuck together.
pub trait Nudge {
    fn nudge(&mut self) -> DVec2;
}

/// Random direction with a magnitude in
/// `[NUDGE_MIN_MAGNITUDE, NUDGE_MAX_MAGNITUDE)`
#[derive(Debug, Clone)]
pub struct RandomNudge {
    rng: StdRng,
}

impl RandomNudge {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of nudges
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Nudge for RandomNudge {
    fn nudge(&mut self) -> DVec2 {
        random_polar(
            &mut self.rng,
            0.0..TAU,
            NUDGE_MIN_MAGNITUDE..NUDGE_MAX_MAGNITUDE,
        )
    }
}

/// Always returns the same vector
#[derive(Debug, Clone, Copy)]
pub struct FixedNudge(pub DVec2);

impl Nudge for FixedNudge {
    fn nudge(&mut self) -> DVec2 {
        self.0
    }
}

/// Newtonian gravity with constant `g`
///
/// `g` may be zero or negative; no validation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub g: f64,
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Force exerted on `body` by `other`
    ///
    /// Points from `body` toward `other` when `g * m1 * m2 > 0`. Callers must
    /// not pass the same body twice; coincident positions of distinct bodies
    /// return `nudge.nudge()` instead.
    pub fn force(&self, body: &Body, other: &Body, nudge: &mut dyn Nudge) -> DVec2 {
        self.force_between(body.position, body.mass, other.position, other.mass, nudge)
    }

    pub(crate) fn force_between(
        &self,
        position: DVec2,
        mass: f64,
        other_position: DVec2,
        other_mass: f64,
        nudge: &mut dyn Nudge,
    ) -> DVec2 {
        let delta = other_position - position;
        let dist_sq = delta.length_squared();

        if dist_sq != 0.0 {
            // F = G * m1 * m2 / r^2
            let magnitude = self.g * mass * other_mass / dist_sq;
            delta.normalize() * magnitude
        } else {
            log::debug!("coincident bodies at {position}, applying nudge");
            nudge.nudge()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, y: f64, mass: f64) -> Body {
        Body::new("test", DVec2::new(x, y), DVec2::ZERO, mass)
    }

    #[test]
    fn force_points_toward_other_body() {
        let gravity = Gravity::new(1.0);
        let a = body_at(0.0, 0.0, 2.0);
        let b = body_at(0.0, 4.0, 8.0);

        let f = gravity.force(&a, &b, &mut FixedNudge(DVec2::ZERO));
        assert!((f - DVec2::new(0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn negative_g_repels() {
        let gravity = Gravity::new(-1.0);
        let a = body_at(0.0, 0.0, 1.0);
        let b = body_at(2.0, 0.0, 1.0);

        let f = gravity.force(&a, &b, &mut FixedNudge(DVec2::ZERO));
        assert!(f.x < 0.0);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn coincident_bodies_use_nudge() {
        let gravity = Gravity::new(1.0);
        let a = body_at(3.0, 3.0, 1.0);
        let b = body_at(3.0, 3.0, 1.0);
        let kick = DVec2::new(75.0, 0.0);

        assert_eq!(gravity.force(&a, &b, &mut FixedNudge(kick)), kick);
    }

    #[test]
    fn seeded_nudges_repeat() {
        let mut first = RandomNudge::seeded(99);
        let mut second = RandomNudge::seeded(99);
        for _ in 0..10 {
            assert_eq!(first.nudge(), second.nudge());
        }
    }
}
