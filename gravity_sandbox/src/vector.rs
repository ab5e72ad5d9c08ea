//! 2D vector helpers on top of `glam::DVec2`

use std::ops::Range;

use glam::{DVec2, Vec2};
use rand::Rng;

/// Vector with a uniformly sampled angle in `angle` (radians) and a uniformly
/// sampled length in `magnitude`
pub fn random_polar<R: Rng>(rng: &mut R, angle: Range<f64>, magnitude: Range<f64>) -> DVec2 {
    let theta = rng.gen_range(angle);
    let length = rng.gen_range(magnitude);
    DVec2::from_angle(theta) * length
}

/// Narrow a physics vector for the GPU path
pub fn to_render(v: DVec2) -> Vec2 {
    v.as_vec2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::TAU;

    #[test]
    fn random_polar_respects_magnitude_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_polar(&mut rng, 0.0..TAU, 50.0..200.0);
            let len = v.length();
            assert!((50.0 - 1e-9..200.0).contains(&len), "length {len} out of range");
        }
    }

    #[test]
    fn random_polar_covers_all_quadrants() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut quadrants = [false; 4];
        for _ in 0..200 {
            let v = random_polar(&mut rng, 0.0..TAU, 1.0..2.0);
            let q = match (v.x >= 0.0, v.y >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[q] = true;
        }
        assert!(quadrants.iter().all(|&hit| hit));
    }
}
