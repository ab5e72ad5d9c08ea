//! Fourth-order Runge–Kutta step for a single body
//!
//! The state is `(x, v)` with `dx/dt = v` and `dv/dt = a`. The acceleration is
//! sampled once per step and held fixed for all four stages, so forces are not
//! re-evaluated at the provisional positions. This is not a full coupled-force
//! RK4; switching to one would change trajectories.

use glam::DVec2;

/// One stage of the scheme: the position and velocity increments over `dt`
#[derive(Debug, Clone, Copy)]
struct Stage {
    dx: DVec2,
    dv: DVec2,
}

impl Stage {
    fn eval(velocity: DVec2, acceleration: DVec2, dt: f64) -> Self {
        Self {
            dx: velocity * dt,
            dv: acceleration * dt,
        }
    }
}

/// Advance `(position, velocity)` by `dt` under a constant `acceleration`
///
/// `dt == 0` returns the inputs unchanged; negative `dt` runs time backwards.
pub fn rk4(position: DVec2, velocity: DVec2, acceleration: DVec2, dt: f64) -> (DVec2, DVec2) {
    let k1 = Stage::eval(velocity, acceleration, dt);
    let k2 = Stage::eval(velocity + k1.dv * 0.5, acceleration, dt);
    let k3 = Stage::eval(velocity + k2.dv * 0.5, acceleration, dt);
    let k4 = Stage::eval(velocity + k3.dv, acceleration, dt);

    let new_position = position + (k1.dx + 2.0 * k2.dx + 2.0 * k3.dx + k4.dx) / 6.0;
    let new_velocity = velocity + (k1.dv + 2.0 * k2.dv + 2.0 * k3.dv + k4.dv) / 6.0;

    (new_position, new_velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dt_is_identity() {
        let p = DVec2::new(1.5, -2.0);
        let v = DVec2::new(3.0, 4.0);
        let a = DVec2::new(-9.0, 0.5);
        assert_eq!(rk4(p, v, a, 0.0), (p, v));
    }

    #[test]
    fn negative_dt_reverses_constant_velocity_motion() {
        let p = DVec2::new(10.0, 10.0);
        let v = DVec2::new(2.0, -1.0);
        let (back, v_back) = rk4(p, v, DVec2::ZERO, -0.5);
        assert!((back - DVec2::new(9.0, 10.5)).length() < 1e-12);
        assert_eq!(v_back, v);
    }

    #[test]
    fn constant_acceleration_matches_closed_form_with_initial_velocity() {
        let p = DVec2::new(0.0, 100.0);
        let v = DVec2::new(5.0, 0.0);
        let a = DVec2::new(0.0, -9.81);
        let t = 2.0;

        let (x, vel) = rk4(p, v, a, t);
        let expected_x = p + v * t + 0.5 * a * t * t;
        let expected_v = v + a * t;

        assert!((x - expected_x).length() < 1e-9);
        assert!((vel - expected_v).length() < 1e-9);
    }
}
