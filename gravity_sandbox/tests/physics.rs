use glam::DVec2;
use gravity_sandbox::forces::{NUDGE_MAX_MAGNITUDE, NUDGE_MIN_MAGNITUDE};
use gravity_sandbox::{barycenter, rk4, Body, FixedNudge, Gravity, RandomNudge, World};

/// Fail with both vectors printed when they differ by more than `tol`
fn assert_close(actual: DVec2, expected: DVec2, tol: f64) {
    assert!(
        (actual - expected).length() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

fn body(x: f64, y: f64, mass: f64) -> Body {
    Body::new("body", DVec2::new(x, y), DVec2::ZERO, mass)
}

/// Two unit masses 20 apart on the x-axis, at rest
fn two_body_world() -> World {
    World::new(vec![body(-10.0, 0.0, 1.0), body(10.0, 0.0, 1.0)], 1.0)
        .with_nudge(FixedNudge(DVec2::ZERO))
}

// ==================================================================================
// Force model
// ==================================================================================

#[test]
fn force_is_equal_and_opposite() {
    let gravity = Gravity::new(6.5);
    let a = body(-3.0, 2.0, 4.0);
    let b = body(5.0, -1.0, 9.0);
    let mut nudge = FixedNudge(DVec2::ZERO);

    let ab = gravity.force(&a, &b, &mut nudge);
    let ba = gravity.force(&b, &a, &mut nudge);

    assert!(ab.length() > 0.0);
    assert_close(ab + ba, DVec2::ZERO, 1e-12);
}

#[test]
fn force_follows_inverse_square_law() {
    let gravity = Gravity::new(1.0);
    let mut nudge = FixedNudge(DVec2::ZERO);
    let origin = body(0.0, 0.0, 1.0);

    let near = gravity.force(&origin, &body(1.0, 0.0, 1.0), &mut nudge);
    let far = gravity.force(&origin, &body(2.0, 0.0, 1.0), &mut nudge);

    assert!((near.length() / far.length() - 4.0).abs() < 1e-12);
}

#[test]
fn zero_g_gives_zero_force() {
    let gravity = Gravity::new(0.0);
    let mut nudge = FixedNudge(DVec2::new(1.0, 1.0));
    let pairs = [
        (body(0.0, 0.0, 1.0), body(1.0, 1.0, 1e6)),
        (body(-50.0, 3.0, 0.01), body(7.0, -2.0, 5.0)),
    ];

    for (a, b) in &pairs {
        assert_eq!(gravity.force(a, b, &mut nudge), DVec2::ZERO);
    }

    let mut world = World::new(vec![body(-1.0, 0.0, 1.0), body(1.0, 0.0, 1.0)], 0.0);
    world.step(1.0);
    assert!(world.bodies.iter().all(|b| b.total_force == DVec2::ZERO));
}

#[test]
fn coincident_pair_gets_bounded_random_nudge() {
    let gravity = Gravity::new(1.0);
    let a = body(5.0, 5.0, 1.0);
    let b = body(5.0, 5.0, 1.0);
    let mut nudge = RandomNudge::seeded(2024);

    let mut samples = Vec::new();
    for _ in 0..100 {
        let f = gravity.force(&a, &b, &mut nudge);
        let magnitude = f.length();
        assert!(
            magnitude >= NUDGE_MIN_MAGNITUDE - 1e-9 && magnitude < NUDGE_MAX_MAGNITUDE,
            "nudge magnitude {magnitude} out of range"
        );
        samples.push(f);
    }

    // repeated calls are not all the same
    assert!(samples.windows(2).any(|w| w[0] != w[1]));
}

// ==================================================================================
// Integrator
// ==================================================================================

#[test]
fn zero_acceleration_is_constant_velocity() {
    let p = DVec2::new(3.0, -7.0);
    let v = DVec2::new(-1.5, 0.25);

    for dt in [0.0, 0.016, 1.0, 12.5, -3.0] {
        let (x, vel) = rk4(p, v, DVec2::ZERO, dt);
        assert_close(x, p + v * dt, 1e-12);
        assert_eq!(vel, v);
    }
}

#[test]
fn constant_acceleration_from_rest_matches_closed_form() {
    let p = DVec2::new(1.0, 2.0);
    let a = DVec2::new(0.3, -4.0);

    for t in [0.1, 1.0, 10.0] {
        let (x, v) = rk4(p, DVec2::ZERO, a, t);
        assert_close(x, p + 0.5 * a * t * t, 1e-9);
        assert_close(v, a * t, 1e-12);
    }
}

// ==================================================================================
// Barycenter
// ==================================================================================

#[test]
fn barycenter_of_equal_masses_is_midpoint() {
    let p1 = DVec2::new(-4.0, 10.0);
    let p2 = DVec2::new(8.0, -2.0);
    let bodies = [body(p1.x, p1.y, 3.0), body(p2.x, p2.y, 3.0)];

    assert_eq!(barycenter(&bodies), (p1 + p2) / 2.0);
}

#[test]
fn barycenter_with_zero_total_mass_is_origin() {
    assert_eq!(barycenter(&[]), DVec2::ZERO);
    assert_eq!(barycenter(&[body(4.0, 4.0, 0.0), body(-9.0, 1.0, 0.0)]), DVec2::ZERO);
    assert_eq!(barycenter(&[body(4.0, 4.0, 2.0), body(-9.0, 1.0, -2.0)]), DVec2::ZERO);
}

// ==================================================================================
// Simulation step
// ==================================================================================

#[test]
fn two_bodies_fall_toward_each_other() {
    let mut world = two_body_world();
    let dt = 0.1;
    let accel = 1.0 * 1.0 * 1.0 / (20.0 * 20.0);

    assert!(world.step(dt));

    let left = &world.bodies[0];
    let right = &world.bodies[1];

    assert_close(left.total_force, DVec2::new(accel, 0.0), 1e-15);
    assert_close(left.acceleration, DVec2::new(accel, 0.0), 1e-15);
    assert_close(right.acceleration, DVec2::new(-accel, 0.0), 1e-15);

    let shift = 0.5 * accel * dt * dt;
    assert!((shift - 1.25e-5).abs() < 1e-15);
    assert_close(left.position, DVec2::new(-10.0 + shift, 0.0), 1e-12);
    assert_close(right.position, DVec2::new(10.0 - shift, 0.0), 1e-12);

    assert_close(left.velocity, DVec2::new(0.00025, 0.0), 1e-12);
    assert_close(right.velocity, DVec2::new(-0.00025, 0.0), 1e-12);
}

#[test]
fn momentum_is_conserved_over_many_steps() {
    let mut world = World::new(
        vec![
            Body::new("a", DVec2::new(-50.0, 0.0), DVec2::new(0.0, 3.0), 10.0),
            Body::new("b", DVec2::new(40.0, 10.0), DVec2::new(-1.0, -2.0), 4.0),
            Body::new("c", DVec2::new(0.0, 70.0), DVec2::new(2.0, 0.0), 1.0),
        ],
        50.0,
    );
    let momentum = |w: &World| {
        w.bodies
            .iter()
            .fold(DVec2::ZERO, |acc, b| acc + b.velocity * b.mass)
    };

    let before = momentum(&world);
    for _ in 0..500 {
        world.step(0.01);
    }

    assert_close(momentum(&world), before, 1e-9);
}

#[test]
fn paused_world_keeps_state() {
    let mut world = two_body_world();
    world.paused = true;
    let snapshot = world.bodies.clone();

    for _ in 0..10 {
        assert!(!world.step(0.1));
    }

    assert_eq!(world.bodies, snapshot);
    assert_eq!(world.frame, 0);
}

#[test]
fn forces_survive_pause_for_debug_overlay() {
    let mut world = two_body_world();
    world.step(0.1);
    let force = world.bodies[0].total_force;

    world.toggle_pause();
    world.step(0.1);

    assert_eq!(world.bodies[0].total_force, force);
}
