// Host-side tests for time-driven parameters.

use demo_core::*;

#[test]
fn oscillators_stay_within_bounds() {
    let shininess = Oscillator::cos(16.0, 8.0, 2.0);
    let transparency = Oscillator::sin(0.5, 0.1, 2.0);
    let inflate = Oscillator::sin(0.2, 0.1, 2.0);
    for osc in [shininess, transparency, inflate] {
        let (lo, hi) = osc.bounds();
        let mut t = 0.0f32;
        while t < 500.0 {
            let v = osc.eval(t);
            assert!(v >= lo && v <= hi, "{v} outside [{lo}, {hi}] at t={t}");
            t += 0.037;
        }
    }
}

#[test]
fn gelatin_driven_params_follow_their_formulas() {
    let mut c = Controller::new(preset("gelatin").unwrap()).unwrap();
    for &t in &[0.0f32, 0.25, 1.0, 3.7, 12.5] {
        let u = c.tick(t);
        let shininess = u.scalar("u_shininess").unwrap();
        let transparency = u.scalar("u_transparency").unwrap();
        assert!((shininess - (16.0 + 8.0 * (2.0 * t).cos())).abs() < 1e-5);
        assert!((transparency - (0.5 + 0.1 * (2.0 * t).sin())).abs() < 1e-6);
        assert_eq!(u.scalar("u_time"), Some(t));
    }
}

#[test]
fn light_direction_has_unit_length_every_tick() {
    let mut c = Controller::new(preset("gelatin").unwrap()).unwrap();
    let mut t = 0.0f32;
    for _ in 0..2000 {
        let dir = c.tick(t).vec3("u_lightDirection").unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6, "length {} at t={t}", dir.length());
        assert!(dir.y.abs() < 1e-6, "orbit left the X-Z plane");
        t += 0.016;
    }
}

#[test]
fn degenerate_direction_keeps_previous_value() {
    let orbit = Orbit::direction(
        Oscillator::constant(0.0),
        Oscillator::constant(0.0),
        Oscillator::constant(0.0),
    );
    let prev = glam::Vec3::X;
    assert_eq!(orbit.eval(1.0, prev), prev);
}

#[test]
fn creative_inflate_oscillates_around_base() {
    let mut c = Controller::new(preset("creative").unwrap()).unwrap();
    assert_eq!(c.tick(0.0).scalar("u_inflateAmount"), Some(0.2));
    let quarter = std::f32::consts::FRAC_PI_4;
    let v = c.tick(quarter).scalar("u_inflateAmount").unwrap();
    assert!((v - 0.3).abs() < 1e-6);
}

#[test]
fn vertex_time_tracks_clock_plus_offset() {
    let mut c = Controller::new(preset("vertex").unwrap()).unwrap();
    let mut t = 0.0;
    for n in 1..=100 {
        // frame spacing must not change the value at a given time
        t += if n % 2 == 0 { 0.05 } else { 0.001 };
        let v = c.tick(t).scalar("u_time").unwrap();
        assert!((v - (t + VERTEX_TIME_OFFSET)).abs() < 1e-6);
    }
    let v = c.tick(10.0).scalar("u_time").unwrap();
    assert!((v - 10.01).abs() < 1e-5);
}

#[test]
fn clock_never_runs_backwards() {
    let mut c = Controller::new(preset("creative").unwrap()).unwrap();
    c.tick(1.0);
    let u = c.tick(0.5);
    assert_eq!(u.scalar("u_time"), Some(1.0));
    assert_eq!(c.elapsed(), 1.0);
    assert_eq!(c.tick(f32::NAN).scalar("u_time"), Some(1.0));
}

#[test]
fn scene_clock_reports_delta() {
    let mut clock = SceneClock::new();
    clock.advance_to(0.5);
    clock.advance_to(0.75);
    assert_eq!(clock.delta(), 0.25);
    assert_eq!(clock.ticks(), 2);
    clock.advance_to(0.1);
    assert_eq!(clock.delta(), 0.0);
}
