// Host-side tests for panel overrides, validation, input routing and the material showcase.

use demo_core::*;
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

const FRAME: f32 = 1.0 / 60.0;

fn demo(name: &str) -> Controller {
    Controller::new(preset(name).unwrap().seed(1)).unwrap()
}

#[test]
fn every_preset_constructs() {
    for name in PRESET_NAMES {
        let c = Controller::new(preset(name).unwrap()).unwrap();
        assert_eq!(c.name(), *name);
    }
    assert_eq!(demo("galaxy").mode(), Mode::ParticleSpiral);
    assert_eq!(demo("fireworks").mode(), Mode::ParticleBurst);
    assert_eq!(demo("comet").mode(), Mode::ParticleTrail);
    assert_eq!(demo("gelatin").mode(), Mode::Decaying);
    assert_eq!(demo("creative").mode(), Mode::Oscillating);
    assert_eq!(preset("materialVertex").unwrap().name, "vertex");
}

#[test]
fn particle_state_follows_the_mode() {
    for name in PRESET_NAMES {
        let mut c = Controller::new(preset(name).unwrap().seed(5)).unwrap();
        c.tick(0.0);
        c.tick(FRAME);
        let mode = c.mode();
        let pooled = matches!(mode, Mode::ParticleSpiral | Mode::ParticleBurst);
        assert_eq!(c.particles().is_some(), pooled, "{name}");
        assert_eq!(c.trail().is_some(), mode == Mode::ParticleTrail, "{name}");
        assert_eq!(c.particle_count() > 0, mode.is_particle(), "{name}");
    }
}

#[test]
fn unknown_preset_is_an_error() {
    assert_eq!(
        preset("plasma").unwrap_err(),
        ConfigError::UnknownPreset("plasma".into())
    );
}

#[test]
fn override_is_visible_only_after_next_tick() {
    let mut c = demo("galaxy");
    c.tick(0.0);
    c.set_static("u_size", Value::Scalar(64.0)).unwrap();
    assert_eq!(c.uniforms().scalar("u_size"), Some(30.0));
    assert_eq!(c.tick(FRAME).scalar("u_size"), Some(64.0));
}

#[test]
fn overridden_driven_param_stays_pinned() {
    let mut c = demo("gelatin");
    c.tick(0.0);
    c.set_static("u_shininess", Value::Scalar(50.0)).unwrap();
    for n in 1..30 {
        let u = c.tick(n as f32 * 0.1);
        assert_eq!(u.scalar("u_shininess"), Some(50.0));
    }
    // untouched params keep animating
    let t = 2.9f32;
    let expected = 0.5 + 0.1 * (2.0 * t).sin();
    assert!((c.uniforms().scalar("u_transparency").unwrap() - expected).abs() < 1e-5);
}

#[test]
fn overridden_stateful_param_continues_from_new_value() {
    let mut c = demo("gelatin");
    c.tick(0.0);
    c.set_static("u_elasticity", Value::Scalar(0.5)).unwrap();
    assert_eq!(c.tick(FRAME).scalar("u_elasticity"), Some(0.5));
    let next = c.tick(2.0 * FRAME).scalar("u_elasticity").unwrap();
    assert!((next - 0.49).abs() < 1e-6);

}

#[test]
fn overridden_clock_offset_stays_pinned() {
    let mut v = demo("vertex");
    v.tick(0.0);
    v.set_static("u_time", Value::Scalar(2.0)).unwrap();
    assert_eq!(v.tick(FRAME).scalar("u_time"), Some(2.0));
    assert_eq!(v.tick(5.0).scalar("u_time"), Some(2.0));
}

#[test]
fn colour_override_replaces_colour() {
    let mut c = demo("gelatin");
    let red = Color::from_hex(0xff0000);
    c.set_static("u_objectColor", Value::Color(red)).unwrap();
    assert_eq!(c.tick(0.0).color("u_objectColor"), Some(red));
    assert_eq!(red.to_hex(), 0xff0000);
}

#[test]
fn rejected_overrides_leave_values_alone() {
    let mut c = demo("galaxy");
    c.tick(0.0);

    assert_eq!(
        c.set_static("u_missing", Value::Scalar(1.0)),
        Err(ConfigError::UnknownParam("u_missing".into()))
    );
    assert_eq!(
        c.set_static("u_size", Value::Scalar(500.0)),
        Err(ConfigError::OutOfRange {
            name: "u_size".into(),
            value: 500.0,
            min: 1.0,
            max: 100.0,
        })
    );
    assert_eq!(
        c.set_static("u_size", Value::Vec3(Vec3::ONE)),
        Err(ConfigError::TypeMismatch {
            name: "u_size".into(),
            expected: ValueKind::Scalar,
            got: ValueKind::Vec3,
        })
    );
    assert_eq!(
        c.set_static("u_spin", Value::Scalar(f32::NAN)),
        Err(ConfigError::NonFinite("u_spin".into()))
    );

    let u = c.tick(FRAME);
    assert_eq!(u.scalar("u_size"), Some(30.0));
    assert_eq!(u.scalar("u_spin"), Some(0.2));
}

#[test]
fn range_bounds_are_inclusive() {
    let mut c = demo("galaxy");
    assert!(c.set_static("u_size", Value::Scalar(1.0)).is_ok());
    assert!(c.set_static("u_size", Value::Scalar(100.0)).is_ok());
    assert!(c.set_static("u_size", Value::Scalar(100.5)).is_err());
}

#[test]
fn trail_bookkeeping_cannot_be_overridden() {
    let mut c = demo("comet");
    assert!(matches!(
        c.set_static("u_trailHead", Value::Scalar(3.0)),
        Err(ConfigError::InvalidRule { .. })
    ));
    assert!(matches!(
        c.set_static("u_trailLength", Value::Scalar(3.0)),
        Err(ConfigError::InvalidRule { .. })
    ));
}

#[test]
fn construction_rejects_bad_tables() {
    let dup = DemoSpec::new("dup")
        .param(ParamSpec::scalar("a", 0.0))
        .param(ParamSpec::scalar("a", 1.0));
    assert_eq!(
        Controller::new(dup).unwrap_err(),
        ConfigError::DuplicateParam("a".into())
    );

    let missing = DemoSpec::new("trail")
        .param(ParamSpec::new("u_pos", Vec3::ZERO))
        .emission(Emission::Trail(TrailConfig::new("u_other")));
    assert_eq!(
        Controller::new(missing).unwrap_err(),
        ConfigError::MissingGuide("u_other".into())
    );

    let scalar_guide = DemoSpec::new("trail")
        .param(ParamSpec::scalar("u_pos", 0.0))
        .emission(Emission::Trail(TrailConfig::new("u_pos")));
    assert!(matches!(
        Controller::new(scalar_guide),
        Err(ConfigError::MissingGuide(_))
    ));

    let bad_decay = DemoSpec::new("decay").param(
        ParamSpec::scalar("u_e", 0.0).rule(Rule::Decay(DecayConfig {
            rate: 1.5,
            ..DecayConfig::default()
        })),
    );
    assert!(matches!(
        Controller::new(bad_decay),
        Err(ConfigError::InvalidRule { .. })
    ));

    let wrong_kind = DemoSpec::new("orbit")
        .param(ParamSpec::scalar("u_dir", 0.0).rule(Rule::Orbit(Orbit::unit_xz(1.0))));
    assert!(matches!(
        Controller::new(wrong_kind),
        Err(ConfigError::TypeMismatch { .. })
    ));

    let outside = DemoSpec::new("range").param(ParamSpec::scalar("u_s", 50.0).range(0.0, 10.0, 1.0));
    assert!(matches!(
        Controller::new(outside),
        Err(ConfigError::OutOfRange { .. })
    ));

    let ranged_colour = DemoSpec::new("colour")
        .param(ParamSpec::new("u_c", Color::WHITE).range(0.0, 1.0, 0.1));
    assert!(matches!(
        Controller::new(ranged_colour),
        Err(ConfigError::InvalidRule { .. })
    ));

    let nan = DemoSpec::new("nan").param(ParamSpec::scalar("u_n", f32::NAN));
    assert_eq!(
        Controller::new(nan).unwrap_err(),
        ConfigError::NonFinite("u_n".into())
    );

    let mut empty = preset("galaxy").unwrap();
    if let Some(Emission::Spiral(cfg)) = empty.emission.as_mut() {
        cfg.count = 0;
    }
    assert_eq!(
        Controller::new(empty).unwrap_err(),
        ConfigError::EmptyParticleBuffer
    );
}

#[test]
fn listeners_see_accepted_overrides_only() {
    let mut c = demo("galaxy");
    let seen: Rc<RefCell<Vec<(String, Value)>>> = Rc::default();
    let sink = seen.clone();
    c.on_change(move |name, value| sink.borrow_mut().push((name.to_string(), *value)));

    c.set_static("u_spin", Value::Scalar(1.5)).unwrap();
    let _ = c.set_static("u_spin", Value::Scalar(9.0));
    c.set_static("u_size", Value::Scalar(10.0)).unwrap();

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        vec![
            ("u_spin".to_string(), Value::Scalar(1.5)),
            ("u_size".to_string(), Value::Scalar(10.0)),
        ]
    );
}

#[test]
fn panel_lists_sliders_and_colours() {
    let galaxy = demo("galaxy");
    let names: Vec<String> = galaxy.panel().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["u_size", "u_spin"]);
    let size = &galaxy.panel()[0];
    assert_eq!(size.kind(), ValueKind::Scalar);
    assert_eq!(
        size.range,
        Some(PanelRange {
            min: 1.0,
            max: 100.0,
            step: 1.0
        })
    );

    let gelatin = demo("gelatin");
    let names: Vec<String> = gelatin.panel().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["u_lightColor", "u_objectColor"]);
}

#[test]
fn resize_updates_resolution_on_next_tick() {
    let mut c = demo("creative");
    c.tick(0.0);
    c.handle(InputEvent::Resize {
        width: 800,
        height: 600,
    })
    .unwrap();
    assert_eq!(c.uniforms().vec2("u_resolution"), Some(Vec2::ONE));
    assert_eq!(c.tick(FRAME).vec2("u_resolution"), Some(Vec2::new(800.0, 600.0)));
    assert_eq!(c.tick(2.0 * FRAME).vec2("u_resolution"), Some(Vec2::new(800.0, 600.0)));
}

#[test]
fn reseed_key_only_applies_to_particle_demos() {
    let mut galaxy = demo("galaxy");
    galaxy.handle(InputEvent::Key("R".into())).unwrap();
    assert_eq!(galaxy.generation(), 1);
    assert_eq!(galaxy.particle_count(), SPIRAL_DEFAULT_COUNT);
    galaxy.handle(InputEvent::Key("x".into())).unwrap();
    assert_eq!(galaxy.generation(), 1);

    let mut gelatin = demo("gelatin");
    gelatin.handle(InputEvent::Key("r".into())).unwrap();
    assert_eq!(gelatin.generation(), 0);
    assert_eq!(gelatin.particle_count(), 0);
    assert!(gelatin.particle_vertices().is_empty());
}

#[test]
fn reseed_resets_burst_age() {
    let mut c = demo("fireworks");
    c.tick(0.0);
    assert_eq!(c.tick(1.0).scalar("u_burstAge"), Some(1.0));
    c.reseed(ReseedConfig::new(100)).unwrap();
    let age = c.tick(1.25).scalar("u_burstAge").unwrap();
    assert!((age - 0.25).abs() < 1e-6);
}

#[test]
fn showcase_ticks_only_the_active_material() {
    let mut s = Showcase::new().unwrap();
    assert_eq!(s.material(), MaterialKind::Gelatin);
    assert_eq!(s.shape(), Shape::Cube);

    s.tick(1.0);
    assert_eq!(s.controller(MaterialKind::Gelatin).elapsed(), 1.0);
    assert_eq!(s.controller(MaterialKind::Vertex).elapsed(), 0.0);

    s.set_material(MaterialKind::Vertex);
    let u = s.tick(1.5);
    assert!(u.contains("u_smoothness"));
    assert_eq!(s.controller(MaterialKind::Gelatin).elapsed(), 1.0);

    assert!(s.set_static("u_smoothness", Value::Scalar(12.0)).is_ok());
    assert!(matches!(
        s.set_static("u_elasticity", Value::Scalar(0.5)),
        Err(ConfigError::UnknownParam(_))
    ));
}

#[test]
fn showcase_broadcasts_resize_and_routes_clicks() {
    let mut s = Showcase::new().unwrap();
    s.handle(InputEvent::Resize {
        width: 1024,
        height: 768,
    })
    .unwrap();
    s.handle(InputEvent::Click {
        hit: Some(Vec3::new(0.5, 0.5, 3.0)),
    })
    .unwrap();

    let u = s.tick(0.0);
    assert_eq!(u.vec2("u_resolution"), Some(Vec2::new(1024.0, 768.0)));
    assert_eq!(u.scalar("u_elasticity"), Some(1.0));

    for kind in [MaterialKind::Vertex, MaterialKind::Creative] {
        s.set_material(kind);
        let u = s.tick(0.1);
        assert_eq!(u.vec2("u_resolution"), Some(Vec2::new(1024.0, 768.0)));
    }
}

#[test]
fn shapes_and_materials_parse_by_name() {
    for shape in Shape::ALL {
        assert_eq!(Shape::from_name(shape.name()), Some(shape));
    }
    for kind in MaterialKind::ALL {
        assert_eq!(MaterialKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(MaterialKind::from_name("materialVertex"), Some(MaterialKind::Vertex));
    assert_eq!(Shape::from_name("cone"), None);
    assert!(matches!(
        Shape::Torus.geometry(),
        Geometry::Torus {
            radial_segments: 32,
            tubular_segments: 64,
            ..
        }
    ));
}

#[test]
fn showcase_listener_follows_material_switches() {
    let mut s = Showcase::new().unwrap();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = seen.clone();
    s.on_change(move |name, _| sink.borrow_mut().push(name.to_string()));

    s.set_static("u_objectColor", Value::Color(Color::BLACK)).unwrap();
    s.set_material(MaterialKind::Vertex);
    s.set_static("u_smoothness", Value::Scalar(3.0)).unwrap();

    assert_eq!(*seen.borrow(), vec!["u_objectColor", "u_smoothness"]);
}

#[test]
fn showcase_staging_matches_scene_setup() {
    let s = Showcase::new().unwrap();
    let staging = s.staging();
    assert_eq!(staging.fov_deg, 75.0);
    assert_eq!(staging.camera_position, Vec3::new(0.0, 0.0, 9.0));
    assert!((staging.mesh_rotation.y - std::f32::consts::PI / 5.0).abs() < 1e-6);
    assert!(staging.near < staging.far);
}
