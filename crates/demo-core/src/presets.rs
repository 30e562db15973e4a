//! Parameter tables for every demo, looked up by name.

use glam::{Vec2, Vec3};

use crate::constants::*;
use crate::demo::DemoSpec;
use crate::error::ConfigError;
use crate::param::{Color, ParamSpec};
use crate::particles::{BurstConfig, Emission, SpiralConfig, TrailConfig};
use crate::rule::{DecayConfig, Orbit, Oscillator, Rule};

pub const PRESET_NAMES: &[&str] = &[
    "vertex",
    "gelatin",
    "creative",
    "galaxy",
    "fireworks",
    "comet",
];

pub fn preset(name: &str) -> Result<DemoSpec, ConfigError> {
    match name {
        "vertex" | "materialVertex" => Ok(vertex()),
        "gelatin" => Ok(gelatin()),
        "creative" => Ok(creative()),
        "galaxy" => Ok(galaxy()),
        "fireworks" => Ok(fireworks()),
        "comet" => Ok(comet()),
        _ => Err(ConfigError::UnknownPreset(name.to_string())),
    }
}

fn resolution() -> ParamSpec {
    ParamSpec::new("u_resolution", Vec2::ONE).rule(Rule::Resolution)
}

fn clock() -> ParamSpec {
    ParamSpec::scalar("u_time", 0.0).rule(Rule::Clock)
}

fn diagonal_light() -> Vec3 {
    Vec3::ONE.normalize()
}

/// Vertex-warp material: scene time nudged by a small offset and a smoothness slider.
pub fn vertex() -> DemoSpec {
    DemoSpec::new("vertex")
        .param(ParamSpec::scalar("u_time", 0.0).rule(Rule::ClockOffset {
            offset: VERTEX_TIME_OFFSET,
        }))
        .param(ParamSpec::scalar("u_smoothness", 5.0).range(1.0, 20.0, 0.1))
        .param(resolution())
}

/// Blinn-shaded gelatin solid that wobbles where it was clicked.
pub fn gelatin() -> DemoSpec {
    DemoSpec::new("gelatin")
        .param(clock())
        .param(resolution())
        .param(ParamSpec::new("u_clickTime", NO_IMPULSE_TIME).rule(Rule::ImpulseTime))
        .param(ParamSpec::scalar("u_elasticity", 0.0).rule(Rule::Decay(DecayConfig::default())))
        .param(ParamSpec::new("u_clickPosition", no_impulse_point()).rule(Rule::ImpulsePoint))
        .param(
            ParamSpec::scalar("u_shininess", 32.0)
                .rule(Rule::Oscillate(Oscillator::cos(16.0, 8.0, 2.0))),
        )
        .param(
            ParamSpec::scalar("u_transparency", 0.6)
                .rule(Rule::Oscillate(Oscillator::sin(0.5, 0.1, 2.0))),
        )
        .param(
            ParamSpec::new("u_lightDirection", diagonal_light())
                .rule(Rule::Orbit(Orbit::unit_xz(0.5))),
        )
        .param(ParamSpec::new("u_lightColor", Color::WHITE))
        .param(ParamSpec::new("u_objectColor", Color::from_hex(0x00ff00)))
}

/// Inflating toon-shaded solid.
pub fn creative() -> DemoSpec {
    DemoSpec::new("creative")
        .param(clock())
        .param(resolution())
        .param(
            ParamSpec::scalar("u_inflateAmount", 0.2)
                .rule(Rule::Oscillate(Oscillator::sin(0.2, 0.1, 2.0))),
        )
        .param(ParamSpec::new("u_lightDirection", diagonal_light()))
        .param(ParamSpec::new("u_lightColor", Color::BLACK))
        .param(ParamSpec::new("u_objectColor", Color::WHITE))
}

/// Spiral galaxy; the host spins the whole point cloud.
pub fn galaxy() -> DemoSpec {
    DemoSpec::new("galaxy")
        .param(clock())
        .param(resolution())
        .param(ParamSpec::scalar("u_size", 30.0).range(1.0, 100.0, 1.0))
        .param(ParamSpec::scalar("u_spin", 0.2).range(0.0, 2.0, 0.01))
        .emission(Emission::Spiral(SpiralConfig::default()))
        .reseed_key(RESEED_KEY)
}

/// Firework burst integrated in the vertex shader from velocity and gravity.
pub fn fireworks() -> DemoSpec {
    DemoSpec::new("fireworks")
        .param(clock())
        .param(resolution())
        .param(ParamSpec::scalar("u_burstAge", 0.0).rule(Rule::SinceReseed))
        .param(ParamSpec::new("u_gravity", gravity_vec3()))
        .param(ParamSpec::new("u_maxLife", BURST_LIFE_CEILING))
        .param(ParamSpec::scalar("u_size", 8.0).range(1.0, 40.0, 1.0))
        .emission(Emission::Burst(BurstConfig::default()))
        .reseed_key(RESEED_KEY)
}

/// Comet circling on a Lissajous path with a fading trail behind it.
pub fn comet() -> DemoSpec {
    let path = Orbit::path(
        Oscillator::cos(0.0, 3.0, 1.2),
        Oscillator::sin(0.0, 1.0, 2.4),
        Oscillator::sin(0.0, 3.0, 1.2),
    );
    DemoSpec::new("comet")
        .param(clock())
        .param(resolution())
        .param(
            ParamSpec::new("u_cometPosition", path.eval(0.0, Vec3::ZERO))
                .rule(Rule::Orbit(path)),
        )
        .param(ParamSpec::scalar("u_trailHead", 0.0).rule(Rule::TrailHead))
        .param(ParamSpec::scalar("u_trailLength", 0.0).rule(Rule::TrailLength))
        .param(ParamSpec::scalar("u_trailSize", 6.0).range(1.0, 30.0, 0.5))
        .param(ParamSpec::new("u_cometColor", Color::from_hex(0x9fd8ff)))
        .emission(Emission::Trail(TrailConfig::new("u_cometPosition")))
        .reseed_key(RESEED_KEY)
}
