use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

use super::ParticleBuffer;
use crate::constants::{
    BURST_DEFAULT_COUNT, BURST_LIFE_CEILING, BURST_LIFE_MIN, BURST_SPEED_MAX, BURST_SPEED_MIN,
};
use crate::error::ConfigError;
use crate::param::Color;

/// Radial explosion: every particle leaves `origin` in a random direction.
///
/// Motion is integrated by the vertex shader from velocity, gravity and the
/// time since the burst; the controller only fades opacity as particles age.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    pub count: usize,
    pub origin: Vec3,
    pub speed_min: f32,
    pub speed_max: f32,
    pub life_min: f32,
    /// Upper bound of per-particle lifetime, also published as `u_maxLife`.
    pub life_ceiling: f32,
    pub palette: Vec<Color>,
    /// Reseed automatically once every particle has faded out.
    pub relaunch: bool,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: BURST_DEFAULT_COUNT,
            origin: Vec3::ZERO,
            speed_min: BURST_SPEED_MIN,
            speed_max: BURST_SPEED_MAX,
            life_min: BURST_LIFE_MIN,
            life_ceiling: BURST_LIFE_CEILING,
            palette: vec![
                Color::from_hex(0xff4040),
                Color::from_hex(0xffd040),
                Color::from_hex(0x40c0ff),
                Color::from_hex(0xc060ff),
            ],
            relaunch: true,
        }
    }
}

impl BurstConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| {
            Err(ConfigError::InvalidRule {
                name: "burst".into(),
                reason,
            })
        };
        if !(self.speed_min >= 0.0 && self.speed_min <= self.speed_max) {
            return invalid("speed range must satisfy 0 <= min <= max");
        }
        if !(self.life_min > 0.0 && self.life_min <= self.life_ceiling) {
            return invalid("lifetime range must satisfy 0 < min <= ceiling");
        }
        if !self.speed_max.is_finite() || !self.life_ceiling.is_finite() {
            return invalid("speed and lifetime bounds must be finite");
        }
        Ok(())
    }
}

/// Uniformly distributed unit vector.
fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

pub(crate) fn generate<R: Rng>(
    config: &BurstConfig,
    count: usize,
    generation: u64,
    rng: &mut R,
) -> ParticleBuffer {
    let mut buf = ParticleBuffer::zeroed(count, generation);
    for i in 0..count {
        let speed = rng.gen_range(config.speed_min..=config.speed_max);
        buf.positions[i] = config.origin;
        buf.velocities[i] = random_direction(rng) * speed;
        buf.life[i] = rng.gen_range(config.life_min..=config.life_ceiling);
        buf.colors[i] = config.palette.choose(rng).copied().unwrap_or(Color::WHITE);
    }
    buf
}

/// Fade each particle linearly over its lifetime.
pub(crate) fn fade(buf: &mut ParticleBuffer, age: f32) {
    for (opacity, life) in buf.opacity.iter_mut().zip(buf.life.iter()) {
        *opacity = (1.0 - age / life).clamp(0.0, 1.0);
    }
}

/// Whether every particle has outlived its lifetime at `age`.
pub(crate) fn spent(buf: &ParticleBuffer, age: f32) -> bool {
    buf.life.iter().all(|&life| age >= life)
}
