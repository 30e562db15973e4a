use glam::Vec3;
use rand::Rng;

use super::ParticleBuffer;
use crate::constants::{SPIRAL_ANGLE_STEP, SPIRAL_DEFAULT_COUNT, SPIRAL_JITTER, SPIRAL_RADIUS_SCALE};
use crate::error::ConfigError;
use crate::param::Color;

/// Galaxy placement: particle `i` sits at angle `i * angle_step` and radius
/// `radius_scale * sqrt(i)`, displaced by uniform jitter.
#[derive(Clone, Debug, PartialEq)]
pub struct SpiralConfig {
    pub count: usize,
    pub angle_step: f32,
    pub radius_scale: f32,
    pub jitter: f32,
    pub inner: Color,
    pub outer: Color,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            count: SPIRAL_DEFAULT_COUNT,
            angle_step: SPIRAL_ANGLE_STEP,
            radius_scale: SPIRAL_RADIUS_SCALE,
            jitter: SPIRAL_JITTER,
            inner: Color::from_hex(0xff6030),
            outer: Color::from_hex(0x1b3984),
        }
    }
}

impl SpiralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return Err(ConfigError::InvalidRule {
                name: "spiral".into(),
                reason: "jitter must be a finite non-negative number",
            });
        }
        if !(self.angle_step.is_finite() && self.radius_scale.is_finite()) {
            return Err(ConfigError::InvalidRule {
                name: "spiral".into(),
                reason: "angle step and radius scale must be finite",
            });
        }
        Ok(())
    }

    /// Position before jitter.
    #[inline]
    pub fn placement(&self, index: usize) -> Vec3 {
        let angle = index as f32 * self.angle_step;
        let radius = self.radius_scale * (index as f32).sqrt();
        Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
    }
}

pub(crate) fn generate<R: Rng>(
    config: &SpiralConfig,
    count: usize,
    generation: u64,
    rng: &mut R,
) -> ParticleBuffer {
    let mut buf = ParticleBuffer::zeroed(count, generation);
    let max_radius = (config.radius_scale * ((count.max(2) - 1) as f32).sqrt()).abs();
    let j = config.jitter;
    for i in 0..count {
        let base = config.placement(i);
        let offset = Vec3::new(
            rng.gen_range(-j..=j),
            rng.gen_range(-j..=j),
            rng.gen_range(-j..=j),
        );
        buf.positions[i] = base + offset;
        let t = if max_radius > 0.0 {
            (base.length() / max_radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        buf.colors[i] = config.inner.lerp(config.outer, t);
    }
    buf
}
