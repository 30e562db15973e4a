use glam::Vec3;
use rand::Rng;

use super::ParticleVertex;
use crate::constants::{TRAIL_DEFAULT_LEN, TRAIL_FADE, TRAIL_TINT_JITTER};
use crate::error::ConfigError;
use crate::param::{Color, ParamName};

/// Comet trail following a guide parameter (a `Vec3` uniform).
#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    pub count: usize,
    pub guide: ParamName,
    /// Opacity multiplier per slot of age.
    pub fade: f32,
    pub color: Color,
    pub tint_jitter: f32,
}

impl TrailConfig {
    pub fn new(guide: impl Into<ParamName>) -> Self {
        Self {
            count: TRAIL_DEFAULT_LEN,
            guide: guide.into(),
            fade: TRAIL_FADE,
            color: Color::from_hex(0x9fd8ff),
            tint_jitter: TRAIL_TINT_JITTER,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fade >= 0.0 && self.fade.is_finite()) {
            return Err(ConfigError::InvalidRule {
                name: self.guide.clone(),
                reason: "trail fade must be a finite non-negative number",
            });
        }
        if !(self.tint_jitter >= 0.0 && self.tint_jitter.is_finite()) {
            return Err(ConfigError::InvalidRule {
                name: self.guide.clone(),
                reason: "trail tint jitter must be a finite non-negative number",
            });
        }
        Ok(())
    }
}

/// Ring of past guide positions with a moving write head.
///
/// Logical slot 0 is the newest sample, slot `i` the sample from `i` pushes
/// ago. Opacity depends only on the logical slot, so it is kept as a
/// precomputed table instead of being rewritten every tick.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    fade_table: Vec<f32>,
    /// Physical index the next push writes to.
    head: usize,
    filled: usize,
    generation: u64,
}

impl TrailBuffer {
    pub(crate) fn generate<R: Rng>(
        config: &TrailConfig,
        count: usize,
        origin: Vec3,
        generation: u64,
        rng: &mut R,
    ) -> Self {
        let j = config.tint_jitter;
        let colors = (0..count)
            .map(|_| {
                let mut jitter = || rng.gen_range(-j..=j);
                let (dr, dg, db) = (jitter(), jitter(), jitter());
                Color::rgb(
                    (config.color.r + dr).clamp(0.0, 1.0),
                    (config.color.g + dg).clamp(0.0, 1.0),
                    (config.color.b + db).clamp(0.0, 1.0),
                )
            })
            .collect();
        let mut fade_table = Vec::with_capacity(count);
        let mut opacity = 1.0f32;
        for _ in 0..count {
            fade_table.push(opacity);
            opacity = (opacity * config.fade).clamp(0.0, 1.0);
        }
        Self {
            positions: vec![origin; count],
            colors,
            fade_table,
            head: 0,
            filled: 0,
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Physical index the next sample will be written to.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of slots holding a sample since the last reseed.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Record the guide's current position as logical slot 0.
    pub fn push(&mut self, position: Vec3) {
        let n = self.positions.len();
        if n == 0 {
            return;
        }
        self.positions[self.head] = position;
        self.head = (self.head + 1) % n;
        self.filled = (self.filled + 1).min(n);
    }

    #[inline]
    fn physical(&self, slot: usize) -> usize {
        let n = self.positions.len();
        (self.head + n - 1 - slot) % n
    }

    /// Position at logical slot `slot`, or `None` if it has not been written yet.
    pub fn slot(&self, slot: usize) -> Option<Vec3> {
        (slot < self.filled).then(|| self.positions[self.physical(slot)])
    }

    pub fn opacity(&self, slot: usize) -> f32 {
        if slot < self.filled {
            self.fade_table[slot]
        } else {
            0.0
        }
    }

    /// Opacity of every slot in logical order.
    pub fn opacities(&self) -> Vec<f32> {
        (0..self.len()).map(|i| self.opacity(i)).collect()
    }

    /// Positions in logical order; unwritten slots hold the reseed origin.
    pub fn ordered_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(move |i| {
            if i < self.filled {
                self.positions[self.physical(i)]
            } else {
                self.positions[i]
            }
        })
    }

    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.ordered_positions()
            .enumerate()
            .map(|(i, p)| ParticleVertex {
                position: p.to_array(),
                opacity: self.opacity(i),
                color: self.colors[i].to_array(),
                life: 1.0,
                velocity: [0.0; 3],
                _pad: 0.0,
            })
            .collect()
    }
}
