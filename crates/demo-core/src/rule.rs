//! Update rules: how each parameter advances from one tick to the next.

use glam::Vec3;

use crate::constants::{DECAY_FLOOR, DECAY_PEAK, DECAY_RATE};
use crate::error::ConfigError;
use crate::param::ValueKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

/// `base + amplitude * wave(frequency * t + phase)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub wave: Wave,
}

impl Oscillator {
    pub const fn sin(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: 0.0,
            wave: Wave::Sin,
        }
    }

    pub const fn cos(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: 0.0,
            wave: Wave::Cos,
        }
    }

    /// An axis that never moves.
    pub const fn constant(value: f32) -> Self {
        Self::sin(value, 0.0, 0.0)
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    #[inline]
    pub fn eval(&self, t: f32) -> f32 {
        let x = self.frequency * t + self.phase;
        let w = match self.wave {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        };
        self.base + self.amplitude * w
    }

    /// Closed interval every `eval` result falls in.
    pub fn bounds(&self) -> (f32, f32) {
        let a = self.amplitude.abs();
        (self.base - a, self.base + a)
    }

    fn is_finite(&self) -> bool {
        self.base.is_finite()
            && self.amplitude.is_finite()
            && self.frequency.is_finite()
            && self.phase.is_finite()
    }
}

/// Vector whose components oscillate independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub axes: [Oscillator; 3],
    /// Re-normalise to unit length every tick (light directions).
    pub normalize: bool,
}

impl Orbit {
    pub const fn direction(x: Oscillator, y: Oscillator, z: Oscillator) -> Self {
        Self {
            axes: [x, y, z],
            normalize: true,
        }
    }

    pub const fn path(x: Oscillator, y: Oscillator, z: Oscillator) -> Self {
        Self {
            axes: [x, y, z],
            normalize: false,
        }
    }

    /// Unit vector circling the Y axis in the X-Z plane.
    pub const fn unit_xz(frequency: f32) -> Self {
        Self::direction(
            Oscillator::cos(0.0, 1.0, frequency),
            Oscillator::constant(0.0),
            Oscillator::sin(0.0, 1.0, frequency),
        )
    }

    /// A degenerate (zero-length) direction keeps `previous`.
    pub fn eval(&self, t: f32, previous: Vec3) -> Vec3 {
        let v = Vec3::new(
            self.axes[0].eval(t),
            self.axes[1].eval(t),
            self.axes[2].eval(t),
        );
        if self.normalize {
            v.try_normalize().unwrap_or(previous)
        } else {
            v
        }
    }
}

/// How the decay rate relates to wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecayClock {
    /// `rate` applies once per tick, so the visible speed follows the refresh rate.
    PerTick,
    /// `rate` is the per-tick rate at `reference_hz`; other frame durations are rescaled.
    PerSecond { reference_hz: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayConfig {
    pub rate: f32,
    pub floor: f32,
    pub peak: f32,
    pub clock: DecayClock,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rate: DECAY_RATE,
            floor: DECAY_FLOOR,
            peak: DECAY_PEAK,
            clock: DecayClock::PerTick,
        }
    }
}

impl DecayConfig {
    pub fn per_second(reference_hz: f32) -> Self {
        Self {
            clock: DecayClock::PerSecond { reference_hz },
            ..Self::default()
        }
    }

    /// One relaxation step. Values at or below the floor snap to exactly zero.
    #[inline]
    pub fn step(&self, v: f32, dt: f32) -> f32 {
        if v <= self.floor {
            return 0.0;
        }
        match self.clock {
            DecayClock::PerTick => v - self.rate * v,
            DecayClock::PerSecond { reference_hz } => {
                v * (1.0 - self.rate).powf(dt.max(0.0) * reference_hz)
            }
        }
    }
}

/// Per-parameter update rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Initial value until the panel overrides it.
    Static,
    /// Elapsed scene time.
    Clock,
    Oscillate(Oscillator),
    Orbit(Orbit),
    /// Seconds since the particle buffer was last reseeded.
    SinceReseed,
    Decay(DecayConfig),
    /// Elapsed scene time shifted by a fixed offset.
    ClockOffset { offset: f32 },
    /// Time of the last pointer hit, reset by a miss.
    ImpulseTime,
    /// Point of the last pointer hit.
    ImpulsePoint,
    /// Viewport size in device pixels.
    Resolution,
    TrailHead,
    TrailLength,
}

impl Rule {
    /// Driven rules are pure functions of time; the rest carry state between ticks.
    pub fn is_driven(&self) -> bool {
        matches!(
            self,
            Rule::Clock
                | Rule::ClockOffset { .. }
                | Rule::Oscillate(_)
                | Rule::Orbit(_)
                | Rule::SinceReseed
        )
    }

    /// Value kind the rule produces, when it is fixed.
    pub fn produces(&self) -> Option<ValueKind> {
        match self {
            Rule::Static => None,
            Rule::Clock
            | Rule::Oscillate(_)
            | Rule::SinceReseed
            | Rule::Decay(_)
            | Rule::ClockOffset { .. }
            | Rule::ImpulseTime
            | Rule::TrailHead
            | Rule::TrailLength => Some(ValueKind::Scalar),
            Rule::Orbit(_) | Rule::ImpulsePoint => Some(ValueKind::Vec3),
            Rule::Resolution => Some(ValueKind::Vec2),
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason| {
            Err(ConfigError::InvalidRule {
                name: name.to_string(),
                reason,
            })
        };
        match self {
            Rule::Oscillate(o) if !o.is_finite() => invalid("oscillator terms must be finite"),
            Rule::Orbit(o) if !o.axes.iter().all(Oscillator::is_finite) => {
                invalid("orbit terms must be finite")
            }
            Rule::Decay(d) if !(d.rate > 0.0 && d.rate < 1.0) => {
                invalid("decay rate must lie strictly between 0 and 1")
            }
            Rule::Decay(d) if !(d.floor >= 0.0 && d.floor < d.peak) => {
                invalid("decay floor must be non-negative and below the peak")
            }
            Rule::Decay(DecayConfig {
                clock: DecayClock::PerSecond { reference_hz },
                ..
            }) if !(*reference_hz > 0.0) => invalid("decay reference rate must be positive"),
            Rule::ClockOffset { offset } if !offset.is_finite() => {
                invalid("clock offset must be finite")
            }
            _ => Ok(()),
        }
    }
}
