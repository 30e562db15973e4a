//! Declarative description of one demo: its parameter table and particle policy.

use crate::particles::Emission;
use crate::param::ParamSpec;
use crate::rule::Rule;

/// Which update path a controller runs each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Only time-driven and static parameters.
    Oscillating,
    /// At least one click-armed decaying parameter.
    Decaying,
    ParticleTrail,
    ParticleBurst,
    ParticleSpiral,
}

impl Mode {
    pub fn is_particle(self) -> bool {
        matches!(
            self,
            Mode::ParticleTrail | Mode::ParticleBurst | Mode::ParticleSpiral
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Oscillating => "oscillating",
            Mode::Decaying => "decaying",
            Mode::ParticleTrail => "particle-trail",
            Mode::ParticleBurst => "particle-burst",
            Mode::ParticleSpiral => "particle-spiral",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DemoSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub emission: Option<Emission>,
    /// Key code that regenerates the particle buffer.
    pub reseed_key: Option<String>,
    /// Seed for the controller's random source; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl DemoSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            emission: None,
            reseed_key: None,
            seed: None,
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn emission(mut self, emission: Emission) -> Self {
        self.emission = Some(emission);
        self
    }

    pub fn reseed_key(mut self, key: impl Into<String>) -> Self {
        self.reseed_key = Some(key.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(&self) -> Mode {
        match &self.emission {
            Some(Emission::Spiral(_)) => Mode::ParticleSpiral,
            Some(Emission::Burst(_)) => Mode::ParticleBurst,
            Some(Emission::Trail(_)) => Mode::ParticleTrail,
            None if self.params.iter().any(|p| matches!(p.rule, Rule::Decay(_))) => {
                Mode::Decaying
            }
            None => Mode::Oscillating,
        }
    }
}
