//! Fixed-size particle storage and the emission policies that fill it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::param::Color;

pub mod burst;
pub mod spiral;
pub mod trail;

pub use burst::BurstConfig;
pub use spiral::SpiralConfig;
pub use trail::{TrailBuffer, TrailConfig};

/// Interleaved per-particle layout for vertex buffer uploads.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub opacity: f32,
    pub color: [f32; 3],
    pub life: f32,
    pub velocity: [f32; 3],
    pub _pad: f32,
}

/// Structure-of-arrays particle attributes. The length is fixed at construction.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) colors: Vec<Color>,
    pub(crate) velocities: Vec<Vec3>,
    pub(crate) life: Vec<f32>,
    pub(crate) opacity: Vec<f32>,
    generation: u64,
}

impl ParticleBuffer {
    pub(crate) fn zeroed(count: usize, generation: u64) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count],
            colors: vec![Color::WHITE; count],
            velocities: vec![Vec3::ZERO; count],
            life: vec![1.0; count],
            opacity: vec![1.0; count],
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Incremented on every reseed; lets hosts skip re-uploading unchanged geometry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn life(&self) -> &[f32] {
        &self.life
    }

    pub fn opacity(&self) -> &[f32] {
        &self.opacity
    }

    pub fn vertices(&self) -> Vec<ParticleVertex> {
        (0..self.len())
            .map(|i| ParticleVertex {
                position: self.positions[i].to_array(),
                opacity: self.opacity[i],
                color: self.colors[i].to_array(),
                life: self.life[i],
                velocity: self.velocities[i].to_array(),
                _pad: 0.0,
            })
            .collect()
    }
}

/// Emission policy of a particle demo.
#[derive(Clone, Debug, PartialEq)]
pub enum Emission {
    Spiral(SpiralConfig),
    Burst(BurstConfig),
    Trail(TrailConfig),
}

impl Emission {
    pub fn count(&self) -> usize {
        match self {
            Emission::Spiral(c) => c.count,
            Emission::Burst(c) => c.count,
            Emission::Trail(c) => c.count,
        }
    }
}

/// Request to regenerate a particle buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReseedConfig {
    pub count: usize,
    /// Fixed seed for reproducible draws; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl ReseedConfig {
    pub fn new(count: usize) -> Self {
        Self { count, seed: None }
    }

    pub fn seeded(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed: Some(seed),
        }
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
