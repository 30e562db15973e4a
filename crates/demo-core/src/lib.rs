pub mod clock;
pub mod constants;
pub mod controller;
pub mod demo;
pub mod error;
pub mod event;
pub mod param;
pub mod particles;
pub mod presets;
pub mod rule;
pub mod showcase;
pub mod uniforms;

pub use clock::*;
pub use constants::*;
pub use controller::*;
pub use demo::*;
pub use error::*;
pub use event::*;
pub use param::*;
pub use particles::{
    BurstConfig, Emission, ParticleBuffer, ParticleVertex, ReseedConfig, SpiralConfig,
    TrailBuffer, TrailConfig,
};
pub use presets::{preset, PRESET_NAMES};
pub use rule::*;
pub use showcase::*;
pub use uniforms::*;
