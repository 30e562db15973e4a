use thiserror::Error;

use crate::param::ValueKind;

/// Configuration mistakes reported synchronously to the caller.
///
/// None of these leave the controller in a modified state: validation runs
/// before anything is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("parameter `{0}` declared twice")]
    DuplicateParam(String),
    #[error("parameter `{name}` holds a {expected:?}, got a {got:?}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        got: ValueKind,
    },
    #[error("parameter `{0}` received a non-finite value")]
    NonFinite(String),
    #[error("parameter `{name}` value {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("demo `{0}` has no particle buffer")]
    NoParticles(String),
    #[error("particle count must be positive")]
    EmptyParticleBuffer,
    #[error("parameter `{name}`: {reason}")]
    InvalidRule { name: String, reason: &'static str },
    #[error("trail guide `{0}` is missing or not a 3-vector")]
    MissingGuide(String),
}
