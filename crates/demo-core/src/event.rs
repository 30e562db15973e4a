use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::param::ParamName;

/// What produced an impulse.
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    /// Pointer click that hit the rendered object.
    Hit,
    /// Pointer click that missed everything.
    Miss,
    /// Key press, by key code.
    Key(String),
}

/// Parameters an impulse is allowed to perturb.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Targets {
    #[default]
    All,
    Only(SmallVec<[ParamName; 4]>),
}

impl Targets {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ParamName>,
    {
        Targets::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Targets::All => true,
            Targets::Only(names) => names.iter().any(|n| n == name),
        }
    }
}

/// A discrete occurrence consumed by the controller on the next due tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpulseEvent {
    /// Scene time the event happened at.
    pub time: f32,
    /// Intersection point for pointer hits.
    pub point: Option<Vec3>,
    pub trigger: Trigger,
    pub targets: Targets,
}

impl ImpulseEvent {
    pub fn hit(time: f32, point: Vec3) -> Self {
        Self {
            time,
            point: Some(point),
            trigger: Trigger::Hit,
            targets: Targets::All,
        }
    }

    pub fn miss(time: f32) -> Self {
        Self {
            time,
            point: None,
            trigger: Trigger::Miss,
            targets: Targets::All,
        }
    }

    pub fn key(time: f32, code: impl Into<String>) -> Self {
        Self {
            time,
            point: None,
            trigger: Trigger::Key(code.into()),
            targets: Targets::All,
        }
    }

    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    /// Pointer clicks, hit or miss.
    #[inline]
    pub fn is_pointer(&self) -> bool {
        matches!(self.trigger, Trigger::Hit | Trigger::Miss)
    }

    /// Whether this impulse arms decaying parameters. Misses only clear state.
    #[inline]
    pub fn arms(&self) -> bool {
        !matches!(self.trigger, Trigger::Miss)
    }
}

/// Raw input forwarded by the rendering host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Viewport size in device pixels.
    Resize { width: u32, height: u32 },
    /// Result of the host's raycast; `None` when nothing was hit.
    Click { hit: Option<Vec3> },
    Key(String),
}

impl InputEvent {
    pub fn resolution(width: u32, height: u32) -> Vec2 {
        Vec2::new(width as f32, height as f32)
    }
}
