//! Parameter values and their declarations.
//!
//! A parameter is identified by its name (the uniform name the shader sees).
//! Its declaration carries the initial value, the rule that advances it and,
//! for panel-tunable parameters, the slider range.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::rule::Rule;

pub type ParamName = String;

/// Linear RGB colour in the 0..1 range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value, the way colour pickers report it.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

/// Semantic type of a parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Vec2,
    Vec3,
    Color,
}

/// Current value of a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Scalar(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Color(Color),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Color(_) => ValueKind::Color,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    /// Flat float components, in shader order.
    pub fn components(&self) -> SmallVec<[f32; 3]> {
        match *self {
            Value::Scalar(v) => SmallVec::from_slice(&[v]),
            Value::Vec2(v) => SmallVec::from_slice(&v.to_array()),
            Value::Vec3(v) => SmallVec::from_slice(&v.to_array()),
            Value::Color(c) => SmallVec::from_slice(&c.to_array()),
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match *self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            Value::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            Value::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

/// Slider range offered to the control panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl PanelRange {
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Declaration of one parameter in a demo table.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: ParamName,
    pub initial: Value,
    pub rule: Rule,
    pub range: Option<PanelRange>,
}

impl ParamSpec {
    pub fn new(name: impl Into<ParamName>, initial: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
            rule: Rule::Static,
            range: None,
        }
    }

    pub fn scalar(name: impl Into<ParamName>, initial: f32) -> Self {
        Self::new(name, Value::Scalar(initial))
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn range(mut self, min: f32, max: f32, step: f32) -> Self {
        self.range = Some(PanelRange { min, max, step });
        self
    }

    /// Colours and ranged scalars show up on the control panel.
    pub fn is_panel_visible(&self) -> bool {
        self.range.is_some() || matches!(self.initial, Value::Color(_))
    }
}

/// One row of the control panel: current value plus slider metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelEntry {
    pub name: ParamName,
    pub value: Value,
    pub range: Option<PanelRange>,
}

impl PanelEntry {
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}
