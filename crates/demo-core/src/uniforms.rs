use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use crate::param::{Color, ParamName, Value};

/// Ordered name → value table published to the render step once per tick.
///
/// Order follows declaration order so hosts can bind uniforms positionally.
#[derive(Clone, Debug, Default)]
pub struct Uniforms {
    names: Vec<ParamName>,
    values: Vec<Value>,
    index: FnvHashMap<ParamName, usize>,
}

impl Uniforms {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            names: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
            index: FnvHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Returns `false` if the name is already present.
    pub(crate) fn push(&mut self, name: ParamName, value: Value) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.names.len());
        self.names.push(name);
        self.values.push(value);
        true
    }

    #[inline]
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub(crate) fn set_at(&mut self, i: usize, value: Value) {
        self.values[i] = value;
    }

    #[inline]
    pub(crate) fn name_at(&self, i: usize) -> &str {
        &self.names[i]
    }

    #[inline]
    pub(crate) fn value_at(&self, i: usize) -> Value {
        self.values[i]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.index_of(name).map(|i| self.values[i])
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|v| v.as_scalar())
    }

    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        self.get(name).and_then(|v| v.as_vec2())
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        self.get(name).and_then(|v| v.as_vec3())
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(|v| v.as_color())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
