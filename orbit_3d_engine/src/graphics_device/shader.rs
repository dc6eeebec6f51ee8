/// Shader trait, shader descriptor and the uniform location cache

use std::cell::{Cell, RefCell};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use crate::error::Result;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

/// Per-stage GLSL sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

impl ShaderSources {
    /// Iterate `(stage, source)` pairs in link order
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        [
            Some((ShaderStage::Vertex, self.vertex.as_str())),
            self.geometry.as_deref().map(|source| (ShaderStage::Geometry, source)),
            Some((ShaderStage::Fragment, self.fragment.as_str())),
        ]
        .into_iter()
        .flatten()
    }
}

/// Descriptor for creating a shader program
#[derive(Debug, Clone)]
pub struct ShaderDesc {
    /// Library name (file stem by default)
    pub name: String,
    pub sources: ShaderSources,
}

/// Value uploaded to a uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IntArray(Vec<i32>),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Shader program trait
///
/// Implemented by backend-specific shader types (e.g., GlShader). The program
/// is deleted when dropped. Shaders are shared through `Rc` and never cloned.
pub trait Shader {
    fn name(&self) -> &str;

    /// False when compilation or linking failed
    fn is_valid(&self) -> bool;

    fn bind(&self);

    fn unbind(&self);

    /// Whether the linked program exposes `name` (fills the location cache)
    fn has_uniform(&self, name: &str) -> bool;

    /// Upload a uniform on the bound program
    ///
    /// # Errors
    ///
    /// `UniformNotFound` (logged as a warning) when the program has no such
    /// uniform. Never fatal.
    fn set_uniform(&self, name: &str, value: UniformValue) -> Result<()>;

    fn set_int(&self, name: &str, value: i32) -> Result<()> {
        self.set_uniform(name, UniformValue::Int(value))
    }

    fn set_int_array(&self, name: &str, values: &[i32]) -> Result<()> {
        self.set_uniform(name, UniformValue::IntArray(values.to_vec()))
    }

    fn set_float(&self, name: &str, value: f32) -> Result<()> {
        self.set_uniform(name, UniformValue::Float(value))
    }

    fn set_float2(&self, name: &str, value: Vec2) -> Result<()> {
        self.set_uniform(name, UniformValue::Vec2(value))
    }

    fn set_float3(&self, name: &str, value: Vec3) -> Result<()> {
        self.set_uniform(name, UniformValue::Vec3(value))
    }

    fn set_float4(&self, name: &str, value: Vec4) -> Result<()> {
        self.set_uniform(name, UniformValue::Vec4(value))
    }

    fn set_mat3(&self, name: &str, value: &Mat3) -> Result<()> {
        self.set_uniform(name, UniformValue::Mat3(*value))
    }

    fn set_mat4(&self, name: &str, value: &Mat4) -> Result<()> {
        self.set_uniform(name, UniformValue::Mat4(*value))
    }
}

// ===== UNIFORM LOCATION CACHE =====

/// Lazily filled uniform name -> location cache
///
/// Negative lookups are cached too, so a missing uniform is queried from the
/// backend once per program.
#[derive(Debug)]
pub struct UniformCache<L: Clone> {
    locations: RefCell<FxHashMap<String, Option<L>>>,
    queries: Cell<u32>,
}

impl<L: Clone> Default for UniformCache<L> {
    fn default() -> Self {
        Self {
            locations: RefCell::new(FxHashMap::default()),
            queries: Cell::new(0),
        }
    }
}

impl<L: Clone> UniformCache<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached location of `name`, calling `query` on first use only
    pub fn location(&self, name: &str, query: impl FnOnce(&str) -> Option<L>) -> Option<L> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return cached.clone();
        }
        self.queries.set(self.queries.get() + 1);
        let location = query(name);
        self.locations.borrow_mut().insert(name.to_string(), location.clone());
        location
    }

    /// Number of backend queries issued so far
    pub fn query_count(&self) -> u32 {
        self.queries.get()
    }

    pub fn len(&self) -> usize {
        self.locations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.borrow().is_empty()
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
