/// Shader source splitting and the shader library
///
/// A shader file holds every stage, each introduced by a marker line:
///
/// ```text
/// #type vertex
/// ...
/// #type fragment
/// ...
/// ```
///
/// `#shader` is accepted in place of `#type`, and `pixel` in place of
/// `fragment`.

use std::path::Path;
use std::rc::Rc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Shader, ShaderDesc, ShaderSources, ShaderStage};

// ===== SOURCE PARSING =====

fn stage_of_marker(line: &str) -> Option<Option<ShaderStage>> {
    let trimmed = line.trim_start();
    if !(trimmed.starts_with("#type") || trimmed.starts_with("#shader")) {
        return None;
    }
    let stage = if trimmed.contains("vertex") {
        Some(ShaderStage::Vertex)
    } else if trimmed.contains("fragment") || trimmed.contains("pixel") {
        Some(ShaderStage::Fragment)
    } else if trimmed.contains("geometry") {
        Some(ShaderStage::Geometry)
    } else {
        None
    };
    Some(stage)
}

/// Split a multi-stage source into per-stage sources
///
/// # Errors
///
/// `InvalidResource` when a marker names an unknown stage, or the vertex or
/// fragment stage is missing.
pub fn parse_shader_source(name: &str, source: &str) -> Result<ShaderSources> {
    let mut stages: FxHashMap<ShaderStage, String> = FxHashMap::default();
    let mut current: Option<ShaderStage> = None;

    for (line_number, line) in source.lines().enumerate() {
        match stage_of_marker(line) {
            Some(Some(stage)) => {
                current = Some(stage);
                stages.entry(stage).or_default();
            }
            Some(None) => crate::engine_bail!(
                "orbit3d::Shader",
                InvalidResource => "Shader '{}' line {}: unknown stage in '{}'",
                name, line_number + 1, line.trim()
            ),
            None => {
                if let Some(stage) = current {
                    let text = stages.entry(stage).or_default();
                    text.push_str(line);
                    text.push('\n');
                }
            }
        }
    }

    let vertex = stages.remove(&ShaderStage::Vertex);
    let fragment = stages.remove(&ShaderStage::Fragment);
    match (vertex, fragment) {
        (Some(vertex), Some(fragment)) => Ok(ShaderSources {
            vertex,
            fragment,
            geometry: stages.remove(&ShaderStage::Geometry),
        }),
        (vertex, _) => crate::engine_bail!(
            "orbit3d::Shader",
            InvalidResource => "Shader '{}' has no {} stage",
            name, if vertex.is_none() { "vertex" } else { "fragment" }
        ),
    }
}

// ===== SHADER LIBRARY =====

/// Name -> shader registry
///
/// Adding a name twice or getting a name never added is a programming error
/// and aborts; use `exists`/`try_get` when unsure.
#[derive(Default)]
pub struct ShaderLibrary {
    shaders: FxHashMap<String, Rc<dyn Shader>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shader under its own name
    pub fn add(&mut self, shader: Rc<dyn Shader>) {
        let name = shader.name().to_string();
        self.add_named(&name, shader);
    }

    /// Register a shader under `name`
    pub fn add_named(&mut self, name: &str, shader: Rc<dyn Shader>) {
        if self.exists(name) {
            crate::engine_fatal!("orbit3d::ShaderLibrary", "Shader '{}' already exists", name);
        }
        self.shaders.insert(name.to_string(), shader);
    }

    pub fn get(&self, name: &str) -> Rc<dyn Shader> {
        match self.shaders.get(name) {
            Some(shader) => shader.clone(),
            None => crate::engine_fatal!("orbit3d::ShaderLibrary", "Shader '{}' not found", name),
        }
    }

    pub fn try_get(&self, name: &str) -> Option<Rc<dyn Shader>> {
        self.shaders.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.shaders.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shaders.keys().map(String::as_str)
    }

    /// Load a shader file, or return the one already registered
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics device
    /// * `name` - Library name, the file stem when None
    /// * `path` - Multi-stage shader file
    pub fn load(
        &mut self,
        device: &dyn GraphicsDevice,
        name: Option<&str>,
        path: impl AsRef<Path>,
    ) -> Result<Rc<dyn Shader>> {
        let path = path.as_ref();
        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string(),
        };

        if let Some(shader) = self.try_get(&name) {
            return Ok(shader);
        }

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => crate::engine_bail!(
                "orbit3d::ShaderLibrary",
                Io => "Failed to read shader '{}': {}",
                path.display(), error
            ),
        };
        self.load_source(device, &name, &source)
    }

    /// Compile an in-memory multi-stage source and register it
    pub fn load_source(
        &mut self,
        device: &dyn GraphicsDevice,
        name: &str,
        source: &str,
    ) -> Result<Rc<dyn Shader>> {
        if let Some(shader) = self.try_get(name) {
            return Ok(shader);
        }

        let sources = parse_shader_source(name, source)?;
        let shader = device.create_shader(ShaderDesc { name: name.to_string(), sources })?;
        self.add_named(name, shader.clone());

        crate::engine_info!(
            "orbit3d::ShaderLibrary",
            "Loaded shader '{}'{}",
            name, if shader.is_valid() { "" } else { " (invalid)" }
        );
        Ok(shader)
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
