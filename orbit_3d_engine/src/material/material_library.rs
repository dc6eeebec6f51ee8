/// Name -> material registry, same contract as `ShaderLibrary`

use std::rc::Rc;
use rustc_hash::FxHashMap;
use super::material::Material;

#[derive(Default)]
pub struct MaterialLibrary {
    materials: FxHashMap<String, Rc<dyn Material>>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material under its own name
    pub fn add(&mut self, material: Rc<dyn Material>) {
        let name = material.name().to_string();
        self.add_named(&name, material);
    }

    pub fn add_named(&mut self, name: &str, material: Rc<dyn Material>) {
        if self.exists(name) {
            crate::engine_fatal!("orbit3d::MaterialLibrary", "Material '{}' already exists", name);
        }
        self.materials.insert(name.to_string(), material);
    }

    pub fn get(&self, name: &str) -> Rc<dyn Material> {
        match self.materials.get(name) {
            Some(material) => material.clone(),
            None => crate::engine_fatal!("orbit3d::MaterialLibrary", "Material '{}' not found", name),
        }
    }

    pub fn try_get(&self, name: &str) -> Option<Rc<dyn Material>> {
        self.materials.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Unregister `name`, returning the material if it was present
    pub fn remove(&mut self, name: &str) -> Option<Rc<dyn Material>> {
        self.materials.remove(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "material_library_tests.rs"]
mod tests;
