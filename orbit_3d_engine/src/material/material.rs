/// Material trait and the state every material shares.
///
/// A material is a shader plus the routine that uploads its properties.
/// Concrete materials are built from components (see `components`) rather
/// than from a type hierarchy.

use std::rc::Rc;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::Shader;
use super::texture_slots::TextureSlots;

bitflags! {
    /// Per-draw uniforms a material's shader needs from the renderer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFlags: u32 {
        /// `u_ViewPosition` (specular terms)
        const VIEW_DIRECTION = 1 << 0;
        /// `u_NormalMatrix`
        const NORMAL_MATRIX  = 1 << 1;
        /// Light-space matrix and shadow map
        const SHADOW_MAP     = 1 << 2;
    }
}

// ===== MATERIAL =====

pub trait Material {
    fn name(&self) -> &str;

    fn shader(&self) -> &Rc<dyn Shader>;

    fn flags(&self) -> MaterialFlags {
        MaterialFlags::empty()
    }

    fn texture_slots(&self) -> &TextureSlots;

    /// Upload the material's uniforms and bind its textures
    ///
    /// Expects the shader to be bound. Implementations start by resetting
    /// the texture slots.
    fn set_material_properties(&self) -> Result<()>;

    /// Bind the shader, then upload the properties
    fn bind(&self) -> Result<()> {
        self.shader().bind();
        self.set_material_properties()
    }

    fn unbind(&self) {
        self.texture_slots().reset();
        self.shader().unbind();
    }
}

// ===== MATERIAL BASE =====

/// Name, shader, texture slots and flags: the part common to all materials
#[derive(Clone)]
pub struct MaterialBase {
    name: String,
    shader: Rc<dyn Shader>,
    slots: TextureSlots,
    flags: MaterialFlags,
}

impl MaterialBase {
    pub fn new(name: &str, shader: Rc<dyn Shader>, slots: TextureSlots) -> Self {
        Self {
            name: name.to_string(),
            shader,
            slots,
            flags: MaterialFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: MaterialFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shader(&self) -> &Rc<dyn Shader> {
        &self.shader
    }

    pub fn slots(&self) -> &TextureSlots {
        &self.slots
    }

    pub fn flags(&self) -> MaterialFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: MaterialFlags) {
        self.flags = flags;
    }

    /// Base part of `set_material_properties`
    pub fn set_properties(&self) {
        self.slots.reset();
    }
}

impl std::fmt::Debug for MaterialBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialBase")
            .field("name", &self.name)
            .field("shader", &self.shader.name())
            .field("slots", &self.slots)
            .field("flags", &self.flags)
            .finish()
    }
}
