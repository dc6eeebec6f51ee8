/// Concrete materials
///
/// - `SimpleColorMaterial`: flat color
/// - `SimpleTextureMaterial`: one texture
/// - `LightedMaterial`: optional color and texture, a shared light and an
///   optional shadow map

use std::cell::RefCell;
use std::rc::Rc;
use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{Shader, Texture};
use crate::light::Light;
use crate::uniforms;
use super::components::{FlatColor, FlatTexture};
use super::material::{Material, MaterialBase, MaterialFlags};
use super::texture_slots::TextureSlots;

// ===== SIMPLE COLOR =====

#[derive(Debug)]
pub struct SimpleColorMaterial {
    base: MaterialBase,
    color: FlatColor,
}

impl SimpleColorMaterial {
    pub fn new(name: &str, shader: Rc<dyn Shader>, slots: TextureSlots, color: Vec4) -> Self {
        Self {
            base: MaterialBase::new(name, shader, slots),
            color: FlatColor::new(color),
        }
    }

    pub fn color(&self) -> &FlatColor {
        &self.color
    }
}

impl Material for SimpleColorMaterial {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn shader(&self) -> &Rc<dyn Shader> {
        self.base.shader()
    }

    fn flags(&self) -> MaterialFlags {
        self.base.flags()
    }

    fn texture_slots(&self) -> &TextureSlots {
        self.base.slots()
    }

    fn set_material_properties(&self) -> Result<()> {
        self.base.set_properties();
        self.color.set_properties(self.base.shader().as_ref(), self.base.slots())
    }
}

// ===== SIMPLE TEXTURE =====

#[derive(Debug)]
pub struct SimpleTextureMaterial {
    base: MaterialBase,
    texture: FlatTexture,
}

impl SimpleTextureMaterial {
    pub fn new(name: &str, shader: Rc<dyn Shader>, slots: TextureSlots, texture: Rc<dyn Texture>) -> Self {
        Self {
            base: MaterialBase::new(name, shader, slots),
            texture: FlatTexture::new(texture),
        }
    }

    pub fn texture(&self) -> &FlatTexture {
        &self.texture
    }
}

impl Material for SimpleTextureMaterial {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn shader(&self) -> &Rc<dyn Shader> {
        self.base.shader()
    }

    fn flags(&self) -> MaterialFlags {
        self.base.flags()
    }

    fn texture_slots(&self) -> &TextureSlots {
        self.base.slots()
    }

    fn set_material_properties(&self) -> Result<()> {
        self.base.set_properties();
        self.texture.set_properties(self.base.shader().as_ref(), self.base.slots())
    }
}

// ===== LIGHTED =====

/// Material lit by one shared light
///
/// Always requests the view position and normal matrix; requests the
/// light-space matrix too once a shadow map is attached.
pub struct LightedMaterial {
    base: MaterialBase,
    color: Option<FlatColor>,
    texture: Option<FlatTexture>,
    light: Rc<RefCell<Light>>,
    shadow_map: Option<Rc<dyn Texture>>,
}

impl LightedMaterial {
    pub fn new(name: &str, shader: Rc<dyn Shader>, slots: TextureSlots, light: Rc<RefCell<Light>>) -> Self {
        Self {
            base: MaterialBase::new(name, shader, slots)
                .with_flags(MaterialFlags::VIEW_DIRECTION | MaterialFlags::NORMAL_MATRIX),
            color: None,
            texture: None,
            light,
            shadow_map: None,
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = Some(FlatColor::new(color));
        self
    }

    pub fn with_texture(mut self, texture: Rc<dyn Texture>) -> Self {
        self.texture = Some(FlatTexture::new(texture));
        self
    }

    pub fn with_shadow_map(mut self, shadow_map: Rc<dyn Texture>) -> Self {
        self.set_shadow_map(Some(shadow_map));
        self
    }

    pub fn color(&self) -> Option<&FlatColor> {
        self.color.as_ref()
    }

    pub fn texture(&self) -> Option<&FlatTexture> {
        self.texture.as_ref()
    }

    pub fn light(&self) -> &Rc<RefCell<Light>> {
        &self.light
    }

    pub fn set_light(&mut self, light: Rc<RefCell<Light>>) {
        self.light = light;
    }

    pub fn shadow_map(&self) -> Option<&Rc<dyn Texture>> {
        self.shadow_map.as_ref()
    }

    pub fn set_shadow_map(&mut self, shadow_map: Option<Rc<dyn Texture>>) {
        let mut flags = self.base.flags();
        flags.set(MaterialFlags::SHADOW_MAP, shadow_map.is_some());
        self.base.set_flags(flags);
        self.shadow_map = shadow_map;
    }
}

impl Material for LightedMaterial {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn shader(&self) -> &Rc<dyn Shader> {
        self.base.shader()
    }

    fn flags(&self) -> MaterialFlags {
        self.base.flags()
    }

    fn texture_slots(&self) -> &TextureSlots {
        self.base.slots()
    }

    fn set_material_properties(&self) -> Result<()> {
        let shader = self.base.shader().as_ref();
        let slots = self.base.slots();

        self.base.set_properties();
        if let Some(color) = &self.color {
            color.set_properties(shader, slots)?;
        }
        if let Some(texture) = &self.texture {
            texture.set_properties(shader, slots)?;
        }
        self.light.borrow().define_light_properties(shader, self.base.flags());
        if let Some(shadow_map) = &self.shadow_map {
            let slot = slots.acquire()?;
            shadow_map.bind_to_unit(slot);
            shader.set_int(uniforms::SHADOW_MAP, slot as i32).ok();
        }
        Ok(())
    }
}

impl std::fmt::Debug for LightedMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightedMaterial")
            .field("base", &self.base)
            .field("color", &self.color)
            .field("texture", &self.texture)
            .field("light", &self.light)
            .field("shadow_map", &self.shadow_map.as_ref().map(|texture| texture.native_id()))
            .finish()
    }
}

#[cfg(test)]
#[path = "materials_tests.rs"]
mod tests;
