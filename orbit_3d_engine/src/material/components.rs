/// Reusable material parts: a flat color and a sampled texture.
///
/// Concrete materials hold the components they need and call their
/// `set_properties` in a fixed order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{Shader, Texture};
use crate::uniforms;
use super::texture_slots::TextureSlots;

// ===== FLAT COLOR =====

#[derive(Debug, Clone)]
pub struct FlatColor {
    color: Cell<Vec4>,
}

impl FlatColor {
    pub fn new(color: Vec4) -> Self {
        Self { color: Cell::new(color) }
    }

    pub fn color(&self) -> Vec4 {
        self.color.get()
    }

    pub fn set_color(&self, color: Vec4) {
        self.color.set(color);
    }

    /// Upload `u_Material.Color`
    ///
    /// Same signature as `FlatTexture::set_properties`; no texture slot is taken.
    pub fn set_properties(&self, shader: &dyn Shader, _slots: &TextureSlots) -> Result<()> {
        shader.set_float4(uniforms::MATERIAL_COLOR, self.color.get()).ok();
        Ok(())
    }
}

// ===== FLAT TEXTURE =====

pub struct FlatTexture {
    texture: RefCell<Rc<dyn Texture>>,
    tiling_factor: Cell<f32>,
}

impl FlatTexture {
    pub fn new(texture: Rc<dyn Texture>) -> Self {
        Self {
            texture: RefCell::new(texture),
            tiling_factor: Cell::new(1.0),
        }
    }

    pub fn texture(&self) -> Rc<dyn Texture> {
        Rc::clone(&self.texture.borrow())
    }

    pub fn set_texture(&self, texture: Rc<dyn Texture>) {
        *self.texture.borrow_mut() = texture;
    }

    pub fn tiling_factor(&self) -> f32 {
        self.tiling_factor.get()
    }

    pub fn set_tiling_factor(&self, factor: f32) {
        self.tiling_factor.set(factor);
    }

    /// Bind the texture to the next slot and point `u_Material.Texture` at it
    ///
    /// The tiling factor is only uploaded to shaders that declare it.
    ///
    /// # Errors
    ///
    /// Fails when no texture unit is left.
    pub fn set_properties(&self, shader: &dyn Shader, slots: &TextureSlots) -> Result<()> {
        let slot = slots.acquire()?;
        self.texture.borrow().bind_to_unit(slot);
        shader.set_int(uniforms::MATERIAL_TEXTURE, slot as i32).ok();
        if shader.has_uniform(uniforms::MATERIAL_TILING_FACTOR) {
            shader.set_float(uniforms::MATERIAL_TILING_FACTOR, self.tiling_factor.get()).ok();
        }
        Ok(())
    }
}

impl std::fmt::Debug for FlatTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatTexture")
            .field("texture", &self.texture.borrow().native_id())
            .field("tiling_factor", &self.tiling_factor.get())
            .finish()
    }
}
