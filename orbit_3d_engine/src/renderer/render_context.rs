/// Registries owned by the renderer: shaders, materials, white textures

use crate::material::MaterialLibrary;
use crate::resource::{ShaderLibrary, WhiteTextures};

#[derive(Default)]
pub struct RenderContext {
    pub shader_library: ShaderLibrary,
    pub material_library: MaterialLibrary,
    pub white_textures: WhiteTextures,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }
}
