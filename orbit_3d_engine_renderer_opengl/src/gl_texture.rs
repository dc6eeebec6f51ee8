/// Texture - OpenGL implementation of the Texture trait

use std::rc::Rc;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Result,
    device::{Texture, TextureSpecification, TextureType},
};
use orbit_3d_engine::{engine_bail, engine_bail_warn, engine_trace};

use crate::gl_format::{self, GlTextureFormat};

/// OpenGL texture object
///
/// The stored specification is fully resolved: format, wrap and filter are
/// always `Some`.
pub struct GlTexture {
    gl: Rc<glow::Context>,
    pub(crate) texture: glow::NativeTexture,
    target: u32,
    spec: TextureSpecification,
}

impl GlTexture {
    pub(crate) fn new(gl: Rc<glow::Context>, spec: TextureSpecification, data: Option<&[u8]>) -> Result<Self> {
        if spec.width == 0 || spec.height == 0 || spec.depth == 0 {
            engine_bail_warn!(
                "orbit3d::opengl",
                "Invalid texture size {}x{}x{}",
                spec.width, spec.height, spec.depth
            );
        }

        let spec = TextureSpecification {
            format: Some(spec.resolved_format()),
            wrap: Some(spec.resolved_wrap()),
            filter: Some(spec.resolved_filter()),
            ..spec
        };
        if let Some(data) = data {
            check_data_size(&spec, data)?;
        }

        let texture = unsafe {
            match gl.create_texture() {
                Ok(texture) => texture,
                Err(message) => engine_bail!("orbit3d::opengl", "glCreateTexture failed: {}", message),
            }
        };
        let texture = Self {
            gl,
            texture,
            target: gl_format::texture_target(spec.texture_type),
            spec,
        };

        texture.bind();
        if spec.texture_type != TextureType::Tex2DMultisample {
            texture.apply_parameters();
        }
        texture.write_image(data);
        texture.unbind();

        engine_trace!(
            "orbit3d::opengl",
            "Created {:?} texture {} ({}x{}, {:?})",
            spec.texture_type, texture.native_id(), spec.width, spec.height, spec.resolved_format()
        );
        Ok(texture)
    }

    fn gl_format(&self) -> GlTextureFormat {
        gl_format::texture_format(self.spec.resolved_format())
    }

    /// Wrap and filter parameters on the bound texture
    fn apply_parameters(&self) {
        let wrap = gl_format::texture_wrap(self.spec.resolved_wrap()) as i32;
        let filter = self.spec.resolved_filter();
        unsafe {
            self.gl.tex_parameter_i32(self.target, glow::TEXTURE_MIN_FILTER, gl_format::min_filter(filter) as i32);
            self.gl.tex_parameter_i32(self.target, glow::TEXTURE_MAG_FILTER, gl_format::mag_filter(filter) as i32);
            self.gl.tex_parameter_i32(self.target, glow::TEXTURE_WRAP_S, wrap);
            if self.spec.texture_type != TextureType::Tex1D {
                self.gl.tex_parameter_i32(self.target, glow::TEXTURE_WRAP_T, wrap);
            }
            if matches!(self.spec.texture_type, TextureType::Tex3D | TextureType::Cube) {
                self.gl.tex_parameter_i32(self.target, glow::TEXTURE_WRAP_R, wrap);
            }
        }
    }

    /// (Re)specify the image of the bound texture; `None` allocates storage only
    fn write_image(&self, data: Option<&[u8]>) {
        let GlTextureFormat { internal_format, format, ty } = self.gl_format();
        let internal_format = internal_format as i32;
        let width = self.spec.width as i32;
        let height = self.spec.height as i32;

        unsafe {
            match self.spec.texture_type {
                TextureType::Tex1D => {
                    self.gl.tex_image_1d(self.target, 0, internal_format, width, 0, format, ty, data);
                }
                TextureType::Tex2D => {
                    self.gl.tex_image_2d(self.target, 0, internal_format, width, height, 0, format, ty, data);
                }
                TextureType::Tex3D => {
                    let depth = self.spec.depth as i32;
                    self.gl.tex_image_3d(self.target, 0, internal_format, width, height, depth, 0, format, ty, data);
                }
                TextureType::Cube => {
                    // Faces are laid out +X, -X, +Y, -Y, +Z, -Z
                    let face_size = self.spec.byte_size() / 6;
                    for face in 0..6 {
                        let pixels = data.map(|data| &data[face * face_size..(face + 1) * face_size]);
                        self.gl.tex_image_2d(
                            glow::TEXTURE_CUBE_MAP_POSITIVE_X + face as u32,
                            0,
                            internal_format,
                            width,
                            height,
                            0,
                            format,
                            ty,
                            pixels,
                        );
                    }
                }
                TextureType::Tex2DMultisample => {
                    self.gl.tex_image_2d_multisample(
                        self.target,
                        self.spec.samples.max(1) as i32,
                        internal_format,
                        width,
                        height,
                        true,
                    );
                }
            }

            if data.is_some() && self.spec.generate_mipmaps {
                self.gl.generate_mipmap(self.target);
            }
        }
    }
}

fn check_data_size(spec: &TextureSpecification, data: &[u8]) -> Result<()> {
    if spec.texture_type == TextureType::Tex2DMultisample {
        engine_bail_warn!("orbit3d::opengl", "Multisample textures cannot receive pixel data");
    }
    if data.len() != spec.byte_size() {
        engine_bail_warn!(
            "orbit3d::opengl",
            "Texture data is {} bytes, expected {}",
            data.len(), spec.byte_size()
        );
    }
    Ok(())
}

impl Texture for GlTexture {
    fn specification(&self) -> &TextureSpecification {
        &self.spec
    }

    fn bind(&self) {
        unsafe {
            self.gl.bind_texture(self.target, Some(self.texture));
        }
    }

    fn bind_to_unit(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(self.target, Some(self.texture));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_texture(self.target, None);
        }
    }

    fn upload(&self, data: &[u8]) -> Result<()> {
        check_data_size(&self.spec, data)?;
        self.bind();
        self.write_image(Some(data));
        self.unbind();
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.texture.0.get()
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}
