/// Framebuffer - OpenGL implementation of the Framebuffer trait

use std::num::NonZeroU32;
use std::rc::Rc;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Result,
    device::{self, BlitMask, Framebuffer, FramebufferSpecification, FramebufferTextureFormat},
};
use orbit_3d_engine::{engine_bail, engine_bail_warn, engine_trace};

use crate::gl_format;

/// OpenGL framebuffer object with owned attachment textures
///
/// A `swap_chain_target` specification creates no GL object: binding it
/// selects the default framebuffer.
pub struct GlFramebuffer {
    gl: Rc<glow::Context>,
    spec: FramebufferSpecification,
    max_size: u32,
    framebuffer: Option<glow::NativeFramebuffer>,
    color_formats: Vec<FramebufferTextureFormat>,
    color_attachments: Vec<glow::NativeTexture>,
    depth_attachment: Option<glow::NativeTexture>,
}

impl GlFramebuffer {
    pub(crate) fn new(gl: Rc<glow::Context>, spec: FramebufferSpecification, max_size: u32) -> Result<Self> {
        device::validate_framebuffer_size(spec.width, spec.height, max_size)?;

        let mut framebuffer = Self {
            gl,
            color_formats: spec.color_attachments().collect(),
            spec,
            max_size,
            framebuffer: None,
            color_attachments: Vec::new(),
            depth_attachment: None,
        };
        framebuffer.invalidate()?;
        Ok(framebuffer)
    }

    fn multisampled(&self) -> bool {
        self.spec.samples > 1
    }

    fn texture_target(&self) -> u32 {
        if self.multisampled() {
            glow::TEXTURE_2D_MULTISAMPLE
        } else {
            glow::TEXTURE_2D
        }
    }

    /// Recreate the GL framebuffer and its attachments at the current size
    fn invalidate(&mut self) -> Result<()> {
        self.release();
        if self.spec.swap_chain_target {
            return Ok(());
        }

        let gl = Rc::clone(&self.gl);
        unsafe {
            let framebuffer = match gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(message) => engine_bail!("orbit3d::opengl", "glCreateFramebuffer failed: {}", message),
            };
            self.framebuffer = Some(framebuffer);
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));

            for (index, format) in self.color_formats.clone().into_iter().enumerate() {
                let texture = self.create_attachment(format)?;
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0 + index as u32,
                    self.texture_target(),
                    Some(texture),
                    0,
                );
                self.color_attachments.push(texture);
            }

            if let Some(format) = self.spec.depth_attachment() {
                let texture = self.create_attachment(format)?;
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::DEPTH_STENCIL_ATTACHMENT,
                    self.texture_target(),
                    Some(texture),
                    0,
                );
                self.depth_attachment = Some(texture);
            }

            match self.color_attachments.len() {
                0 => gl.draw_buffer(glow::NONE),
                1 => {}
                count => {
                    let buffers: Vec<u32> = (0..count as u32).map(|index| glow::COLOR_ATTACHMENT0 + index).collect();
                    gl.draw_buffers(&buffers);
                }
            }

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            if status != glow::FRAMEBUFFER_COMPLETE {
                engine_bail!("orbit3d::opengl", "Framebuffer is incomplete (status 0x{:X})", status);
            }
        }

        engine_trace!(
            "orbit3d::opengl",
            "Framebuffer {} ready: {}x{}, {} color attachment(s)",
            self.native_id(), self.spec.width, self.spec.height, self.color_attachments.len()
        );
        Ok(())
    }

    /// Allocate one attachment texture; it is left bound
    unsafe fn create_attachment(&self, format: FramebufferTextureFormat) -> Result<glow::NativeTexture> {
        let gl = &self.gl;
        let texture = match gl.create_texture() {
            Ok(texture) => texture,
            Err(message) => engine_bail!("orbit3d::opengl", "glCreateTexture failed: {}", message),
        };
        let target = self.texture_target();
        let storage = gl_format::attachment_format(format);
        let width = self.spec.width as i32;
        let height = self.spec.height as i32;

        gl.bind_texture(target, Some(texture));
        if self.multisampled() {
            gl.tex_image_2d_multisample(
                target,
                self.spec.samples as i32,
                storage.internal_format as i32,
                width,
                height,
                false,
            );
        } else {
            gl.tex_image_2d(
                target,
                0,
                storage.internal_format as i32,
                width,
                height,
                0,
                storage.format,
                storage.ty,
                None,
            );
            // Integer attachments cannot be filtered
            let filter = match format {
                FramebufferTextureFormat::RedInteger => glow::NEAREST,
                _ => glow::LINEAR,
            };
            gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, filter as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, filter as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        }
        Ok(texture)
    }

    fn release(&mut self) {
        unsafe {
            if let Some(framebuffer) = self.framebuffer.take() {
                self.gl.delete_framebuffer(framebuffer);
            }
            for texture in self.color_attachments.drain(..) {
                self.gl.delete_texture(texture);
            }
            if let Some(texture) = self.depth_attachment.take() {
                self.gl.delete_texture(texture);
            }
        }
    }

    fn check_color_attachment(&self, index: u32) -> Result<FramebufferTextureFormat> {
        match self.color_formats.get(index as usize) {
            Some(format) if !self.color_attachments.is_empty() => Ok(*format),
            _ => engine_bail_warn!(
                "orbit3d::opengl",
                "Framebuffer has no color attachment {}",
                index
            ),
        }
    }
}

fn framebuffer_handle(id: u32) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(id).map(glow::NativeFramebuffer)
}

impl Framebuffer for GlFramebuffer {
    fn specification(&self) -> &FramebufferSpecification {
        &self.spec
    }

    fn bind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, self.framebuffer);
            self.gl.viewport(0, 0, self.spec.width as i32, self.spec.height as i32);
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        device::validate_framebuffer_size(width, height, self.max_size)?;
        if width == self.spec.width && height == self.spec.height {
            return Ok(());
        }
        self.spec.width = width;
        self.spec.height = height;
        self.invalidate()
    }

    fn read_pixel(&self, attachment_index: u32, x: i32, y: i32) -> Result<i32> {
        let format = self.check_color_attachment(attachment_index)?;
        if format != FramebufferTextureFormat::RedInteger {
            engine_bail_warn!(
                "orbit3d::opengl",
                "Cannot read an integer pixel from a {:?} attachment",
                format
            );
        }
        if x < 0 || y < 0 || x >= self.spec.width as i32 || y >= self.spec.height as i32 {
            engine_bail_warn!("orbit3d::opengl", "Pixel ({}, {}) is outside the framebuffer", x, y);
        }

        let mut pixel = [0u8; 4];
        unsafe {
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, self.framebuffer);
            self.gl.read_buffer(glow::COLOR_ATTACHMENT0 + attachment_index);
            self.gl.read_pixels(
                x,
                y,
                1,
                1,
                glow::RED_INTEGER,
                glow::INT,
                glow::PixelPackData::Slice(&mut pixel),
            );
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
        }
        Ok(i32::from_ne_bytes(pixel))
    }

    /// Leaves this framebuffer bound for drawing
    fn clear_attachment(&self, attachment_index: u32, value: i32) -> Result<()> {
        let format = self.check_color_attachment(attachment_index)?;
        unsafe {
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, self.framebuffer);
            match format {
                FramebufferTextureFormat::RedInteger => {
                    self.gl.clear_buffer_i32_slice(glow::COLOR, attachment_index, &[value, 0, 0, 0]);
                }
                _ => {
                    let value = value as f32;
                    self.gl.clear_buffer_f32_slice(glow::COLOR, attachment_index, &[value, value, value, value]);
                }
            }
        }
        Ok(())
    }

    fn color_attachment_id(&self, index: u32) -> Option<u32> {
        self.color_attachments.get(index as usize).map(|texture| texture.0.get())
    }

    fn depth_attachment_id(&self) -> Option<u32> {
        self.depth_attachment.map(|texture| texture.0.get())
    }

    fn blit_to(&self, target: Option<&dyn Framebuffer>, mask: BlitMask) {
        let (target_id, target_width, target_height) = match target {
            Some(target) => (target.native_id(), target.specification().width, target.specification().height),
            None => (0, self.spec.width, self.spec.height),
        };

        unsafe {
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, self.framebuffer);
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, framebuffer_handle(target_id));
            self.gl.blit_framebuffer(
                0,
                0,
                self.spec.width as i32,
                self.spec.height as i32,
                0,
                0,
                target_width as i32,
                target_height as i32,
                gl_format::blit_mask(mask),
                gl_format::blit_filter(mask),
            );
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    fn native_id(&self) -> u32 {
        self.framebuffer.map_or(0, |framebuffer| framebuffer.0.get())
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        self.release();
    }
}
