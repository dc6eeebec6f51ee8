/// OpenGLDevice - OpenGL implementation of the GraphicsDevice trait

use std::ffi::c_void;
use std::rc::Rc;
use orbit_3d_engine::glam::Vec4;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Result,
    device::{
        Buffer, BufferDesc, ClearFlags, DeviceLimits, Framebuffer, FramebufferSpecification,
        GraphicsDevice, PrimitiveType, RendererConfig, Shader, ShaderDesc, Texture,
        TextureSpecification, VertexArrayBinding,
    },
};
use orbit_3d_engine::{engine_bail, engine_info, engine_trace};

use crate::gl_buffer::GlBuffer;
use crate::gl_format;
use crate::gl_frame_buffer::GlFramebuffer;
use crate::gl_shader::GlShader;
use crate::gl_texture::GlTexture;
use crate::gl_vertex_array::GlVertexArray;

/// Minimum desktop version: vertex array objects, geometry shaders and
/// multisample textures are core from 3.2, explicit attribute locations from 3.3
const MIN_GL_VERSION: (u32, u32) = (3, 3);

/// OpenGL graphics device
///
/// Wraps a current `glow::Context`. Every resource it creates keeps a
/// reference to the context and must be dropped on the context thread.
pub struct OpenGLDevice {
    gl: Rc<glow::Context>,
    limits: DeviceLimits,
    version: String,
    renderer_name: String,
    debug_output: bool,
}

impl OpenGLDevice {
    /// Create a device from a context made current by the windowing layer
    ///
    /// # Arguments
    ///
    /// * `gl` - Loaded OpenGL context
    /// * `config` - Renderer configuration (`enable_validation` installs the
    ///   debug message callback when the `opengl-debug-output` feature is on)
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when the context is older than OpenGL 3.3 or is
    /// an ES context.
    #[cfg_attr(not(feature = "opengl-debug-output"), allow(unused_mut))]
    pub fn new(mut gl: glow::Context, config: &RendererConfig) -> Result<Self> {
        let version = gl.version();
        if version.is_embedded || (version.major, version.minor) < MIN_GL_VERSION {
            engine_bail!(
                "orbit3d::opengl",
                InitializationFailed => "OpenGL {}.{}{} is not supported (need desktop {}.{})",
                version.major,
                version.minor,
                if version.is_embedded { " ES" } else { "" },
                MIN_GL_VERSION.0,
                MIN_GL_VERSION.1
            );
        }

        #[cfg(feature = "opengl-debug-output")]
        let debug_output = config.enable_validation && crate::gl_debug::install(&mut gl);
        #[cfg(not(feature = "opengl-debug-output"))]
        let debug_output = false;

        let (version, renderer_name, limits) = unsafe {
            // Tightly packed rows (RGB8 textures with odd widths)
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);

            let limits = DeviceLimits {
                max_vertex_attributes: query_limit(&gl, glow::MAX_VERTEX_ATTRIBS),
                max_texture_units: query_limit(&gl, glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS),
                max_framebuffer_size: query_limit(&gl, glow::MAX_RENDERBUFFER_SIZE)
                    .min(query_limit(&gl, glow::MAX_TEXTURE_SIZE)),
            };
            (
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
                limits,
            )
        };

        engine_info!(
            "orbit3d::opengl",
            "{}: OpenGL {} on {} (debug output: {})",
            config.app_name, version, renderer_name, debug_output
        );
        engine_trace!("orbit3d::opengl", "Device limits: {:?}", limits);

        Ok(Self {
            gl: Rc::new(gl),
            limits,
            version,
            renderer_name,
            debug_output,
        })
    }

    /// Load the GL entry points with `loader` and create the device
    ///
    /// # Safety
    ///
    /// A GL context must be current on this thread and `loader` must return
    /// its function pointers.
    pub unsafe fn from_loader_function<F>(loader: F, config: &RendererConfig) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self::new(glow::Context::from_loader_function(loader), config)
    }

    /// Shared context, for interop with GUI overlays drawing into the same context
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    /// `GL_VERSION` string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `GL_RENDERER` string
    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    pub fn debug_output_enabled(&self) -> bool {
        self.debug_output
    }
}

unsafe fn query_limit(gl: &glow::Context, parameter: u32) -> u32 {
    gl.get_parameter_i32(parameter).max(0) as u32
}

impl GraphicsDevice for OpenGLDevice {
    fn limits(&self) -> DeviceLimits {
        self.limits
    }

    fn create_buffer(&self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>> {
        Ok(Box::new(GlBuffer::new(Rc::clone(&self.gl), desc)?))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArrayBinding>> {
        Ok(Box::new(GlVertexArray::new(Rc::clone(&self.gl), self.limits.max_vertex_attributes)?))
    }

    fn create_texture(&self, spec: TextureSpecification, data: Option<&[u8]>) -> Result<Rc<dyn Texture>> {
        Ok(Rc::new(GlTexture::new(Rc::clone(&self.gl), spec, data)?))
    }

    fn create_shader(&self, desc: ShaderDesc) -> Result<Rc<dyn Shader>> {
        Ok(Rc::new(GlShader::new(Rc::clone(&self.gl), desc)))
    }

    fn create_framebuffer(&self, spec: FramebufferSpecification) -> Result<Box<dyn Framebuffer>> {
        Ok(Box::new(GlFramebuffer::new(
            Rc::clone(&self.gl),
            spec,
            self.limits.max_framebuffer_size,
        )?))
    }

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(x, y, width as i32, height as i32);
        }
    }

    fn set_clear_color(&self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
        }
    }

    fn clear(&self, flags: ClearFlags) {
        unsafe {
            self.gl.clear(gl_format::clear_mask(flags));
        }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
                self.gl.depth_func(glow::LESS);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_face_culling(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::CULL_FACE);
                self.gl.cull_face(glow::BACK);
                self.gl.front_face(glow::CCW);
            } else {
                self.gl.disable(glow::CULL_FACE);
            }
        }
    }

    fn draw_indexed(&self, primitive: PrimitiveType, index_count: u32) {
        unsafe {
            self.gl.draw_elements(
                gl_format::primitive_mode(primitive),
                index_count as i32,
                glow::UNSIGNED_INT,
                0,
            );
        }
    }

    fn draw_arrays(&self, primitive: PrimitiveType, first_vertex: u32, vertex_count: u32) {
        unsafe {
            self.gl.draw_arrays(
                gl_format::primitive_mode(primitive),
                first_vertex as i32,
                vertex_count as i32,
            );
        }
    }
}
