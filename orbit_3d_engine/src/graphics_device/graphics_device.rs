/// GraphicsDevice trait, device configuration and limits

use std::rc::Rc;
use glam::Vec4;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, VertexArrayBinding, Texture, TextureSpecification,
    Shader, ShaderDesc, Framebuffer, FramebufferSpecification, PrimitiveType,
};

/// Renderer/device configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Enable backend validation (GL debug output)
    pub enable_validation: bool,

    /// Application name (used in log lines)
    pub app_name: String,

    /// First texture unit handed out by materials
    pub first_texture_slot: u32,

    /// Clear color applied at renderer creation
    pub clear_color: Vec4,

    /// Enable depth testing
    pub depth_test: bool,

    /// Enable back-face culling
    pub face_culling: bool,

    /// Skip models whose bounding box is outside the camera frustum
    pub frustum_culling: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Orbit3D Application".to_string(),
            first_texture_slot: 0,
            clear_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
            depth_test: true,
            face_culling: false,
            frustum_culling: true,
        }
    }
}

/// Hardware limits reported by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLimits {
    /// Maximum number of vertex attributes per vertex array
    pub max_vertex_attributes: u32,

    /// Maximum number of combined texture image units
    pub max_texture_units: u32,

    /// Maximum framebuffer width/height
    pub max_framebuffer_size: u32,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self {
            max_vertex_attributes: 16,
            max_texture_units: 16,
            max_framebuffer_size: 8192,
        }
    }
}

/// Per-frame draw statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Number of draw calls issued
    pub draw_calls: u32,

    /// Number of indices (or vertices for non-indexed draws) submitted
    pub indices: u32,

    /// Number of models rejected by frustum culling
    pub culled_models: u32,
}

bitflags! {
    /// Buffers cleared by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Main graphics device trait
///
/// Implemented by backend crates (e.g., OpenGLDevice). Creates GPU resources
/// and drives fixed-function state and draw calls. Every method runs on the
/// thread that owns the graphics context.
pub trait GraphicsDevice {
    /// Limits queried at device creation
    fn limits(&self) -> DeviceLimits;

    /// Create a GPU buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Usage, access hint, size and optional initial data
    fn create_buffer(&self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>>;

    /// Create an empty vertex array object
    fn create_vertex_array(&self) -> Result<Box<dyn VertexArrayBinding>>;

    /// Create a texture, uploading `data` when provided
    ///
    /// # Arguments
    ///
    /// * `spec` - Fully resolved or partial specification (unset fields use defaults)
    /// * `data` - Optional pixel data matching `spec.byte_size()`
    fn create_texture(&self, spec: TextureSpecification, data: Option<&[u8]>) -> Result<Rc<dyn Texture>>;

    /// Compile and link a shader program
    ///
    /// A compile or link failure is logged and produces a shader whose
    /// `is_valid()` returns false.
    fn create_shader(&self, desc: ShaderDesc) -> Result<Rc<dyn Shader>>;

    /// Create a framebuffer with its attachments
    fn create_framebuffer(&self, spec: FramebufferSpecification) -> Result<Box<dyn Framebuffer>>;

    /// Set the viewport rectangle
    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32);

    /// Set the clear color
    fn set_clear_color(&self, color: Vec4);

    /// Clear the selected buffers of the bound framebuffer
    fn clear(&self, flags: ClearFlags);

    /// Enable or disable depth testing
    fn set_depth_test(&self, enabled: bool);

    /// Enable or disable back-face culling
    fn set_face_culling(&self, enabled: bool);

    /// Draw `index_count` indices from the bound vertex array's index buffer
    fn draw_indexed(&self, primitive: PrimitiveType, index_count: u32);

    /// Draw `vertex_count` vertices starting at `first_vertex`
    fn draw_arrays(&self, primitive: PrimitiveType, first_vertex: u32, vertex_count: u32);
}
