/// Framebuffer trait - off-screen render targets with color and depth attachments
///
/// A framebuffer owns its attachment textures. Resizing recreates them.

use bitflags::bitflags;
use crate::error::Result;

/// Attachment format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferTextureFormat {
    /// 8-bit RGBA color
    Rgba8,
    /// 16-bit float RGBA color (HDR targets)
    Rgba16F,
    /// Single channel signed integer (entity picking)
    RedInteger,
    /// Depth + stencil
    Depth24Stencil8,
}

impl FramebufferTextureFormat {
    pub fn is_depth(&self) -> bool {
        matches!(self, FramebufferTextureFormat::Depth24Stencil8)
    }
}

/// Framebuffer creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramebufferSpecification {
    pub width: u32,
    pub height: u32,
    /// Sample count (1 = no multisampling)
    pub samples: u32,
    /// Attachments in declaration order; color attachments are numbered in
    /// that order, at most one depth attachment is used
    pub attachments: Vec<FramebufferTextureFormat>,
    /// Render straight to the default framebuffer
    pub swap_chain_target: bool,
}

impl Default for FramebufferSpecification {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples: 1,
            attachments: vec![FramebufferTextureFormat::Rgba8, FramebufferTextureFormat::Depth24Stencil8],
            swap_chain_target: false,
        }
    }
}

impl FramebufferSpecification {
    pub fn color_attachments(&self) -> impl Iterator<Item = FramebufferTextureFormat> + '_ {
        self.attachments.iter().copied().filter(|format| !format.is_depth())
    }

    pub fn depth_attachment(&self) -> Option<FramebufferTextureFormat> {
        self.attachments.iter().copied().find(|format| format.is_depth())
    }
}

bitflags! {
    /// Buffers copied by `Framebuffer::blit_to`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlitMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Framebuffer resource trait
///
/// Created via `GraphicsDevice::create_framebuffer()`. Attachments are
/// released when dropped.
pub trait Framebuffer {
    fn specification(&self) -> &FramebufferSpecification;

    /// Bind for drawing and set the viewport to the framebuffer size
    fn bind(&self);

    /// Restore the default framebuffer
    fn unbind(&self);

    /// Recreate attachments at a new size
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged, no change) when a dimension is 0 or above
    /// `DeviceLimits::max_framebuffer_size`.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Read one texel of an integer color attachment
    fn read_pixel(&self, attachment_index: u32, x: i32, y: i32) -> Result<i32>;

    /// Clear an integer color attachment to `value`
    fn clear_attachment(&self, attachment_index: u32, value: i32) -> Result<()>;

    /// Texture handle of a color attachment (for sampling / GUI display)
    fn color_attachment_id(&self, index: u32) -> Option<u32>;

    fn depth_attachment_id(&self) -> Option<u32>;

    /// Copy this framebuffer into `target` (or the default framebuffer when None)
    fn blit_to(&self, target: Option<&dyn Framebuffer>, mask: BlitMask);

    fn native_id(&self) -> u32;
}

/// Validate framebuffer dimensions against the device limit
pub fn validate_framebuffer_size(width: u32, height: u32, max_size: u32) -> Result<()> {
    if width == 0 || height == 0 || width > max_size || height > max_size {
        crate::engine_bail_warn!(
            "orbit3d::Framebuffer",
            "Attempted to resize framebuffer to {}x{} (limit {})",
            width, height, max_size
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "frame_buffer_tests.rs"]
mod tests;
