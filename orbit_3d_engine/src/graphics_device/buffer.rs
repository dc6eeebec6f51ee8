/// Buffer trait and buffer descriptor

use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Index buffer (u32 indices)
    Index,
    /// Uniform buffer
    Uniform,
}

/// Update frequency hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferAccess {
    /// Written once at creation
    #[default]
    Static,
    /// Rewritten through `Buffer::update`
    Dynamic,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc<'a> {
    /// Buffer usage
    pub usage: BufferUsage,
    /// Update frequency hint
    pub access: BufferAccess,
    /// Size in bytes
    pub size: u64,
    /// Initial contents (`data.len()` must equal `size`)
    pub data: Option<&'a [u8]>,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., GlBuffer).
/// The buffer is destroyed when dropped.
pub trait Buffer {
    fn usage(&self) -> BufferUsage;

    /// Size in bytes
    fn size(&self) -> u64;

    fn bind(&self);

    fn unbind(&self);

    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Backend handle (for logs and framebuffer/vertex array wiring)
    fn native_id(&self) -> u32;
}

/// Check that `[offset, offset + len)` lies inside a buffer of `size` bytes
pub fn check_buffer_range(size: u64, offset: u64, len: usize) -> Result<()> {
    let end = offset.checked_add(len as u64);
    match end {
        Some(end) if end <= size => Ok(()),
        _ => crate::engine_bail_warn!(
            "orbit3d::Buffer",
            "Update out of range: offset {} + {} bytes exceeds buffer size {}",
            offset, len, size
        ),
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
