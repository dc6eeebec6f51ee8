/// Vertex and index buffers
///
/// Both own their backend buffer exclusively and are shared into vertex
/// arrays through `Rc`.

use crate::error::Result;
use crate::graphics_device::{Buffer, BufferAccess, BufferDesc, BufferUsage, GraphicsDevice};
use crate::resource::BufferLayout;

/// Contiguous vertex range drawn as one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSegment {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

// ===== VERTEX BUFFER =====

pub struct VertexBuffer {
    buffer: Box<dyn Buffer>,
    layout: BufferLayout,
    segments: Vec<BufferSegment>,
    vertex_count: u32,
}

impl VertexBuffer {
    /// Upload raw interleaved vertex bytes
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics device
    /// * `data` - Interleaved vertices matching `layout`
    /// * `layout` - One vertex description
    pub fn new(device: &dyn GraphicsDevice, data: &[u8], layout: BufferLayout) -> Result<Self> {
        let buffer = device.create_buffer(BufferDesc {
            usage: BufferUsage::Vertex,
            access: BufferAccess::Static,
            size: data.len() as u64,
            data: Some(data),
        })?;
        let vertex_count = vertex_count_of(data.len(), &layout);
        Ok(Self { buffer, layout, segments: Vec::new(), vertex_count })
    }

    /// Upload a slice of plain-old-data vertices
    pub fn from_slice<V: bytemuck::Pod>(
        device: &dyn GraphicsDevice,
        vertices: &[V],
        layout: BufferLayout,
    ) -> Result<Self> {
        Self::new(device, bytemuck::cast_slice(vertices), layout)
    }

    /// Allocate a dynamic buffer of `size` bytes, filled later by `set_data`
    pub fn with_capacity(device: &dyn GraphicsDevice, size: u64, layout: BufferLayout) -> Result<Self> {
        let buffer = device.create_buffer(BufferDesc {
            usage: BufferUsage::Vertex,
            access: BufferAccess::Dynamic,
            size,
            data: None,
        })?;
        Ok(Self { buffer, layout, segments: Vec::new(), vertex_count: 0 })
    }

    /// Overwrite the start of the buffer
    pub fn set_data(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.update(0, data)?;
        self.vertex_count = vertex_count_of(data.len(), &self.layout);
        Ok(())
    }

    pub fn set_layout(&mut self, layout: BufferLayout) {
        self.vertex_count = vertex_count_of(self.buffer.size() as usize, &layout);
        self.layout = layout;
    }

    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    /// Draw ranges (empty = draw the whole buffer)
    pub fn set_segments(&mut self, segments: Vec<BufferSegment>) {
        self.segments = segments;
    }

    pub fn segments(&self) -> &[BufferSegment] {
        &self.segments
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }

    pub fn buffer(&self) -> &dyn Buffer {
        self.buffer.as_ref()
    }
}

fn vertex_count_of(byte_len: usize, layout: &BufferLayout) -> u32 {
    match layout.stride() {
        0 => 0,
        stride => (byte_len / stride as usize) as u32,
    }
}

// ===== INDEX BUFFER =====

/// Immutable `u32` index buffer
pub struct IndexBuffer {
    buffer: Box<dyn Buffer>,
    count: u32,
}

impl IndexBuffer {
    pub fn new(device: &dyn GraphicsDevice, indices: &[u32]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let buffer = device.create_buffer(BufferDesc {
            usage: BufferUsage::Index,
            access: BufferAccess::Static,
            size: bytes.len() as u64,
            data: Some(bytes),
        })?;
        Ok(Self { buffer, count: indices.len() as u32 })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }

    pub fn buffer(&self) -> &dyn Buffer {
        self.buffer.as_ref()
    }
}

#[cfg(test)]
#[path = "vertex_buffer_tests.rs"]
mod tests;
