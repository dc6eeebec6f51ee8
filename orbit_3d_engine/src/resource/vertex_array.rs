/// Vertex array: vertex buffers + optional index buffer bound to one VAO

use std::rc::Rc;
use crate::error::Result;
use crate::graphics_device::{AttributeDesc, GraphicsDevice, VertexArrayBinding};
use crate::resource::{IndexBuffer, VertexBuffer};

/// Vertex array object with its attached buffers
///
/// Attribute locations are handed out monotonically as vertex buffers are
/// added; matrix elements take one location per column.
pub struct VertexArray {
    binding: Box<dyn VertexArrayBinding>,
    vertex_buffers: Vec<Rc<VertexBuffer>>,
    index_buffer: Option<Rc<IndexBuffer>>,
    attribute_cursor: u32,
    max_attributes: u32,
}

impl VertexArray {
    pub fn new(device: &dyn GraphicsDevice) -> Result<Self> {
        Ok(Self {
            binding: device.create_vertex_array()?,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            attribute_cursor: 0,
            max_attributes: device.limits().max_vertex_attributes,
        })
    }

    /// Attach a vertex buffer and enable one attribute per layout element
    ///
    /// # Errors
    ///
    /// Logged and skipped (no state change) when the layout is empty or the
    /// attributes would exceed the device limit.
    pub fn add_vertex_buffer(&mut self, vertex_buffer: Rc<VertexBuffer>) -> Result<()> {
        let layout = vertex_buffer.layout();
        if layout.is_empty() {
            crate::engine_bail_warn!("orbit3d::VertexArray", "Vertex buffer has no layout");
        }

        let required = layout.attribute_slots();
        if self.attribute_cursor + required > self.max_attributes {
            crate::engine_bail_warn!(
                "orbit3d::VertexArray",
                "Vertex buffer needs {} attributes, {} of {} already used",
                required, self.attribute_cursor, self.max_attributes
            );
        }

        self.binding.bind();
        vertex_buffer.bind();

        for element in layout {
            let components = element.component_count();
            for column in 0..element.data_type.attribute_slots() {
                let attribute = AttributeDesc {
                    index: self.attribute_cursor,
                    components,
                    data_type: element.data_type,
                    normalized: element.normalized,
                    stride: layout.stride(),
                    offset: element.offset + column * components * 4,
                    divisor: if element.data_type.is_matrix() { 1 } else { 0 },
                };
                self.binding.enable_attribute(vertex_buffer.buffer(), &attribute)?;
                self.attribute_cursor += 1;
            }
        }

        crate::engine_trace!(
            "orbit3d::VertexArray",
            "VAO {}: attached vertex buffer ({} vertices, {} attributes)",
            self.binding.native_id(), vertex_buffer.vertex_count(), self.attribute_cursor
        );
        self.vertex_buffers.push(vertex_buffer);
        Ok(())
    }

    /// Replace the index buffer
    pub fn set_index_buffer(&mut self, index_buffer: Rc<IndexBuffer>) -> Result<()> {
        self.binding.bind();
        self.binding.attach_index_buffer(index_buffer.buffer())?;
        self.index_buffer = Some(index_buffer);
        Ok(())
    }

    pub fn bind(&self) {
        self.binding.bind();
    }

    pub fn unbind(&self) {
        self.binding.unbind();
    }

    pub fn vertex_buffers(&self) -> &[Rc<VertexBuffer>] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<&Rc<IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    /// Next attribute location to be assigned
    pub fn attribute_cursor(&self) -> u32 {
        self.attribute_cursor
    }

    pub fn native_id(&self) -> u32 {
        self.binding.native_id()
    }
}

#[cfg(test)]
#[path = "vertex_array_tests.rs"]
mod tests;
