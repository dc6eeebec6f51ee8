/// Vertex array - OpenGL implementation of the VertexArrayBinding trait

use std::rc::Rc;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Result,
    device::{AttributeDesc, Buffer, BufferUsage, VertexArrayBinding},
};
use orbit_3d_engine::{engine_bail, engine_bail_warn};

use crate::gl_format;

/// OpenGL vertex array object
pub struct GlVertexArray {
    gl: Rc<glow::Context>,
    vertex_array: glow::NativeVertexArray,
    max_attributes: u32,
}

impl GlVertexArray {
    pub(crate) fn new(gl: Rc<glow::Context>, max_attributes: u32) -> Result<Self> {
        let vertex_array = unsafe {
            match gl.create_vertex_array() {
                Ok(vertex_array) => vertex_array,
                Err(message) => {
                    engine_bail!("orbit3d::opengl", "glCreateVertexArray failed: {}", message)
                }
            }
        };
        Ok(Self { gl, vertex_array, max_attributes })
    }
}

impl VertexArrayBinding for GlVertexArray {
    fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vertex_array));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }

    fn enable_attribute(&self, buffer: &dyn Buffer, attribute: &AttributeDesc) -> Result<()> {
        if attribute.index >= self.max_attributes {
            engine_bail_warn!(
                "orbit3d::opengl",
                "Vertex attribute {} exceeds the device limit of {}",
                attribute.index, self.max_attributes
            );
        }
        if buffer.usage() != BufferUsage::Vertex {
            engine_bail_warn!(
                "orbit3d::opengl",
                "Vertex attribute {} sourced from a {:?} buffer",
                attribute.index, buffer.usage()
            );
        }

        let (component_type, integer) = gl_format::attribute_type(attribute.data_type);
        let components = attribute.components as i32;
        let stride = attribute.stride as i32;
        let offset = attribute.offset as i32;

        self.bind();
        buffer.bind();
        unsafe {
            self.gl.enable_vertex_attrib_array(attribute.index);
            if integer {
                self.gl.vertex_attrib_pointer_i32(attribute.index, components, component_type, stride, offset);
            } else {
                self.gl.vertex_attrib_pointer_f32(
                    attribute.index,
                    components,
                    component_type,
                    attribute.normalized,
                    stride,
                    offset,
                );
            }
            if attribute.divisor > 0 {
                self.gl.vertex_attrib_divisor(attribute.index, attribute.divisor);
            }
        }
        buffer.unbind();
        self.unbind();
        Ok(())
    }

    fn attach_index_buffer(&self, buffer: &dyn Buffer) -> Result<()> {
        if buffer.usage() != BufferUsage::Index {
            engine_bail_warn!(
                "orbit3d::opengl",
                "Cannot use a {:?} buffer as element buffer",
                buffer.usage()
            );
        }

        // The element binding is recorded in the vertex array: unbind the
        // array first so the association survives
        self.bind();
        buffer.bind();
        self.unbind();
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.vertex_array.0.get()
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
        }
    }
}
