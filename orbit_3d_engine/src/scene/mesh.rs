//! Meshes: CPU-side geometry plus the vertex array built from it.
//!
//! The vertices and indices are kept after upload so the mesh can be
//! uploaded again (e.g. after a context loss) or inspected.

use std::rc::Rc;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::error::Result;
use crate::graphics_device::{DataType, GraphicsDevice, PrimitiveType};
use crate::material::Material;
use crate::renderer::Renderer;
use crate::resource::{BufferElement, BufferLayout, IndexBuffer, VertexArray, VertexBuffer};
use super::bounding_box::BoundingBox;

// ============================================================================
// VERTEX
// ============================================================================

/// Interleaved mesh vertex: position, normal, texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// `a_Position` (Float3), `a_Normal` (Float3), `a_TexCoord` (Float2)
    pub fn layout() -> BufferLayout {
        BufferLayout::new(vec![
            BufferElement::new(DataType::Float3, "a_Position"),
            BufferElement::new(DataType::Float3, "a_Normal"),
            BufferElement::new(DataType::Float2, "a_TexCoord"),
        ])
    }
}

// ============================================================================
// MESH
// ============================================================================

pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    primitive: PrimitiveType,
    material: Option<Rc<dyn Material>>,
    vertex_array: Option<VertexArray>,
}

impl Mesh {
    pub fn new(name: &str, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            indices,
            primitive: PrimitiveType::Triangles,
            material: None,
            vertex_array: None,
        }
    }

    pub fn with_material(mut self, material: Rc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_primitive(mut self, primitive: PrimitiveType) -> Self {
        self.primitive = primitive;
        self
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    pub fn material(&self) -> Option<&Rc<dyn Material>> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Option<Rc<dyn Material>>) {
        self.material = material;
    }

    /// None until `upload` succeeds
    pub fn vertex_array(&self) -> Option<&VertexArray> {
        self.vertex_array.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_array.is_some()
    }

    /// Local-space bounds of the vertices
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::EMPTY;
        for vertex in &self.vertices {
            bbox.extend(vertex.position());
        }
        bbox
    }

    // ===== GPU =====

    /// Build the vertex array from the CPU copies (replaces a previous upload)
    ///
    /// Meshes without indices are drawn as plain vertex ranges.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged) for a mesh without vertices, or a backend
    /// error from buffer creation.
    pub fn upload(&mut self, device: &dyn GraphicsDevice) -> Result<()> {
        if self.vertices.is_empty() {
            crate::engine_bail_warn!("orbit3d::Mesh", "Mesh '{}' has no vertices", self.name);
        }

        let vertex_buffer = VertexBuffer::from_slice(device, &self.vertices, Vertex::layout())?;
        let mut vertex_array = VertexArray::new(device)?;
        vertex_array.add_vertex_buffer(Rc::new(vertex_buffer))?;
        if !self.indices.is_empty() {
            vertex_array.set_index_buffer(Rc::new(IndexBuffer::new(device, &self.indices)?))?;
        }
        self.vertex_array = Some(vertex_array);

        crate::engine_trace!(
            "orbit3d::Mesh",
            "Uploaded mesh '{}' ({} vertices, {} indices)",
            self.name, self.vertices.len(), self.indices.len()
        );
        Ok(())
    }

    /// Draw with `transform` through `renderer`
    ///
    /// A mesh without a material only issues the geometry; the caller binds
    /// the shader. A mesh never uploaded is logged and skipped.
    pub fn draw_mesh(&self, renderer: &mut Renderer, transform: &Mat4) -> Result<()> {
        renderer.draw_mesh(self, transform)
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("name", &self.name)
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("primitive", &self.primitive)
            .field("material", &self.material.as_ref().map(|material| material.name().to_string()))
            .field("uploaded", &self.is_uploaded())
            .finish()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
