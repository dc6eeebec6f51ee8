/// Built-in geometry: screen quad, quad and cube meshes

use std::rc::Rc;
use glam::{Vec2, Vec3};
use crate::error::Result;
use crate::graphics_device::{DataType, GraphicsDevice};
use crate::resource::{BufferElement, BufferLayout, IndexBuffer, VertexArray, VertexBuffer};
use super::mesh::{Mesh, Vertex};

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Unit quad in the XY plane as `[a_Position Float3, a_TexCoord Float2]`
///
/// Used for full-screen passes and framebuffer previews.
pub fn quad_vertex_array(device: &dyn GraphicsDevice) -> Result<VertexArray> {
    #[rustfmt::skip]
    let vertices: [f32; 20] = [
        -0.5, -0.5, 0.0,   0.0, 0.0,
         0.5, -0.5, 0.0,   1.0, 0.0,
         0.5,  0.5, 0.0,   1.0, 1.0,
        -0.5,  0.5, 0.0,   0.0, 1.0,
    ];
    let layout = BufferLayout::new(vec![
        BufferElement::new(DataType::Float3, "a_Position"),
        BufferElement::new(DataType::Float2, "a_TexCoord"),
    ]);

    let mut vertex_array = VertexArray::new(device)?;
    vertex_array.add_vertex_buffer(Rc::new(VertexBuffer::from_slice(device, &vertices, layout)?))?;
    vertex_array.set_index_buffer(Rc::new(IndexBuffer::new(device, &QUAD_INDICES)?))?;
    Ok(vertex_array)
}

/// `size` × `size` quad in the XY plane facing +Z
pub fn quad(size: f32) -> Mesh {
    let half = size * 0.5;
    let vertices = vec![
        Vertex::new(Vec3::new(-half, -half, 0.0), Vec3::Z, Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(half, -half, 0.0), Vec3::Z, Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(half, half, 0.0), Vec3::Z, Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(-half, half, 0.0), Vec3::Z, Vec2::new(0.0, 1.0)),
    ];
    Mesh::new("quad", vertices, QUAD_INDICES.to_vec())
}

/// Axis-aligned cube centered on the origin, 4 vertices per face
pub fn cube(size: f32) -> Mesh {
    let half = size * 0.5;
    // (normal, tangent u, tangent v) per face
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (du, dv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * du + v * dv) * half;
            let tex_coords = Vec2::new((du + 1.0) * 0.5, (dv + 1.0) * 0.5);
            vertices.push(Vertex::new(position, normal, tex_coords));
        }
        indices.extend(QUAD_INDICES.iter().map(|index| base + index));
    }
    Mesh::new("cube", vertices, indices)
}

#[cfg(test)]
#[path = "primitives_tests.rs"]
mod tests;
