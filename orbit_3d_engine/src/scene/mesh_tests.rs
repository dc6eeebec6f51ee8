use glam::{Vec2, Vec3};
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockCommand, MockGraphicsDevice};
use crate::graphics_device::BufferUsage;
use super::*;

fn triangle() -> Mesh {
    Mesh::new(
        "triangle",
        vec![
            Vertex::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::Z, Vec2::ZERO),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, Vec2::X),
            Vertex::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Z, Vec2::Y),
        ],
        vec![0, 1, 2],
    )
}

#[test]
fn test_vertex_layout() {
    let layout = Vertex::layout();
    assert_eq!(layout.stride() as usize, std::mem::size_of::<Vertex>());
    let offsets: Vec<u32> = layout.iter().map(|element| element.offset).collect();
    assert_eq!(offsets, vec![0, 12, 24]);
}

#[test]
fn test_bounding_box() {
    let bbox = triangle().bounding_box();
    assert_eq!(bbox.min, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(bbox.max, Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn test_upload_builds_vertex_array() {
    let device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    assert!(!mesh.is_uploaded());

    mesh.upload(&device).unwrap();

    let vertex_array = mesh.vertex_array().unwrap();
    assert_eq!(vertex_array.vertex_buffers().len(), 1);
    assert_eq!(vertex_array.vertex_buffers()[0].vertex_count(), 3);
    assert_eq!(vertex_array.index_buffer().map(|ibo| ibo.count()), Some(3));
    // CPU copies are kept
    assert_eq!(mesh.vertices().len(), 3);
    assert_eq!(mesh.indices(), &[0, 1, 2]);
}

#[test]
fn test_reupload_replaces_vertex_array() {
    let device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.upload(&device).unwrap();
    let first = mesh.vertex_array().unwrap().native_id();

    mesh.upload(&device).unwrap();
    assert_ne!(mesh.vertex_array().unwrap().native_id(), first);
}

#[test]
fn test_upload_without_indices_has_no_index_buffer() {
    let device = MockGraphicsDevice::new();
    let mut mesh = Mesh::new("points", triangle().vertices().to_vec(), Vec::new());
    mesh.upload(&device).unwrap();

    assert!(mesh.vertex_array().unwrap().index_buffer().is_none());
    let index_buffers = device
        .commands()
        .iter()
        .filter(|command| matches!(command, MockCommand::CreateBuffer { usage: BufferUsage::Index, .. }))
        .count();
    assert_eq!(index_buffers, 0);
}

#[test]
fn test_upload_empty_mesh_fails() {
    let device = MockGraphicsDevice::new();
    let mut mesh = Mesh::new("empty", Vec::new(), Vec::new());
    assert!(matches!(mesh.upload(&device), Err(Error::InvalidArgument(_))));
    assert!(!mesh.is_uploaded());
}
