use glam::Vec3;
use crate::graphics_device::mock_graphics_device::{MockCommand, MockGraphicsDevice};
use crate::graphics_device::BufferUsage;
use super::*;

#[test]
fn test_quad_vertex_array_layout() {
    let device = MockGraphicsDevice::new();
    let vertex_array = quad_vertex_array(&device).unwrap();

    assert_eq!(vertex_array.vertex_buffers().len(), 1);
    assert!(vertex_array.index_buffer().is_some());
    assert_eq!(vertex_array.index_buffer().map(|ibo| ibo.count()), Some(6));

    let layout = vertex_array.vertex_buffers()[0].layout();
    assert_eq!(layout.stride(), 20);
    let offsets: Vec<u32> = layout.iter().map(|element| element.offset).collect();
    assert_eq!(offsets, vec![0, 12]);

    let buffers: Vec<BufferUsage> = device
        .commands()
        .into_iter()
        .filter_map(|command| match command {
            MockCommand::CreateBuffer { usage, .. } => Some(usage),
            _ => None,
        })
        .collect();
    assert_eq!(buffers, vec![BufferUsage::Vertex, BufferUsage::Index]);
}

#[test]
fn test_quad_mesh() {
    let mesh = quad(2.0);
    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.indices().len(), 6);
    assert!(mesh.vertices().iter().all(|vertex| vertex.normal() == Vec3::Z));
    assert_eq!(mesh.bounding_box().max, Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_cube_mesh() {
    let mesh = cube(2.0);
    assert_eq!(mesh.vertices().len(), 24);
    assert_eq!(mesh.indices().len(), 36);

    let bbox = mesh.bounding_box();
    assert_eq!(bbox.min, Vec3::splat(-1.0));
    assert_eq!(bbox.max, Vec3::splat(1.0));
}

#[test]
fn test_cube_faces_wind_counter_clockwise() {
    let mesh = cube(1.0);
    let vertices = mesh.vertices();
    for triangle in mesh.indices().chunks(3) {
        let a = vertices[triangle[0] as usize].position();
        let b = vertices[triangle[1] as usize].position();
        let c = vertices[triangle[2] as usize].position();
        let face_normal = (b - a).cross(c - a).normalize();
        assert!((face_normal - vertices[triangle[0] as usize].normal()).length() < 1e-5);
    }
}
