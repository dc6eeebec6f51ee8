use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockCommand, MockGraphicsDevice};
use crate::graphics_device::{DataType, DeviceLimits};
use crate::resource::{BufferElement, BufferLayout};

// ============================================================================
// Helpers
// ============================================================================

fn attributes(device: &MockGraphicsDevice) -> Vec<AttributeDesc> {
    device
        .commands()
        .into_iter()
        .filter_map(|command| match command {
            MockCommand::EnableAttribute { attribute, .. } => Some(attribute),
            _ => None,
        })
        .collect()
}

fn quad(device: &MockGraphicsDevice) -> VertexArray {
    let vertices: [f32; 20] = [
        -0.5, -0.5, 0.0, 0.0, 0.0,
         0.5, -0.5, 0.0, 1.0, 0.0,
         0.5,  0.5, 0.0, 1.0, 1.0,
        -0.5,  0.5, 0.0, 0.0, 1.0,
    ];
    let layout = BufferLayout::new(vec![
        BufferElement::new(DataType::Float3, "a_Position"),
        BufferElement::new(DataType::Float2, "a_TexCoord"),
    ]);
    let vbo = VertexBuffer::from_slice(device, &vertices, layout).unwrap();
    let ibo = IndexBuffer::new(device, &[0, 1, 2, 2, 3, 0]).unwrap();

    let mut vao = VertexArray::new(device).unwrap();
    vao.add_vertex_buffer(Rc::new(vbo)).unwrap();
    vao.set_index_buffer(Rc::new(ibo)).unwrap();
    vao
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_quad_vertex_array() {
    let device = MockGraphicsDevice::new();
    let vao = quad(&device);

    assert_eq!(vao.vertex_buffers().len(), 1);
    assert_eq!(vao.index_buffer().map(|ibo| ibo.count()), Some(6));

    let layout = vao.vertex_buffers()[0].layout();
    assert_eq!(layout.stride(), 20);
    assert_eq!(layout.elements()[0].offset, 0);
    assert_eq!(layout.elements()[1].offset, 12);

    let attrs = attributes(&device);
    assert_eq!(attrs.len(), 2);
    assert_eq!((attrs[0].index, attrs[0].components, attrs[0].offset), (0, 3, 0));
    assert_eq!((attrs[1].index, attrs[1].components, attrs[1].offset), (1, 2, 12));
    assert!(attrs.iter().all(|a| a.stride == 20));
}

#[test]
fn test_attribute_indices_keep_increasing_across_buffers() {
    let device = MockGraphicsDevice::new();
    let mut vao = quad(&device);

    let colors = [[1.0f32; 4]; 4];
    let layout = BufferLayout::new(vec![BufferElement::new(DataType::Float4, "a_Color")]);
    let vbo = VertexBuffer::from_slice(&device, &colors, layout).unwrap();
    vao.add_vertex_buffer(Rc::new(vbo)).unwrap();

    let indices: Vec<u32> = attributes(&device).iter().map(|a| a.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(vao.attribute_cursor(), 3);
}

#[test]
fn test_matrix_attribute_uses_one_slot_per_column() {
    let device = MockGraphicsDevice::new();
    let layout = BufferLayout::new(vec![
        BufferElement::new(DataType::Float3, "a_Position"),
        BufferElement::new(DataType::Mat4, "a_Instance"),
    ]);
    let vbo = VertexBuffer::with_capacity(&device, 76 * 4, layout).unwrap();

    let mut vao = VertexArray::new(&device).unwrap();
    vao.add_vertex_buffer(Rc::new(vbo)).unwrap();

    let attrs = attributes(&device);
    assert_eq!(attrs.len(), 5);
    let offsets: Vec<u32> = attrs[1..].iter().map(|a| a.offset).collect();
    assert_eq!(offsets, vec![12, 28, 44, 60]);
    assert!(attrs[1..].iter().all(|a| a.components == 4 && a.divisor == 1));
}

#[test]
fn test_empty_layout_is_skipped() {
    let device = MockGraphicsDevice::new();
    let vbo = VertexBuffer::new(&device, &[0u8; 16], BufferLayout::default()).unwrap();

    let mut vao = VertexArray::new(&device).unwrap();
    let result = vao.add_vertex_buffer(Rc::new(vbo));

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(vao.vertex_buffers().is_empty());
    assert_eq!(vao.attribute_cursor(), 0);
}

#[test]
fn test_attribute_limit_is_enforced() {
    let device = MockGraphicsDevice::with_limits(DeviceLimits {
        max_vertex_attributes: 4,
        ..Default::default()
    });
    let layout = BufferLayout::new(vec![
        BufferElement::new(DataType::Float3, "a_Position"),
        BufferElement::new(DataType::Mat4, "a_Instance"),
    ]);
    let vbo = VertexBuffer::with_capacity(&device, 76, layout).unwrap();

    let mut vao = VertexArray::new(&device).unwrap();
    assert!(vao.add_vertex_buffer(Rc::new(vbo)).is_err());
    assert!(attributes(&device).is_empty());
}

#[test]
fn test_set_index_buffer_replaces_previous() {
    let device = MockGraphicsDevice::new();
    let mut vao = quad(&device);

    let first = vao.index_buffer().cloned().unwrap();
    assert_eq!(Rc::strong_count(&first), 2);

    vao.set_index_buffer(Rc::new(IndexBuffer::new(&device, &[0, 1, 2]).unwrap())).unwrap();
    assert_eq!(vao.index_buffer().map(|ibo| ibo.count()), Some(3));
    assert_eq!(Rc::strong_count(&first), 1);
}
