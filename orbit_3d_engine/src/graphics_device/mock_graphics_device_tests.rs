/// Unit tests for MockGraphicsDevice and its mock resources

use crate::graphics_device::mock_graphics_device::*;
use crate::graphics_device::{
    GraphicsDevice, BufferDesc, BufferUsage, BufferAccess, ShaderDesc, ShaderSources,
    TextureSpecification, FramebufferSpecification, BlitMask, UniformValue, PrimitiveType,
};
use crate::error::Error;

fn shader_desc(name: &str, vertex: &str, fragment: &str) -> ShaderDesc {
    ShaderDesc {
        name: name.to_string(),
        sources: ShaderSources {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            geometry: None,
        },
    }
}

// ============================================================================
// MockBuffer Tests
// ============================================================================

#[test]
fn test_mock_buffer_update_in_range() {
    let device = MockGraphicsDevice::new();
    let buffer = device
        .create_buffer(BufferDesc {
            usage: BufferUsage::Vertex,
            access: BufferAccess::Dynamic,
            size: 8,
            data: None,
        })
        .unwrap();

    assert!(buffer.update(4, &[1, 2, 3, 4]).is_ok());
    assert!(buffer.update(6, &[1, 2, 3, 4]).is_err());
    assert_eq!(buffer.size(), 8);
    assert_eq!(buffer.usage(), BufferUsage::Vertex);
}

// ============================================================================
// MockTexture Tests
// ============================================================================

#[test]
fn test_mock_texture_rejects_wrong_size() {
    let device = MockGraphicsDevice::new();
    let spec = TextureSpecification { width: 2, height: 2, ..Default::default() };

    let result = device.create_texture(spec, Some(&[0u8; 3][..]));
    assert!(matches!(result, Err(Error::InvalidArgument(_))));

    let texture = device.create_texture(spec, Some(&[0u8; 16][..])).unwrap();
    texture.bind_to_unit(3);
    assert_eq!(
        device.commands().last(),
        Some(&MockCommand::BindTexture { id: texture.native_id(), slot: Some(3) })
    );
}

// ============================================================================
// MockShader Tests
// ============================================================================

#[test]
fn test_mock_shader_uniform_lookup() {
    let device = MockGraphicsDevice::new();
    let shader = device
        .create_shader(shader_desc("flat", "uniform mat4 u_Transform;", "uniform vec4 u_Color;"))
        .unwrap();

    assert!(shader.is_valid());
    assert!(shader.has_uniform("u_Transform"));
    assert!(shader.set_float4("u_Color", glam::Vec4::ONE).is_ok());
    assert_eq!(
        shader.set_int("u_Missing", 1),
        Err(Error::UniformNotFound("u_Missing".to_string()))
    );
    assert_eq!(device.uniform("u_Color"), Some(UniformValue::Vec4(glam::Vec4::ONE)));
    assert_eq!(device.uniforms().len(), 1);
}

#[test]
fn test_mock_shader_compile_error() {
    let device = MockGraphicsDevice::new();
    let shader = device.create_shader(shader_desc("broken", "COMPILE_ERROR", "void main(){}")).unwrap();
    assert!(!shader.is_valid());
    assert_eq!(shader.name(), "broken");
}

// ============================================================================
// MockFramebuffer Tests
// ============================================================================

#[test]
fn test_mock_framebuffer_resize_and_blit() {
    let device = MockGraphicsDevice::new();
    let mut framebuffer = device.create_framebuffer(FramebufferSpecification::default()).unwrap();

    assert!(framebuffer.resize(0, 10).is_err());
    assert_eq!(framebuffer.specification().width, 1280);

    framebuffer.resize(640, 480).unwrap();
    assert_eq!(framebuffer.specification().height, 480);

    framebuffer.blit_to(None, BlitMask::COLOR);
    assert_eq!(
        device.commands().last(),
        Some(&MockCommand::Blit { source: framebuffer.native_id(), target: None, mask: BlitMask::COLOR })
    );
}

#[test]
fn test_mock_framebuffer_attachment_ids() {
    let device = MockGraphicsDevice::new();
    let framebuffer = device.create_framebuffer(FramebufferSpecification::default()).unwrap();

    assert!(framebuffer.color_attachment_id(0).is_some());
    assert!(framebuffer.color_attachment_id(1).is_none());
    assert!(framebuffer.depth_attachment_id().is_some());

    framebuffer.clear_attachment(0, -1).unwrap();
    assert_eq!(framebuffer.read_pixel(0, 5, 5), Ok(-1));
}

// ============================================================================
// Device Tests
// ============================================================================

#[test]
fn test_mock_device_draw_count() {
    let device = MockGraphicsDevice::new();
    device.draw_indexed(PrimitiveType::Triangles, 6);
    device.draw_arrays(PrimitiveType::Lines, 0, 2);
    assert_eq!(device.draw_count(), 2);

    device.clear_commands();
    assert!(device.commands().is_empty());
}

#[test]
fn test_mock_device_ids_are_unique() {
    let device = MockGraphicsDevice::new();
    let a = device.create_vertex_array().unwrap();
    let b = device.create_vertex_array().unwrap();
    assert_ne!(a.native_id(), b.native_id());
}
