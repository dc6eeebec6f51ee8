/// Engine enum -> OpenGL enum mapping tables
///
/// Every conversion is an exhaustive match: adding an engine variant fails to
/// compile until it is mapped here.

use orbit_3d_engine::orbit3d::device::{
    BlitMask, BufferAccess, BufferUsage, ClearFlags, DataType, FramebufferTextureFormat,
    PrimitiveType, ShaderStage, TextureFilter, TextureFormat, TextureType, TextureWrap,
};

/// Internal format, pixel format and component type of a texture upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlTextureFormat {
    pub internal_format: u32,
    pub format: u32,
    pub ty: u32,
}

/// Component type and whether the attribute goes through the integer path
/// (`glVertexAttribIPointer`)
pub(crate) fn attribute_type(data_type: DataType) -> (u32, bool) {
    match data_type {
        DataType::Float
        | DataType::Float2
        | DataType::Float3
        | DataType::Float4
        | DataType::Mat3
        | DataType::Mat4 => (glow::FLOAT, false),
        DataType::Int | DataType::Int2 | DataType::Int3 | DataType::Int4 => (glow::INT, true),
        DataType::UInt => (glow::UNSIGNED_INT, true),
        // One byte per bool in the vertex data
        DataType::Bool => (glow::UNSIGNED_BYTE, true),
    }
}

pub(crate) fn primitive_mode(primitive: PrimitiveType) -> u32 {
    match primitive {
        PrimitiveType::Triangles => glow::TRIANGLES,
        PrimitiveType::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveType::Lines => glow::LINES,
        PrimitiveType::LineStrip => glow::LINE_STRIP,
        PrimitiveType::Points => glow::POINTS,
    }
}

pub(crate) fn texture_target(texture_type: TextureType) -> u32 {
    match texture_type {
        TextureType::Tex1D => glow::TEXTURE_1D,
        TextureType::Tex2D => glow::TEXTURE_2D,
        TextureType::Tex2DMultisample => glow::TEXTURE_2D_MULTISAMPLE,
        TextureType::Tex3D => glow::TEXTURE_3D,
        TextureType::Cube => glow::TEXTURE_CUBE_MAP,
    }
}

/// Float formats are uploaded as `GL_FLOAT` whatever their storage precision
pub(crate) fn texture_format(format: TextureFormat) -> GlTextureFormat {
    let (internal_format, pixel_format, ty) = match format {
        TextureFormat::R8 => (glow::R8, glow::RED, glow::UNSIGNED_BYTE),
        TextureFormat::Rg8 => (glow::RG8, glow::RG, glow::UNSIGNED_BYTE),
        TextureFormat::Rgb8 => (glow::RGB8, glow::RGB, glow::UNSIGNED_BYTE),
        TextureFormat::Rgba8 => (glow::RGBA8, glow::RGBA, glow::UNSIGNED_BYTE),
        TextureFormat::Srgb8 => (glow::SRGB8, glow::RGB, glow::UNSIGNED_BYTE),
        TextureFormat::Srgba8 => (glow::SRGB8_ALPHA8, glow::RGBA, glow::UNSIGNED_BYTE),
        TextureFormat::R16F => (glow::R16F, glow::RED, glow::FLOAT),
        TextureFormat::Rgb16F => (glow::RGB16F, glow::RGB, glow::FLOAT),
        TextureFormat::Rgba16F => (glow::RGBA16F, glow::RGBA, glow::FLOAT),
        TextureFormat::R32F => (glow::R32F, glow::RED, glow::FLOAT),
        TextureFormat::Rgb32F => (glow::RGB32F, glow::RGB, glow::FLOAT),
        TextureFormat::Rgba32F => (glow::RGBA32F, glow::RGBA, glow::FLOAT),
        TextureFormat::R32I => (glow::R32I, glow::RED_INTEGER, glow::INT),
        TextureFormat::Depth24Stencil8 => {
            (glow::DEPTH24_STENCIL8, glow::DEPTH_STENCIL, glow::UNSIGNED_INT_24_8)
        }
        TextureFormat::Depth32F => (glow::DEPTH_COMPONENT32F, glow::DEPTH_COMPONENT, glow::FLOAT),
    };
    GlTextureFormat { internal_format, format: pixel_format, ty }
}

pub(crate) fn texture_wrap(wrap: TextureWrap) -> u32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        TextureWrap::ClampToBorder => glow::CLAMP_TO_BORDER,
    }
}

pub(crate) fn min_filter(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST,
        TextureFilter::Linear => glow::LINEAR,
        TextureFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        TextureFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    }
}

/// Magnification has no mipmap variants
pub(crate) fn mag_filter(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Nearest | TextureFilter::NearestMipmapNearest => glow::NEAREST,
        TextureFilter::Linear | TextureFilter::LinearMipmapLinear => glow::LINEAR,
    }
}

/// Storage format of a framebuffer attachment
pub(crate) fn attachment_format(format: FramebufferTextureFormat) -> GlTextureFormat {
    match format {
        FramebufferTextureFormat::Rgba8 => texture_format(TextureFormat::Rgba8),
        FramebufferTextureFormat::Rgba16F => texture_format(TextureFormat::Rgba16F),
        FramebufferTextureFormat::RedInteger => texture_format(TextureFormat::R32I),
        FramebufferTextureFormat::Depth24Stencil8 => texture_format(TextureFormat::Depth24Stencil8),
    }
}

pub(crate) fn buffer_target(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Vertex => glow::ARRAY_BUFFER,
        BufferUsage::Index => glow::ELEMENT_ARRAY_BUFFER,
        BufferUsage::Uniform => glow::UNIFORM_BUFFER,
    }
}

pub(crate) fn buffer_usage_hint(access: BufferAccess) -> u32 {
    match access {
        BufferAccess::Static => glow::STATIC_DRAW,
        BufferAccess::Dynamic => glow::DYNAMIC_DRAW,
    }
}

pub(crate) fn shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
    }
}

pub(crate) fn clear_mask(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

pub(crate) fn blit_mask(mask: BlitMask) -> u32 {
    let mut bits = 0;
    if mask.contains(BlitMask::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if mask.contains(BlitMask::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    if mask.contains(BlitMask::STENCIL) {
        bits |= glow::STENCIL_BUFFER_BIT;
    }
    bits
}

/// Depth and stencil blits only support nearest filtering
pub(crate) fn blit_filter(mask: BlitMask) -> u32 {
    if mask.intersects(BlitMask::DEPTH | BlitMask::STENCIL) {
        glow::NEAREST
    } else {
        glow::LINEAR
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
