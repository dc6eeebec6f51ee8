/// Texture trait, texture specification and format utilities

use crate::error::Result;

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureType {
    Tex1D,
    #[default]
    Tex2D,
    Tex2DMultisample,
    Tex3D,
    Cube,
}

/// Texture pixel format
///
/// Float formats are uploaded as 32-bit floats regardless of their storage
/// precision on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    Srgb8,
    Srgba8,
    R16F,
    Rgb16F,
    Rgba16F,
    R32F,
    Rgb32F,
    Rgba32F,
    R32I,
    Depth24Stencil8,
    Depth32F,
}

impl TextureFormat {
    /// Every format, in raw-value order
    pub const ALL: [TextureFormat; 15] = [
        TextureFormat::R8,
        TextureFormat::Rg8,
        TextureFormat::Rgb8,
        TextureFormat::Rgba8,
        TextureFormat::Srgb8,
        TextureFormat::Srgba8,
        TextureFormat::R16F,
        TextureFormat::Rgb16F,
        TextureFormat::Rgba16F,
        TextureFormat::R32F,
        TextureFormat::Rgb32F,
        TextureFormat::Rgba32F,
        TextureFormat::R32I,
        TextureFormat::Depth24Stencil8,
        TextureFormat::Depth32F,
    ];

    pub fn channel_count(&self) -> u32 {
        match self {
            TextureFormat::R8 | TextureFormat::R16F | TextureFormat::R32F | TextureFormat::R32I => 1,
            TextureFormat::Rg8 => 2,
            TextureFormat::Rgb8 | TextureFormat::Srgb8 | TextureFormat::Rgb16F | TextureFormat::Rgb32F => 3,
            TextureFormat::Rgba8 | TextureFormat::Srgba8 | TextureFormat::Rgba16F | TextureFormat::Rgba32F => 4,
            TextureFormat::Depth24Stencil8 | TextureFormat::Depth32F => 1,
        }
    }

    /// Bytes per pixel of the upload data
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Depth24Stencil8 | TextureFormat::Depth32F => 4,
            format if format.is_float() || format.is_integer() => format.channel_count() * 4,
            format => format.channel_count(),
        }
    }

    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::Depth24Stencil8 | TextureFormat::Depth32F)
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            TextureFormat::R16F | TextureFormat::Rgb16F | TextureFormat::Rgba16F
                | TextureFormat::R32F | TextureFormat::Rgb32F | TextureFormat::Rgba32F
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TextureFormat::R32I)
    }

    /// Pick a format for decoded image data
    ///
    /// # Arguments
    ///
    /// * `channels` - Channel count of the decoded image (1..=4)
    /// * `hdr` - Pixels are 32-bit floats
    pub fn from_channel_count(channels: u32, hdr: bool) -> TextureFormat {
        match (channels, hdr) {
            (1, false) => TextureFormat::R8,
            (2, false) => TextureFormat::Rg8,
            (3, false) => TextureFormat::Rgb8,
            (4, false) => TextureFormat::Rgba8,
            (1, true) => TextureFormat::R32F,
            (3, true) => TextureFormat::Rgb32F,
            (2, true) | (4, true) => TextureFormat::Rgba32F,
            _ => crate::engine_fatal!(
                "orbit3d::Texture",
                "Unsupported channel count {} (expected 1..=4)",
                channels
            ),
        }
    }

    /// Convert a raw value read from external data
    pub fn from_raw(value: u32) -> TextureFormat {
        match Self::ALL.get(value as usize) {
            Some(format) => *format,
            None => crate::engine_fatal!("orbit3d::Texture", "Unknown texture format value {}", value),
        }
    }
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

/// Minification filter (magnification uses the non-mipmap part)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapLinear,
}

impl TextureFilter {
    pub fn uses_mipmaps(&self) -> bool {
        matches!(self, TextureFilter::NearestMipmapNearest | TextureFilter::LinearMipmapLinear)
    }
}

/// Texture creation parameters
///
/// `None` fields are inferred: either by `update_specs_texture_resource` when
/// loading from an image, or by the `resolved_*` defaults at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSpecification {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub texture_type: TextureType,
    pub format: Option<TextureFormat>,
    pub wrap: Option<TextureWrap>,
    pub filter: Option<TextureFilter>,
    pub generate_mipmaps: bool,
    /// Sample count (multisample textures only)
    pub samples: u32,
}

impl Default for TextureSpecification {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            depth: 1,
            texture_type: TextureType::Tex2D,
            format: None,
            wrap: None,
            filter: None,
            generate_mipmaps: false,
            samples: 1,
        }
    }
}

impl TextureSpecification {
    pub fn resolved_format(&self) -> TextureFormat {
        self.format.unwrap_or(TextureFormat::Rgba8)
    }

    pub fn resolved_wrap(&self) -> TextureWrap {
        self.wrap.unwrap_or(TextureWrap::Repeat)
    }

    pub fn resolved_filter(&self) -> TextureFilter {
        match self.filter {
            Some(filter) => filter,
            None if self.generate_mipmaps => TextureFilter::LinearMipmapLinear,
            None => TextureFilter::Linear,
        }
    }

    /// 6 for cube maps, 1 otherwise
    pub fn face_count(&self) -> u32 {
        match self.texture_type {
            TextureType::Cube => 6,
            _ => 1,
        }
    }

    /// Expected size of the upload data in bytes (all faces / layers)
    pub fn byte_size(&self) -> usize {
        let depth = match self.texture_type {
            TextureType::Tex3D => self.depth,
            _ => 1,
        };
        let height = match self.texture_type {
            TextureType::Tex1D => 1,
            _ => self.height,
        };
        self.width as usize
            * height as usize
            * depth as usize
            * self.face_count() as usize
            * self.resolved_format().bytes_per_pixel() as usize
    }
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., GlTexture).
/// The GPU texture is released when dropped.
pub trait Texture {
    fn specification(&self) -> &TextureSpecification;

    /// Bind on the currently active texture unit
    fn bind(&self);

    /// Activate texture unit `slot` and bind
    fn bind_to_unit(&self, slot: u32);

    fn unbind(&self);

    /// Replace the texture contents (all faces for cube maps)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `data.len()` differs from `specification().byte_size()`.
    fn upload(&self, data: &[u8]) -> Result<()>;

    fn native_id(&self) -> u32;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
