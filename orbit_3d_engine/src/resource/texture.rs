/// Texture factories, image loading and the white fallback textures
///
/// Dimension-specific behaviour is carried by marker types implementing
/// `TextureDimension`; the factories are generic over them.

use std::cell::OnceCell;
use std::path::Path;
use std::rc::Rc;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, Texture, TextureFilter, TextureFormat, TextureSpecification, TextureType,
    TextureWrap,
};

// ===== DIMENSIONS =====

/// Texture dimensionality marker
pub trait TextureDimension {
    const TEXTURE_TYPE: TextureType;

    /// Populate the size fields of `spec` from a single edge length
    fn set_size(spec: &mut TextureSpecification, size: u32);
}

/// 1D texture (width)
pub struct Tex1D;

/// Square 2D texture (width = height)
pub struct Tex2D;

/// Cubic 3D texture (width = height = depth)
pub struct Tex3D;

/// Cube map, six square faces
pub struct TexCube;

impl TextureDimension for Tex1D {
    const TEXTURE_TYPE: TextureType = TextureType::Tex1D;

    fn set_size(spec: &mut TextureSpecification, size: u32) {
        spec.width = size;
        spec.height = 1;
        spec.depth = 1;
    }
}

impl TextureDimension for Tex2D {
    const TEXTURE_TYPE: TextureType = TextureType::Tex2D;

    fn set_size(spec: &mut TextureSpecification, size: u32) {
        spec.width = size;
        spec.height = size;
        spec.depth = 1;
    }
}

impl TextureDimension for Tex3D {
    const TEXTURE_TYPE: TextureType = TextureType::Tex3D;

    fn set_size(spec: &mut TextureSpecification, size: u32) {
        spec.width = size;
        spec.height = size;
        spec.depth = size;
    }
}

impl TextureDimension for TexCube {
    const TEXTURE_TYPE: TextureType = TextureType::Cube;

    fn set_size(spec: &mut TextureSpecification, size: u32) {
        spec.width = size;
        spec.height = size;
        spec.depth = 1;
    }
}

// ===== FACTORIES =====

/// Create an empty texture of dimension `D`
///
/// # Arguments
///
/// * `device` - Graphics device
/// * `size` - Edge length (see `TextureDimension::set_size`)
/// * `spec` - Format, wrap and filter; size and type are overwritten
pub fn create<D: TextureDimension>(
    device: &dyn GraphicsDevice,
    size: u32,
    spec: TextureSpecification,
) -> Result<Rc<dyn Texture>> {
    device.create_texture(sized_spec::<D>(size, spec), None)
}

/// Create a texture of dimension `D` and upload `data`
pub fn create_from_data<D: TextureDimension>(
    device: &dyn GraphicsDevice,
    size: u32,
    spec: TextureSpecification,
    data: &[u8],
) -> Result<Rc<dyn Texture>> {
    device.create_texture(sized_spec::<D>(size, spec), Some(data))
}

fn sized_spec<D: TextureDimension>(size: u32, mut spec: TextureSpecification) -> TextureSpecification {
    spec.texture_type = D::TEXTURE_TYPE;
    D::set_size(&mut spec, size);
    spec
}

/// Load an image file into a 2D texture
///
/// Unset specification fields are inferred from the image
/// (see `update_specs_texture_resource`).
pub fn create_from_file(
    device: &dyn GraphicsDevice,
    path: impl AsRef<Path>,
    spec: TextureSpecification,
) -> Result<Rc<dyn Texture>> {
    let image = decode_image(path.as_ref())?;
    create_from_image(device, &image, spec)
}

/// Create a 2D texture from already decoded pixels
pub fn create_from_image(
    device: &dyn GraphicsDevice,
    image: &DecodedImage,
    mut spec: TextureSpecification,
) -> Result<Rc<dyn Texture>> {
    spec.texture_type = TextureType::Tex2D;
    spec.width = image.width;
    spec.height = image.height;
    spec.depth = 1;
    update_specs_texture_resource(&mut spec, image.channels, &image.extension);

    crate::engine_debug!(
        "orbit3d::Texture",
        "Creating {}x{} {:?} texture ({} channels, .{})",
        image.width, image.height, spec.resolved_format(), image.channels, image.extension
    );
    device.create_texture(spec, Some(image.pixels.as_slice()))
}

// ===== IMAGE DECODING =====

/// Pixels decoded from an image file, flipped vertically
///
/// HDR images hold native-endian `f32` channels, other images one byte per
/// channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    /// Lower-case file extension without the dot
    pub extension: String,
}

/// Decode an image file with the `image` crate
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let image = match image::open(path) {
        Ok(image) => image.flipv(),
        Err(error) => crate::engine_bail!(
            "orbit3d::Texture",
            Io => "Failed to load image '{}': {}",
            path.display(), error
        ),
    };

    let (width, height) = (image.width(), image.height());

    let (pixels, channels) = if is_hdr_extension(&extension) {
        let rgb = image.into_rgb32f();
        (bytemuck::cast_slice::<f32, u8>(rgb.as_raw()).to_vec(), 3)
    } else {
        match image.color().channel_count() {
            1 => (image.into_luma8().into_raw(), 1),
            2 => (image.into_luma_alpha8().into_raw(), 2),
            3 => (image.into_rgb8().into_raw(), 3),
            _ => (image.into_rgba8().into_raw(), 4),
        }
    };

    Ok(DecodedImage { pixels, width, height, channels, extension })
}

/// Case-insensitive `hdr` extension check
pub fn is_hdr_extension(extension: &str) -> bool {
    extension.eq_ignore_ascii_case("hdr")
}

/// Fill the unset parts of `spec` for an image with `channels` channels
///
/// - format: from the channel count (32-bit float formats for HDR)
/// - HDR: clamp to edge, linear filtering, no mipmaps
/// - otherwise: repeat, trilinear filtering with generated mipmaps
pub fn update_specs_texture_resource(spec: &mut TextureSpecification, channels: u32, extension: &str) {
    let hdr = is_hdr_extension(extension);

    if spec.format.is_none() {
        spec.format = Some(TextureFormat::from_channel_count(channels, hdr));
    }

    if hdr {
        spec.wrap.get_or_insert(TextureWrap::ClampToEdge);
        spec.filter.get_or_insert(TextureFilter::Linear);
        spec.generate_mipmaps = false;
    } else {
        spec.wrap.get_or_insert(TextureWrap::Repeat);
        if spec.filter.is_none() {
            spec.filter = Some(TextureFilter::LinearMipmapLinear);
            spec.generate_mipmaps = true;
        }
    }
}

// ===== WHITE TEXTURES =====

/// 1x1 opaque white textures, one per dimension, created on first use
///
/// Bound when a material has no texture so samplers always read 1.0.
#[derive(Default)]
pub struct WhiteTextures {
    tex1d: OnceCell<Rc<dyn Texture>>,
    tex2d: OnceCell<Rc<dyn Texture>>,
    tex3d: OnceCell<Rc<dyn Texture>>,
    cube: OnceCell<Rc<dyn Texture>>,
}

impl WhiteTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tex1d(&self, device: &dyn GraphicsDevice) -> Result<Rc<dyn Texture>> {
        Self::get_or_create::<Tex1D>(&self.tex1d, device)
    }

    pub fn tex2d(&self, device: &dyn GraphicsDevice) -> Result<Rc<dyn Texture>> {
        Self::get_or_create::<Tex2D>(&self.tex2d, device)
    }

    pub fn tex3d(&self, device: &dyn GraphicsDevice) -> Result<Rc<dyn Texture>> {
        Self::get_or_create::<Tex3D>(&self.tex3d, device)
    }

    pub fn cube(&self, device: &dyn GraphicsDevice) -> Result<Rc<dyn Texture>> {
        Self::get_or_create::<TexCube>(&self.cube, device)
    }

    fn get_or_create<D: TextureDimension>(
        cell: &OnceCell<Rc<dyn Texture>>,
        device: &dyn GraphicsDevice,
    ) -> Result<Rc<dyn Texture>> {
        if let Some(texture) = cell.get() {
            return Ok(texture.clone());
        }

        let spec = TextureSpecification {
            format: Some(TextureFormat::Rgba8),
            wrap: Some(TextureWrap::Repeat),
            filter: Some(TextureFilter::Nearest),
            ..Default::default()
        };
        let spec = sized_spec::<D>(1, spec);
        let data = vec![0xFFu8; spec.byte_size()];
        let texture = device.create_texture(spec, Some(data.as_slice()))?;

        Ok(cell.get_or_init(|| texture).clone())
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
