//! Engine-level GPU resources
//!
//! Wraps the backend contracts with the data the engine tracks on the CPU
//! side: buffer layouts, vertex array attribute cursors, texture factories and
//! the shader library.

pub mod buffer_layout;
pub mod vertex_buffer;
pub mod vertex_array;
pub mod texture;
pub mod shader;

pub use buffer_layout::{BufferElement, BufferLayout};
pub use vertex_buffer::{VertexBuffer, IndexBuffer, BufferSegment};
pub use vertex_array::VertexArray;
pub use texture::{
    TextureDimension, Tex1D, Tex2D, Tex3D, TexCube,
    DecodedImage, WhiteTextures,
    create, create_from_data, create_from_file, create_from_image,
    decode_image, update_specs_texture_resource, is_hdr_extension,
};
pub use shader::{ShaderLibrary, parse_shader_source};
