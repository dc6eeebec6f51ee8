/// Graphics device module - backend contracts and the engine enums they speak

// Module declarations
pub mod graphics_device;
pub mod data_type;
pub mod buffer;
pub mod vertex_array;
pub mod texture;
pub mod shader;
pub mod frame_buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use data_type::*;
pub use buffer::*;
pub use vertex_array::*;
pub use texture::*;
pub use shader::*;
pub use frame_buffer::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
