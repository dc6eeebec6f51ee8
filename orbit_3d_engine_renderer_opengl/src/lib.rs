/*!
# Orbit 3D Engine - OpenGL Renderer Backend

OpenGL implementation of the Orbit 3D rendering engine.

This crate implements the orbit_3d_engine `graphics_device` contracts on top of
the `glow` bindings. The windowing layer creates the context and makes it
current; `OpenGLDevice` takes it from there.

```no_run
use std::rc::Rc;
use orbit_3d_engine::orbit3d::{Renderer, device::RendererConfig};
use orbit_3d_engine_renderer_opengl::OpenGLDevice;

# fn load(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
# fn main() -> orbit_3d_engine::orbit3d::Result<()> {
let config = RendererConfig::default();
let device = unsafe { OpenGLDevice::from_loader_function(load, &config)? };
let renderer = Renderer::new(Rc::new(device), config);
# Ok(())
# }
```
*/

// OpenGL implementation modules
mod opengl;
mod gl_format;
mod gl_buffer;
mod gl_vertex_array;
mod gl_texture;
mod gl_shader;
mod gl_frame_buffer;
#[cfg_attr(not(feature = "opengl-debug-output"), allow(dead_code))]
mod gl_debug;

pub use opengl::OpenGLDevice;
pub use gl_buffer::GlBuffer;
pub use gl_vertex_array::GlVertexArray;
pub use gl_texture::GlTexture;
pub use gl_shader::GlShader;
pub use gl_frame_buffer::GlFramebuffer;

// Re-export debug utilities
pub use gl_debug::{debug_stats, reset_debug_stats, GlDebugStats};
