/// Buffer - OpenGL implementation of the Buffer trait

use std::rc::Rc;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Result,
    device::{self, Buffer, BufferDesc, BufferUsage},
};
use orbit_3d_engine::{engine_bail, engine_bail_warn, engine_trace};

use crate::gl_format;

/// OpenGL buffer object
pub struct GlBuffer {
    gl: Rc<glow::Context>,
    pub(crate) buffer: glow::NativeBuffer,
    target: u32,
    usage: BufferUsage,
    size: u64,
}

impl GlBuffer {
    /// Allocate the buffer and upload the initial data if any
    pub(crate) fn new(gl: Rc<glow::Context>, desc: BufferDesc<'_>) -> Result<Self> {
        if let Some(data) = desc.data {
            if data.len() as u64 != desc.size {
                engine_bail_warn!(
                    "orbit3d::opengl",
                    "Buffer data is {} bytes but the buffer size is {}",
                    data.len(), desc.size
                );
            }
        }
        let Ok(size) = i32::try_from(desc.size) else {
            engine_bail_warn!("orbit3d::opengl", "Buffer size {} exceeds the GL limit", desc.size);
        };

        let target = gl_format::buffer_target(desc.usage);
        let hint = gl_format::buffer_usage_hint(desc.access);

        let buffer = unsafe {
            let buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(message) => engine_bail!("orbit3d::opengl", "glCreateBuffer failed: {}", message),
            };
            gl.bind_buffer(target, Some(buffer));
            match desc.data {
                Some(data) => gl.buffer_data_u8_slice(target, data, hint),
                None => gl.buffer_data_size(target, size, hint),
            }
            // The element binding is vertex array state, leave it alone
            if target != glow::ELEMENT_ARRAY_BUFFER {
                gl.bind_buffer(target, None);
            }
            buffer
        };

        engine_trace!(
            "orbit3d::opengl",
            "Created {:?} buffer {} ({} bytes)",
            desc.usage, buffer.0.get(), desc.size
        );

        Ok(Self {
            gl,
            buffer,
            target,
            usage: desc.usage,
            size: desc.size,
        })
    }
}

impl Buffer for GlBuffer {
    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(self.target, Some(self.buffer));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(self.target, None);
        }
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        device::check_buffer_range(self.size, offset, data.len())?;

        unsafe {
            self.gl.bind_buffer(self.target, Some(self.buffer));
            self.gl.buffer_sub_data_u8_slice(self.target, offset as i32, data);
            if self.target != glow::ELEMENT_ARRAY_BUFFER {
                self.gl.bind_buffer(self.target, None);
            }
        }
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.buffer.0.get()
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}
