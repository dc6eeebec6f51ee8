/*!
# Orbit 3D Engine

Core traits and types for the Orbit 3D rendering engine.

This crate provides the platform-agnostic API for 3D rendering. Application code
describes meshes, materials, lights, cameras, textures and framebuffers against the
contracts defined here; backend crates (OpenGL, ...) implement the contracts with
native GPU calls.

## Architecture

- **GraphicsDevice**: Factory + state trait implemented by each backend
- **Buffer / VertexArrayBinding / Texture / Shader / Framebuffer**: GPU resource contracts
- **resource**: Engine-level buffers, vertex arrays, texture factories, shader library
- **camera / light / material**: Scene description and per-frame uniform binding
- **scene**: Meshes and models with their transform pipeline
- **Renderer**: Draw-submission façade owning the render context registries

All GPU work happens on the thread that owns the graphics context. Shared
resources use `Rc`, GPU handles are released when their owner is dropped.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod uniforms;
pub mod camera;
pub mod light;
pub mod material;
pub mod scene;
pub mod renderer;

// Main orbit3d namespace module
pub mod orbit3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging hub)
    pub use crate::engine::Engine;

    // Draw-submission façade
    pub use crate::renderer::{Renderer, RenderContext};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend contracts
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Light sub-module
    pub mod light {
        pub use crate::light::*;
    }

    // Material sub-module
    pub mod material {
        pub use crate::material::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
