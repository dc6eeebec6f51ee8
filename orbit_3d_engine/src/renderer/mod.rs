//! Renderer module

mod render_context;
mod renderer;

pub use render_context::RenderContext;
pub use renderer::Renderer;
pub(crate) use renderer::normal_matrix;
