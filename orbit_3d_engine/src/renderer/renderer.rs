/// Renderer: draw-submission façade over a `GraphicsDevice`.
///
/// Owns the device handle, the configuration, the render context registries
/// and per-frame statistics. Drawing happens between `begin_scene` and
/// `end_scene`; the scene stores the camera data every draw uploads.
///
/// # Example
///
/// ```ignore
/// let mut renderer = Renderer::new(device, RendererConfig::default());
/// renderer.clear();
/// renderer.begin_scene(&camera);
/// model.draw_model(&mut renderer)?;
/// renderer.end_scene();
/// ```

use std::path::Path;
use std::rc::Rc;
use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::camera::{Camera, Frustum};
use crate::error::Result;
use crate::graphics_device::{
    ClearFlags, GraphicsDevice, PrimitiveType, RendererConfig, RendererStats, Shader, Texture,
};
use crate::material::{Material, MaterialFlags, TextureSlots};
use crate::resource::VertexArray;
use crate::scene::{Mesh, Model};
use crate::uniforms;
use super::render_context::RenderContext;

/// Camera data captured by `begin_scene`
#[derive(Debug, Clone, Copy)]
struct SceneData {
    view_projection: Mat4,
    view_position: Vec3,
    frustum: Frustum,
}

pub struct Renderer {
    device: Rc<dyn GraphicsDevice>,
    config: RendererConfig,
    context: RenderContext,
    scene: Option<SceneData>,
    stats: RendererStats,
    /// Receives the scene uniforms for draws without a material
    geometry_shader: Option<Rc<dyn Shader>>,
}

impl Renderer {
    /// Create a renderer and apply the fixed-function state of `config`
    pub fn new(device: Rc<dyn GraphicsDevice>, config: RendererConfig) -> Self {
        device.set_clear_color(config.clear_color);
        device.set_depth_test(config.depth_test);
        device.set_face_culling(config.face_culling);

        let limits = device.limits();
        crate::engine_info!(
            "orbit3d::Renderer",
            "Renderer initialized for '{}' (texture units {}, first slot {}, vertex attributes {})",
            config.app_name, limits.max_texture_units, config.first_texture_slot, limits.max_vertex_attributes
        );

        Self {
            device,
            config,
            context: RenderContext::new(),
            scene: None,
            stats: RendererStats::default(),
            geometry_shader: None,
        }
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &Rc<dyn GraphicsDevice> {
        &self.device
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = RendererStats::default();
    }

    pub fn in_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Fresh slot counter for a new material, starting at the configured slot
    pub fn texture_slots(&self) -> TextureSlots {
        TextureSlots::new(self.config.first_texture_slot, self.device.limits().max_texture_units)
    }

    /// 1x1 white texture for materials without an image
    pub fn white_texture(&self) -> Result<Rc<dyn Texture>> {
        self.context.white_textures.tex2d(self.device.as_ref())
    }

    /// Load a shader file into the shader library (cached by name)
    pub fn load_shader(&mut self, name: Option<&str>, path: impl AsRef<Path>) -> Result<Rc<dyn Shader>> {
        self.context.shader_library.load(self.device.as_ref(), name, path)
    }

    // ===== STATE =====

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.config.clear_color = color;
        self.device.set_clear_color(color);
    }

    /// Clear color and depth of the bound framebuffer
    pub fn clear(&self) {
        self.device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
    }

    /// # Errors
    ///
    /// `InvalidArgument` (logged, viewport unchanged) for a zero size.
    pub fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            crate::engine_bail_warn!("orbit3d::Renderer", "Ignoring empty viewport {}x{}", width, height);
        }
        self.device.set_viewport(x, y, width, height);
        Ok(())
    }

    /// Shader that receives `u_ViewProjection`/`u_Transform` for draws
    /// without a material (e.g. a depth-only pass). The caller binds it.
    pub fn set_geometry_shader(&mut self, shader: Option<Rc<dyn Shader>>) {
        self.geometry_shader = shader;
    }

    // ===== SCENE =====

    pub fn begin_scene(&mut self, camera: &Camera) {
        if self.scene.is_some() {
            crate::engine_warn!("orbit3d::Renderer", "begin_scene called twice without end_scene");
        }
        self.scene = Some(SceneData {
            view_projection: camera.view_projection_matrix(),
            view_position: camera.position(),
            frustum: camera.frustum(),
        });
    }

    pub fn end_scene(&mut self) {
        if self.scene.take().is_none() {
            crate::engine_warn!("orbit3d::Renderer", "end_scene called without begin_scene");
        }
    }

    // ===== DRAW =====

    /// Draw a triangle vertex array with an optional material
    pub fn submit(&mut self, vertex_array: &VertexArray, material: Option<&dyn Material>, transform: &Mat4) -> Result<()> {
        self.submit_primitive(vertex_array, material, transform, PrimitiveType::Triangles)
    }

    /// Bind the material, upload the scene uniforms and draw
    ///
    /// Indexed when the vertex array has an index buffer; otherwise one draw
    /// per segment of the first vertex buffer (or one for the whole buffer).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged) outside `begin_scene`/`end_scene`; material
    /// bind errors are returned after the material is unbound.
    pub fn submit_primitive(
        &mut self,
        vertex_array: &VertexArray,
        material: Option<&dyn Material>,
        transform: &Mat4,
        primitive: PrimitiveType,
    ) -> Result<()> {
        let Some(scene) = self.scene else {
            crate::engine_bail_warn!("orbit3d::Renderer", "Draw outside begin_scene/end_scene skipped");
        };

        match material {
            Some(material) => {
                if let Err(error) = material.bind() {
                    material.unbind();
                    return Err(error);
                }
                let shader = material.shader().as_ref();
                shader.set_mat4(uniforms::VIEW_PROJECTION, &scene.view_projection).ok();
                shader.set_mat4(uniforms::TRANSFORM, transform).ok();
                let flags = material.flags();
                if flags.contains(MaterialFlags::VIEW_DIRECTION) {
                    shader.set_float3(uniforms::VIEW_POSITION, scene.view_position).ok();
                }
                if flags.contains(MaterialFlags::NORMAL_MATRIX) {
                    match normal_matrix(transform) {
                        Some(normal_matrix) => {
                            shader.set_mat3(uniforms::NORMAL_MATRIX, &normal_matrix).ok();
                        }
                        None => crate::engine_trace!(
                            "orbit3d::Renderer",
                            "Singular transform, u_NormalMatrix not uploaded"
                        ),
                    }
                }
            }
            None => {
                if let Some(shader) = &self.geometry_shader {
                    shader.set_mat4(uniforms::VIEW_PROJECTION, &scene.view_projection).ok();
                    shader.set_mat4(uniforms::TRANSFORM, transform).ok();
                }
            }
        }

        vertex_array.bind();
        self.draw_vertex_array(vertex_array, primitive);
        vertex_array.unbind();

        if let Some(material) = material {
            material.unbind();
        }
        Ok(())
    }

    /// Draw one mesh; a mesh never uploaded is logged and skipped
    pub fn draw_mesh(&mut self, mesh: &Mesh, transform: &Mat4) -> Result<()> {
        let Some(vertex_array) = mesh.vertex_array() else {
            crate::engine_bail_warn!("orbit3d::Renderer", "Mesh '{}' was never uploaded, skipped", mesh.name());
        };
        let material = mesh.material().map(|material| material.as_ref());
        self.submit_primitive(vertex_array, material, transform, mesh.primitive())
    }

    /// Recompute the model matrix and draw every mesh
    ///
    /// With `frustum_culling`, a model whose world bounds miss the camera
    /// frustum is skipped and counted in `stats().culled_models`. Meshes that
    /// were never uploaded are logged and skipped.
    ///
    /// # Errors
    ///
    /// The first mesh draw error, returned once every other mesh was drawn.
    pub fn draw_model(&mut self, model: &mut Model) -> Result<()> {
        let Some(scene) = self.scene else {
            crate::engine_bail_warn!("orbit3d::Renderer", "Model '{}' drawn outside a scene, skipped", model.name());
        };

        model.update_model_matrix();

        if self.config.frustum_culling {
            let bounds = model.world_bounding_box();
            if !bounds.is_empty() && !scene.frustum.intersects_box(&bounds) {
                self.stats.culled_models += 1;
                crate::engine_trace!("orbit3d::Renderer", "Culled model '{}'", model.name());
                return Ok(());
            }
        }

        let transform = *model.model_matrix();
        let mut first_error = None;
        for mesh in model.meshes() {
            if !mesh.is_uploaded() {
                crate::engine_warn!(
                    "orbit3d::Renderer",
                    "Mesh '{}' of model '{}' was never uploaded, skipped",
                    mesh.name(), model.name()
                );
                continue;
            }
            if let Err(error) = self.draw_mesh(mesh, &transform) {
                crate::engine_warn!(
                    "orbit3d::Renderer",
                    "Mesh '{}' of model '{}' skipped: {}",
                    mesh.name(), model.name(), error
                );
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn draw_vertex_array(&mut self, vertex_array: &VertexArray, primitive: PrimitiveType) {
        if let Some(index_buffer) = vertex_array.index_buffer() {
            let count = index_buffer.count();
            self.device.draw_indexed(primitive, count);
            self.stats.draw_calls += 1;
            self.stats.indices += count;
            return;
        }

        let Some(vertex_buffer) = vertex_array.vertex_buffers().first() else {
            crate::engine_warn!("orbit3d::Renderer", "Vertex array {} has no buffers", vertex_array.native_id());
            return;
        };
        if vertex_buffer.segments().is_empty() {
            self.device.draw_arrays(primitive, 0, vertex_buffer.vertex_count());
            self.stats.draw_calls += 1;
            self.stats.indices += vertex_buffer.vertex_count();
        } else {
            for segment in vertex_buffer.segments() {
                self.device.draw_arrays(primitive, segment.first_vertex, segment.vertex_count);
                self.stats.draw_calls += 1;
                self.stats.indices += segment.vertex_count;
            }
        }
    }
}

/// Inverse-transpose of the upper 3x3, `None` for a singular transform
pub(crate) fn normal_matrix(transform: &Mat4) -> Option<Mat3> {
    let linear = Mat3::from_mat4(*transform);
    (linear.determinant().abs() > f32::EPSILON).then(|| linear.inverse().transpose())
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
