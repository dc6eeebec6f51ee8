//! Models: a set of meshes placed in the world by one transform.
//!
//! The model matrix is composed as
//!
//! ```text
//! T(c) · T(p) · T(-c) · S · R(q) · U · T(-c)
//! ```
//!
//! with `c` the bounding-box center, `p` the position, `S` the scale, `q`
//! the rotation from Euler degrees and `U` the rotation taking the up-axis
//! to +Y.

use std::rc::Rc;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::material::Material;
use crate::renderer::Renderer;
use super::bounding_box::BoundingBox;
use super::mesh::Mesh;

pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    bounding_box: BoundingBox,

    position: Vec3,
    /// Euler angles in degrees (x, y, z)
    rotation: Vec3,
    scale: Vec3,
    up_axis: Vec3,

    model_matrix: Mat4,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self::from_meshes(name, Vec::new())
    }

    pub fn from_meshes(name: &str, meshes: Vec<Mesh>) -> Self {
        let mut model = Self {
            name: name.to_string(),
            meshes: Vec::new(),
            bounding_box: BoundingBox::EMPTY,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            up_axis: Vec3::Y,
            model_matrix: Mat4::IDENTITY,
        };
        for mesh in meshes {
            model.add_mesh(mesh);
        }
        model.update_model_matrix();
        model
    }

    /// Append a mesh and grow the bounding box to its vertices
    pub fn add_mesh(&mut self, mesh: Mesh) {
        for vertex in mesh.vertices() {
            self.bounding_box.extend(vertex.position());
        }
        self.meshes.push(mesh);
        self.update_model_matrix();
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    /// Local-space bounds
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// World-space bounds under the current model matrix
    pub fn world_bounding_box(&self) -> BoundingBox {
        self.bounding_box.transformed(&self.model_matrix)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn up_axis(&self) -> Vec3 {
        self.up_axis
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    // ===== TRANSFORM =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_model_matrix();
    }

    /// Euler angles in degrees
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_model_matrix();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.update_model_matrix();
    }

    /// Axis the source data considers "up" (e.g. +Z for many CAD exports)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged, no change) for a zero axis.
    pub fn set_up_axis(&mut self, up_axis: Vec3) -> Result<()> {
        if up_axis.length_squared() <= f32::EPSILON {
            crate::engine_bail_warn!("orbit3d::Model", "Model '{}': up axis must be non-zero", self.name);
        }
        self.up_axis = up_axis.normalize();
        self.update_model_matrix();
        Ok(())
    }

    /// Recompose the model matrix from the current transform
    pub fn update_model_matrix(&mut self) {
        let center = self.bounding_box.center();
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        let up = if (self.up_axis - Vec3::Y).length() <= f32::EPSILON {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(self.up_axis, Vec3::Y)
        };

        self.model_matrix = Mat4::from_translation(center)
            * Mat4::from_translation(self.position)
            * Mat4::from_translation(-center)
            * Mat4::from_scale(self.scale)
            * Mat4::from_quat(rotation)
            * Mat4::from_quat(up)
            * Mat4::from_translation(-center);
    }

    // ===== GPU =====

    /// Upload every mesh
    pub fn upload(&mut self, device: &dyn GraphicsDevice) -> Result<()> {
        for mesh in &mut self.meshes {
            mesh.upload(device)?;
        }
        Ok(())
    }

    /// Give every mesh the same material
    pub fn set_material(&mut self, material: Rc<dyn Material>) {
        for mesh in &mut self.meshes {
            mesh.set_material(Some(material.clone()));
        }
    }

    /// Recompute the matrix and draw every mesh with it
    pub fn draw_model(&mut self, renderer: &mut Renderer) -> Result<()> {
        renderer.draw_model(self)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("meshes", &self.meshes)
            .field("bounding_box", &self.bounding_box)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("up_axis", &self.up_axis)
            .finish()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
