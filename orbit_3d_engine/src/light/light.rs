/// Lights: shared color/strength parameters plus point or directional data.
///
/// Lights are shared between the application and the materials that read
/// them as `Rc<RefCell<Light>>`; the application mutates, materials upload
/// the current values at bind time.

use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::Shader;
use crate::material::MaterialFlags;
use crate::uniforms;

// ===== POINT =====

/// Omnidirectional light with distance attenuation
/// `1 / (constant + linear·d + quadratic·d²)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

// ===== DIRECTIONAL =====

const DEFAULT_SHADOW_SIZE: f32 = 20.0;
const DEFAULT_SHADOW_DISTANCE: f32 = 10.0;

/// Parallel light with an orthographic shadow camera
///
/// The shadow camera sits at `target - normalize(direction) * distance` and
/// looks at `target`; every setter keeps it there.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    direction: Vec3,
    distance: f32,
    target: Vec3,
    shadow_camera: Camera,
}

impl DirectionalLight {
    /// # Errors
    ///
    /// `InvalidArgument` when `direction` is zero.
    pub fn new(direction: Vec3) -> Result<Self> {
        if direction.length_squared() <= f32::EPSILON {
            crate::engine_bail_warn!("orbit3d::Light", "Directional light needs a non-zero direction");
        }
        let mut light = Self {
            direction: direction.normalize(),
            distance: DEFAULT_SHADOW_DISTANCE,
            target: Vec3::ZERO,
            shadow_camera: Camera::orthographic(
                DEFAULT_SHADOW_SIZE,
                1.0,
                1.0,
                0.1,
                DEFAULT_SHADOW_DISTANCE * 2.0,
            ),
        };
        light.update_shadow_camera();
        Ok(light)
    }

    /// Unit direction the light travels in
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn shadow_camera(&self) -> &Camera {
        &self.shadow_camera
    }

    /// Position of the shadow camera
    pub fn shadow_position(&self) -> Vec3 {
        self.shadow_camera.position()
    }

    /// World -> shadow clip space
    pub fn light_space_matrix(&self) -> Mat4 {
        self.shadow_camera.view_projection_matrix()
    }

    /// # Errors
    ///
    /// `InvalidArgument` (logged, no change) when `direction` is zero.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        if direction.length_squared() <= f32::EPSILON {
            crate::engine_bail_warn!("orbit3d::Light", "Ignoring zero light direction");
        }
        self.direction = direction.normalize();
        self.update_shadow_camera();
        Ok(())
    }

    /// # Errors
    ///
    /// `InvalidArgument` (logged, no change) when `distance` is not positive.
    pub fn set_distance(&mut self, distance: f32) -> Result<()> {
        if distance <= 0.0 {
            crate::engine_bail_warn!("orbit3d::Light", "Shadow distance must be > 0, got {}", distance);
        }
        self.distance = distance;
        self.update_shadow_camera();
        Ok(())
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_shadow_camera();
    }

    /// Orthographic extent and clip range of the shadow camera
    pub fn set_shadow_projection(&mut self, size: f32, near: f32, far: f32) {
        self.shadow_camera.set_projection(crate::camera::Projection::Orthographic { size });
        self.shadow_camera.set_near_far(near, far);
    }

    fn update_shadow_camera(&mut self) {
        let position = self.target - self.direction * self.distance;
        self.shadow_camera.set_position(position);
        self.shadow_camera.look_at(self.target);
    }
}

// ===== LIGHT =====

#[derive(Debug, Clone)]
pub enum LightKind {
    Point(PointLight),
    Directional(DirectionalLight),
}

#[derive(Debug, Clone)]
pub struct Light {
    color: Vec3,
    ambient_strength: f32,
    diffuse_strength: f32,
    specular_strength: f32,
    kind: LightKind,
}

impl Light {
    pub fn new(kind: LightKind) -> Self {
        Self {
            color: Vec3::ONE,
            ambient_strength: 0.4,
            diffuse_strength: 0.6,
            specular_strength: 1.0,
            kind,
        }
    }

    pub fn point(position: Vec3) -> Self {
        Self::new(LightKind::Point(PointLight { position, ..Default::default() }))
    }

    pub fn directional(direction: Vec3) -> Result<Self> {
        Ok(Self::new(LightKind::Directional(DirectionalLight::new(direction)?)))
    }

    // ===== ACCESSORS =====

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn ambient_strength(&self) -> f32 {
        self.ambient_strength
    }

    pub fn diffuse_strength(&self) -> f32 {
        self.diffuse_strength
    }

    pub fn specular_strength(&self) -> f32 {
        self.specular_strength
    }

    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    pub fn as_point(&self) -> Option<&PointLight> {
        match &self.kind {
            LightKind::Point(point) => Some(point),
            LightKind::Directional(_) => None,
        }
    }

    pub fn as_point_mut(&mut self) -> Option<&mut PointLight> {
        match &mut self.kind {
            LightKind::Point(point) => Some(point),
            LightKind::Directional(_) => None,
        }
    }

    pub fn as_directional(&self) -> Option<&DirectionalLight> {
        match &self.kind {
            LightKind::Directional(directional) => Some(directional),
            LightKind::Point(_) => None,
        }
    }

    pub fn as_directional_mut(&mut self) -> Option<&mut DirectionalLight> {
        match &mut self.kind {
            LightKind::Directional(directional) => Some(directional),
            LightKind::Point(_) => None,
        }
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    pub fn set_ambient_strength(&mut self, strength: f32) {
        self.ambient_strength = strength;
    }

    pub fn set_diffuse_strength(&mut self, strength: f32) {
        self.diffuse_strength = strength;
    }

    pub fn set_specular_strength(&mut self, strength: f32) {
        self.specular_strength = strength;
    }

    // ===== UNIFORMS =====

    /// Upload the light to `shader`
    ///
    /// Base uniforms first (color, strengths), then the kind-specific ones.
    /// The light-space matrix is only uploaded for directional lights when
    /// `flags` requests shadows. Uniforms missing from the shader are
    /// logged and skipped.
    pub fn define_light_properties(&self, shader: &dyn Shader, flags: MaterialFlags) {
        shader.set_float3(uniforms::LIGHT_COLOR, self.color).ok();
        shader.set_float(uniforms::LIGHT_AMBIENT_STRENGTH, self.ambient_strength).ok();
        shader.set_float(uniforms::LIGHT_DIFFUSE_STRENGTH, self.diffuse_strength).ok();
        shader.set_float(uniforms::LIGHT_SPECULAR_STRENGTH, self.specular_strength).ok();

        match &self.kind {
            LightKind::Point(point) => {
                shader.set_float3(uniforms::LIGHT_POSITION, point.position).ok();
                shader.set_float(uniforms::LIGHT_CONSTANT, point.constant).ok();
                shader.set_float(uniforms::LIGHT_LINEAR, point.linear).ok();
                shader.set_float(uniforms::LIGHT_QUADRATIC, point.quadratic).ok();
            }
            LightKind::Directional(directional) => {
                shader.set_float3(uniforms::LIGHT_DIRECTION, directional.direction()).ok();
                if flags.contains(MaterialFlags::SHADOW_MAP) {
                    shader.set_mat4(uniforms::LIGHT_SPACE_MATRIX, &directional.light_space_matrix()).ok();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
