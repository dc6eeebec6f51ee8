/// Camera: position/rotation driven view and projection matrices.
///
/// Every setter recomputes the affected matrix immediately, so getters always
/// return up-to-date values. Rotation is stored as Euler angles in degrees
/// (pitch around X, yaw around Y, roll around Z) and applied in Y-X-Z order.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use crate::error::Result;
use super::frustum::Frustum;

/// Pitch stays away from the poles so yaw remains meaningful
const MAX_PITCH_DEGREES: f32 = 89.0;
const MIN_ORTHOGRAPHIC_SIZE: f32 = 0.01;

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees
    Perspective { fov_y_degrees: f32 },
    /// Visible height in world units
    Orthographic { size: f32 },
}

/// Scale applied to user input by `zoom`, `translate`, `rotate` and `orbit`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementFactors {
    pub zoom: f32,
    pub translate: f32,
    /// Degrees per input unit
    pub rotate: f32,
    /// Degrees per input unit
    pub orbit: f32,
}

impl Default for MovementFactors {
    fn default() -> Self {
        Self {
            zoom: 0.5,
            translate: 0.01,
            rotate: 0.2,
            orbit: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    target: Vec3,
    width: f32,
    height: f32,
    near: f32,
    far: f32,
    projection: Projection,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    factors: MovementFactors,
}

impl Camera {
    /// Perspective camera at the origin looking down -Z
    ///
    /// # Arguments
    ///
    /// * `fov_y_degrees` - Vertical field of view
    /// * `width`, `height` - Viewport size (aspect ratio)
    /// * `near`, `far` - Clip planes
    pub fn perspective(fov_y_degrees: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::with_projection(Projection::Perspective { fov_y_degrees }, width, height, near, far)
    }

    /// Orthographic camera showing `size` world units vertically
    pub fn orthographic(size: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::with_projection(Projection::Orthographic { size }, width, height, near, far)
    }

    /// A non-positive viewport size is logged and replaced by 1x1
    pub fn with_projection(projection: Projection, width: f32, height: f32, near: f32, far: f32) -> Self {
        let (width, height) = if width <= 0.0 || height <= 0.0 {
            crate::engine_warn!(
                "orbit3d::Camera",
                "Invalid viewport size {}x{}, using 1x1",
                width, height
            );
            (1.0, 1.0)
        } else {
            (width, height)
        };
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            target: Vec3::ZERO,
            width,
            height,
            near,
            far,
            projection,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            factors: MovementFactors::default(),
        };
        camera.update_view();
        camera.update_projection();
        camera
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in degrees (pitch, yaw, roll)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Orbit center
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn movement_factors(&self) -> &MovementFactors {
        &self.factors
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Culling planes of `projection × view`
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    /// Set Euler angles in degrees (pitch, yaw, roll)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_view();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Resize the viewport
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged, camera unchanged) when a dimension is <= 0.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) -> Result<()> {
        if width <= 0.0 || height <= 0.0 {
            crate::engine_bail_warn!(
                "orbit3d::Camera",
                "Invalid viewport size {}x{}",
                width, height
            );
        }
        self.width = width;
        self.height = height;
        self.update_projection();
        Ok(())
    }

    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_projection();
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_projection();
    }

    /// Change the field of view (switches to a perspective projection)
    pub fn set_fov(&mut self, fov_y_degrees: f32) {
        self.set_projection(Projection::Perspective { fov_y_degrees });
    }

    pub fn set_movement_factors(&mut self, factors: MovementFactors) {
        self.factors = factors;
    }

    // ===== MOVEMENT =====

    /// Move along the view direction (perspective) or shrink the visible
    /// area (orthographic)
    pub fn zoom(&mut self, delta: f32) {
        let amount = delta * self.factors.zoom;
        match self.projection {
            Projection::Perspective { .. } => {
                self.position += self.forward() * amount;
                self.update_view();
            }
            Projection::Orthographic { size } => {
                let size = (size - amount).max(MIN_ORTHOGRAPHIC_SIZE);
                self.set_projection(Projection::Orthographic { size });
            }
        }
    }

    /// Pan in the view plane; the orbit target follows
    pub fn translate(&mut self, delta: Vec2) {
        let offset = (-self.right() * delta.x + self.up() * delta.y) * self.factors.translate;
        self.position += offset;
        self.target += offset;
        self.update_view();
    }

    /// Turn in place (yaw from x, pitch from y)
    pub fn rotate(&mut self, delta: Vec2) {
        self.rotation.y -= delta.x * self.factors.rotate;
        self.rotation.x = (self.rotation.x - delta.y * self.factors.rotate)
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        self.update_view();
    }

    /// Rotate around the target, keeping the distance to it
    pub fn orbit(&mut self, delta: Vec2) {
        let distance = (self.position - self.target).length();
        self.rotation.y -= delta.x * self.factors.orbit;
        self.rotation.x = (self.rotation.x - delta.y * self.factors.orbit)
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        self.position = self.target - self.forward() * distance;
        self.update_view();
    }

    /// Point the camera at `target` (roll is kept) and make it the orbit target
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        let direction = target - self.position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        let direction = direction.normalize();
        self.rotation.y = (-direction.x).atan2(-direction.z).to_degrees();
        self.rotation.x = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.update_view();
    }

    // ===== INTERNAL =====

    fn update_view(&mut self) {
        self.view_matrix = Mat4::from_rotation_translation(self.orientation(), self.position).inverse();
    }

    fn update_projection(&mut self) {
        let aspect = self.aspect_ratio();
        self.projection_matrix = match self.projection {
            Projection::Perspective { fov_y_degrees } => {
                Mat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect, self.near, self.far)
            }
            Projection::Orthographic { size } => {
                let half_height = size * 0.5;
                let half_width = half_height * aspect;
                Mat4::orthographic_rh_gl(
                    -half_width, half_width,
                    -half_height, half_height,
                    self.near, self.far,
                )
            }
        };
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
