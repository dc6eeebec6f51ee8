//! Camera module: camera, culling frustum and input controller.
//!
//! Cameras are owned and driven by the caller; the renderer only reads them
//! in `begin_scene`.

mod camera;
mod frustum;
mod controller;

pub use camera::{Camera, Projection, MovementFactors};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use controller::CameraController;
