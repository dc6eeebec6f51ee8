//! Light module

mod light;

pub use light::{Light, LightKind, PointLight, DirectionalLight};
