use glam::Vec3;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{GraphicsDevice, ShaderDesc, ShaderSources, UniformValue};
use crate::material::MaterialFlags;
use super::*;

// ============================================================================
// Helpers
// ============================================================================

const LIGHT_SHADER: &str = "
uniform vec3 u_Light.Color; uniform float u_Light.AmbientStrength;
uniform float u_Light.DiffuseStrength; uniform float u_Light.SpecularStrength;
uniform vec3 u_Light.Position; uniform float u_Light.Constant;
uniform float u_Light.Linear; uniform float u_Light.Quadratic;
uniform vec3 u_Light.Direction; uniform mat4 u_LightSpaceMatrix;
";

fn light_shader(device: &MockGraphicsDevice) -> std::rc::Rc<dyn crate::graphics_device::Shader> {
    device
        .create_shader(ShaderDesc {
            name: "lighted".to_string(),
            sources: ShaderSources {
                vertex: LIGHT_SHADER.to_string(),
                fragment: "void main() {}".to_string(),
                geometry: None,
            },
        })
        .unwrap()
}

fn assert_shadow_invariant(light: &DirectionalLight) {
    let expected = light.target() - light.direction().normalize() * light.distance();
    assert!((light.shadow_position() - expected).length() < 1e-4);
}

// ============================================================================
// Light tests
// ============================================================================

#[test]
fn test_default_strengths() {
    let light = Light::point(Vec3::ZERO);
    assert_eq!(light.ambient_strength(), 0.4);
    assert_eq!(light.diffuse_strength(), 0.6);
    assert_eq!(light.specular_strength(), 1.0);
    assert_eq!(light.color(), Vec3::ONE);
}

#[test]
fn test_setters() {
    let mut light = Light::point(Vec3::ZERO);
    light.set_color(Vec3::new(1.0, 0.5, 0.0));
    light.set_ambient_strength(0.1);
    light.set_diffuse_strength(0.2);
    light.set_specular_strength(0.3);
    light.as_point_mut().unwrap().position = Vec3::Y;

    assert_eq!(light.color(), Vec3::new(1.0, 0.5, 0.0));
    assert_eq!(light.ambient_strength(), 0.1);
    assert_eq!(light.diffuse_strength(), 0.2);
    assert_eq!(light.specular_strength(), 0.3);
    assert_eq!(light.as_point().unwrap().position, Vec3::Y);
    assert!(light.as_directional().is_none());
}

// ============================================================================
// Directional light tests
// ============================================================================

#[test]
fn test_zero_direction_rejected() {
    assert!(matches!(DirectionalLight::new(Vec3::ZERO), Err(Error::InvalidArgument(_))));
    assert!(Light::directional(Vec3::ZERO).is_err());
}

#[test]
fn test_shadow_position_follows_every_mutation() {
    let mut light = DirectionalLight::new(Vec3::new(-1.0, -1.0, 0.0)).unwrap();
    assert_shadow_invariant(&light);

    light.set_direction(Vec3::new(0.0, -1.0, -1.0)).unwrap();
    assert_shadow_invariant(&light);

    light.set_distance(25.0).unwrap();
    assert_shadow_invariant(&light);

    light.set_target(Vec3::new(3.0, 0.0, -2.0));
    assert_shadow_invariant(&light);

    // Rejected mutations keep the invariant too
    assert!(light.set_direction(Vec3::ZERO).is_err());
    assert!(light.set_distance(-1.0).is_err());
    assert_eq!(light.distance(), 25.0);
    assert_shadow_invariant(&light);
}

#[test]
fn test_shadow_camera_looks_at_target() {
    let mut light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0)).unwrap();
    light.set_target(Vec3::new(1.0, 0.0, 1.0));

    let forward = light.shadow_camera().forward();
    assert!((forward - light.direction()).length() < 1e-4);
}

#[test]
fn test_light_space_matrix_maps_target_inside_clip_volume() {
    let light = DirectionalLight::new(Vec3::new(-0.3, -1.0, -0.2)).unwrap();
    let clip = light.light_space_matrix() * light.target().extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.abs().max_element() <= 1.0);
}

// ============================================================================
// Uniform upload tests
// ============================================================================

#[test]
fn test_point_light_uniform_order() {
    let device = MockGraphicsDevice::new();
    let shader = light_shader(&device);
    let light = Light::point(Vec3::new(1.0, 2.0, 3.0));

    light.define_light_properties(shader.as_ref(), MaterialFlags::empty());

    let names: Vec<String> = device.uniforms().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "u_Light.Color",
            "u_Light.AmbientStrength",
            "u_Light.DiffuseStrength",
            "u_Light.SpecularStrength",
            "u_Light.Position",
            "u_Light.Constant",
            "u_Light.Linear",
            "u_Light.Quadratic",
        ]
    );
    assert_eq!(device.uniform("u_Light.Position"), Some(UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0))));
}

#[test]
fn test_directional_light_space_matrix_only_with_shadow_flag() {
    let device = MockGraphicsDevice::new();
    let shader = light_shader(&device);
    let light = Light::directional(Vec3::new(0.0, -1.0, 0.0)).unwrap();

    light.define_light_properties(shader.as_ref(), MaterialFlags::empty());
    assert!(device.uniform("u_LightSpaceMatrix").is_none());
    assert!(device.uniform("u_Light.Direction").is_some());

    light.define_light_properties(shader.as_ref(), MaterialFlags::SHADOW_MAP);
    let expected = light.as_directional().unwrap().light_space_matrix();
    assert_eq!(device.uniform("u_LightSpaceMatrix"), Some(UniformValue::Mat4(expected)));
}
