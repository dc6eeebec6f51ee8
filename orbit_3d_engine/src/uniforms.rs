//! Uniform names shared by the engine and its shaders

// ===== RENDERER =====

pub const VIEW_PROJECTION: &str = "u_ViewProjection";
pub const TRANSFORM: &str = "u_Transform";
pub const VIEW_POSITION: &str = "u_ViewPosition";
pub const NORMAL_MATRIX: &str = "u_NormalMatrix";

// ===== MATERIAL =====

pub const MATERIAL_COLOR: &str = "u_Material.Color";
pub const MATERIAL_TEXTURE: &str = "u_Material.Texture";
pub const MATERIAL_TILING_FACTOR: &str = "u_Material.TilingFactor";

// ===== LIGHT =====

pub const LIGHT_COLOR: &str = "u_Light.Color";
pub const LIGHT_AMBIENT_STRENGTH: &str = "u_Light.AmbientStrength";
pub const LIGHT_DIFFUSE_STRENGTH: &str = "u_Light.DiffuseStrength";
pub const LIGHT_SPECULAR_STRENGTH: &str = "u_Light.SpecularStrength";
pub const LIGHT_POSITION: &str = "u_Light.Position";
pub const LIGHT_DIRECTION: &str = "u_Light.Direction";
pub const LIGHT_CONSTANT: &str = "u_Light.Constant";
pub const LIGHT_LINEAR: &str = "u_Light.Linear";
pub const LIGHT_QUADRATIC: &str = "u_Light.Quadratic";

// Shadows
pub const SHADOW_MAP: &str = "u_ShadowMap";
pub const LIGHT_SPACE_MATRIX: &str = "u_LightSpaceMatrix";
