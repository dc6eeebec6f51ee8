//! Material module
//!
//! Materials combine a shared shader with components that upload uniforms
//! and bind textures in a fixed order.

mod texture_slots;
mod material;
mod components;
mod materials;
mod material_library;

pub use texture_slots::TextureSlots;
pub use material::{Material, MaterialBase, MaterialFlags};
pub use components::{FlatColor, FlatTexture};
pub use materials::{SimpleColorMaterial, SimpleTextureMaterial, LightedMaterial};
pub use material_library::MaterialLibrary;
