//! Scene module
//!
//! Meshes, models and their bounds, built-in primitives and model import.

mod bounding_box;
mod mesh;
mod model;
pub mod primitives;
mod import;

pub use bounding_box::BoundingBox;
pub use mesh::{Mesh, Vertex};
pub use model::Model;
pub use import::{
    ImportedMesh, ImportedNode, ImportedScene, ModelImporter, GltfImporter, LoadedModel,
};
