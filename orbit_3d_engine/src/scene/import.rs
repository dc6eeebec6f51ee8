//! Model import.
//!
//! File formats are parsed by a `ModelImporter` into an `ImportedScene`, a
//! plain node graph with per-node local transforms. `LoadedModel` flattens
//! that graph into a `Model`, baking each node's world transform into the
//! vertices of the meshes it references.
//!
//! # Example
//!
//! ```ignore
//! let mut model = LoadedModel::load(&GltfImporter, "assets/helmet.gltf")?;
//! model.upload(device)?;
//! model.set_material(material);
//! ```

use std::path::{Path, PathBuf};
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::error::Result;
use super::mesh::{Mesh, Vertex};
use super::model::Model;

// ============================================================================
// IMPORTED SCENE
// ============================================================================

/// Geometry of one imported primitive
///
/// `normals` and `tex_coords` are either empty or as long as `positions`.
/// Empty `indices` means a plain triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedNode {
    pub name: String,
    /// Transform relative to the parent
    pub transform: Mat4,
    /// Indices into `ImportedScene::meshes`
    pub meshes: Vec<usize>,
    /// Indices into `ImportedScene::nodes`
    pub children: Vec<usize>,
}

impl Default for ImportedNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedScene {
    pub meshes: Vec<ImportedMesh>,
    pub nodes: Vec<ImportedNode>,
    /// Nodes without a parent
    pub roots: Vec<usize>,
}

/// Parses a model file into an `ImportedScene`
pub trait ModelImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene>;
}

// ============================================================================
// GLTF
// ============================================================================

/// glTF 2.0 (`.gltf` / `.glb`) importer
///
/// Reads triangle primitives (positions, normals, first UV set, indices) and
/// the node hierarchy of the default scene (first scene when none is
/// marked default).
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfImporter;

impl ModelImporter for GltfImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene> {
        let (document, buffers, _images) = match gltf::import(path) {
            Ok(imported) => imported,
            Err(gltf::Error::Io(error)) => crate::engine_bail!(
                "orbit3d::GltfImporter",
                Io => "Failed to read '{}': {}",
                path.display(), error
            ),
            Err(error) => crate::engine_bail!(
                "orbit3d::GltfImporter",
                InvalidResource => "Failed to import '{}': {}",
                path.display(), error
            ),
        };

        let mut scene = ImportedScene::default();

        // One ImportedMesh per primitive; remember which ones each glTF mesh produced
        let mut primitives_of_mesh: Vec<Vec<usize>> = Vec::with_capacity(document.meshes().len());
        for mesh in document.meshes() {
            let mesh_name = mesh.name().unwrap_or("mesh").to_string();
            let mut produced = Vec::new();

            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    crate::engine_warn!(
                        "orbit3d::GltfImporter",
                        "Skipping non-triangle primitive {} of '{}' ({:?})",
                        primitive.index(), mesh_name, primitive.mode()
                    );
                    continue;
                }

                let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
                let Some(positions) = reader.read_positions() else {
                    crate::engine_warn!(
                        "orbit3d::GltfImporter",
                        "Skipping primitive {} of '{}' without positions",
                        primitive.index(), mesh_name
                    );
                    continue;
                };

                produced.push(scene.meshes.len());
                scene.meshes.push(ImportedMesh {
                    name: format!("{}#{}", mesh_name, primitive.index()),
                    positions: positions.map(Vec3::from_array).collect(),
                    normals: reader
                        .read_normals()
                        .map(|normals| normals.map(Vec3::from_array).collect())
                        .unwrap_or_default(),
                    tex_coords: reader
                        .read_tex_coords(0)
                        .map(|tex_coords| tex_coords.into_f32().map(Vec2::from_array).collect())
                        .unwrap_or_default(),
                    indices: reader
                        .read_indices()
                        .map(|indices| indices.into_u32().collect())
                        .unwrap_or_default(),
                });
            }
            primitives_of_mesh.push(produced);
        }

        for node in document.nodes() {
            scene.nodes.push(ImportedNode {
                name: node.name().unwrap_or_default().to_string(),
                transform: Mat4::from_cols_array_2d(&node.transform().matrix()),
                meshes: node
                    .mesh()
                    .and_then(|mesh| primitives_of_mesh.get(mesh.index()).cloned())
                    .unwrap_or_default(),
                children: node.children().map(|child| child.index()).collect(),
            });
        }

        let default_scene = document.default_scene().or_else(|| document.scenes().next());
        scene.roots = match default_scene {
            Some(root) => root.nodes().map(|node| node.index()).collect(),
            None => parentless_nodes(&scene.nodes),
        };

        crate::engine_debug!(
            "orbit3d::GltfImporter",
            "Imported '{}': {} meshes, {} nodes",
            path.display(), scene.meshes.len(), scene.nodes.len()
        );
        Ok(scene)
    }
}

fn parentless_nodes(nodes: &[ImportedNode]) -> Vec<usize> {
    let mut has_parent = vec![false; nodes.len()];
    for node in nodes {
        for &child in &node.children {
            if let Some(flag) = has_parent.get_mut(child) {
                *flag = true;
            }
        }
    }
    (0..nodes.len()).filter(|&index| !has_parent[index]).collect()
}

// ============================================================================
// LOADED MODEL
// ============================================================================

/// A `Model` built from an imported file
///
/// Dereferences to the underlying `Model`.
#[derive(Debug)]
pub struct LoadedModel {
    model: Model,
    path: Option<PathBuf>,
}

impl LoadedModel {
    /// Import `path` with `importer` and build the model (named after the file stem)
    pub fn load(importer: &dyn ModelImporter, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = importer.import(path)?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("model");

        let mut loaded = Self::from_scene(name, &scene);
        loaded.path = Some(path.to_path_buf());

        crate::engine_info!(
            "orbit3d::LoadedModel",
            "Loaded model '{}' ({} meshes)",
            name, loaded.model.meshes().len()
        );
        Ok(loaded)
    }

    /// Flatten `scene` into a model
    ///
    /// Meshes with out-of-range indices or mismatched attribute counts are
    /// logged and skipped. Node cycles are cut at the repeated node.
    pub fn from_scene(name: &str, scene: &ImportedScene) -> Self {
        let mut model = Model::new(name);
        let mut path = Vec::new();
        for &root in &scene.roots {
            visit_node(scene, root, Mat4::IDENTITY, &mut path, &mut model);
        }
        Self { model, path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}

impl std::ops::Deref for LoadedModel {
    type Target = Model;

    fn deref(&self) -> &Model {
        &self.model
    }
}

impl std::ops::DerefMut for LoadedModel {
    fn deref_mut(&mut self) -> &mut Model {
        &mut self.model
    }
}

fn visit_node(scene: &ImportedScene, index: usize, parent: Mat4, path: &mut Vec<usize>, model: &mut Model) {
    let Some(node) = scene.nodes.get(index) else {
        crate::engine_warn!("orbit3d::LoadedModel", "Node index {} out of range", index);
        return;
    };
    if path.contains(&index) {
        crate::engine_warn!("orbit3d::LoadedModel", "Node cycle at '{}' ({}), skipped", node.name, index);
        return;
    }

    let world = parent * node.transform;
    for &mesh_index in &node.meshes {
        match scene.meshes.get(mesh_index) {
            Some(mesh) => {
                if let Some(mesh) = bake_mesh(mesh, &world) {
                    model.add_mesh(mesh);
                }
            }
            None => crate::engine_warn!(
                "orbit3d::LoadedModel",
                "Node '{}' references missing mesh {}",
                node.name, mesh_index
            ),
        }
    }

    path.push(index);
    for &child in &node.children {
        visit_node(scene, child, world, path, model);
    }
    path.pop();
}

/// Transform the vertices of `mesh` by `world`
fn bake_mesh(mesh: &ImportedMesh, world: &Mat4) -> Option<Mesh> {
    let count = mesh.positions.len();
    if count == 0 {
        crate::engine_warn!("orbit3d::LoadedModel", "Mesh '{}' has no vertices, skipped", mesh.name);
        return None;
    }
    if (!mesh.normals.is_empty() && mesh.normals.len() != count)
        || (!mesh.tex_coords.is_empty() && mesh.tex_coords.len() != count)
    {
        crate::engine_warn!("orbit3d::LoadedModel", "Mesh '{}' has mismatched attribute counts, skipped", mesh.name);
        return None;
    }
    if let Some(&index) = mesh.indices.iter().find(|&&index| index as usize >= count) {
        crate::engine_warn!(
            "orbit3d::LoadedModel",
            "Mesh '{}' index {} out of range ({} vertices), skipped",
            mesh.name, index, count
        );
        return None;
    }

    // Singular node transforms flatten the mesh; its normals become zero
    let normal_matrix = crate::renderer::normal_matrix(world).unwrap_or(Mat3::ZERO);
    let vertices = (0..count)
        .map(|i| {
            let normal = mesh
                .normals
                .get(i)
                .map(|normal| (normal_matrix * *normal).normalize_or_zero())
                .unwrap_or(Vec3::ZERO);
            let tex_coords = mesh.tex_coords.get(i).copied().unwrap_or(Vec2::ZERO);
            Vertex::new(world.transform_point3(mesh.positions[i]), normal, tex_coords)
        })
        .collect();

    Some(Mesh::new(&mesh.name, vertices, mesh.indices.clone()))
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
