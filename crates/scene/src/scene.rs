use crate::mesh::Mesh;
use spincube_common::{NodeId, SceneId};

/// A flat container of meshes.
///
/// Children keep insertion order, which is also the draw order.
#[derive(Debug, Default)]
pub struct Scene {
    id: SceneId,
    children: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Add a mesh as a direct child. Returns its node id.
    pub fn add(&mut self, mesh: Mesh) -> NodeId {
        let id = mesh.id();
        tracing::debug!(scene = %self.id.short(), node = %id.short(), "mesh added");
        self.children.push(mesh);
        id
    }

    pub fn children(&self) -> &[Mesh] {
        &self.children
    }

    /// Mutable access to the children. The slice cannot grow or shrink.
    pub fn children_mut(&mut self) -> &mut [Mesh] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Mesh> {
        self.children.iter().find(|m| m.id() == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        self.children.iter_mut().find(|m| m.id() == id)
    }
}
