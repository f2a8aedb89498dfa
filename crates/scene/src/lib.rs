//! Scene model: a flat container of meshes plus a perspective camera.
//!
//! # Invariants
//! - Scene, camera and node identities never change after construction.
//! - Node rotation is stored as raw accumulated Euler angles.

mod camera;
mod mesh;
mod scene;

pub use camera::PerspectiveCamera;
pub use mesh::{BasicMaterial, BoxGeometry, Mesh, Vertex};
pub use scene::Scene;

pub fn crate_info() -> &'static str {
    "spincube-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
