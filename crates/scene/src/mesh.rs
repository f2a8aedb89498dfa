use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use spincube_common::{Color, Euler, NodeId};

/// A single mesh vertex: position and face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Axis-aligned box centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Triangle list for the box: four vertices per face, two triangles per
    /// face, counter-clockwise when seen from outside.
    pub fn triangles(&self) -> (Vec<Vertex>, Vec<u16>) {
        let (x, y, z) = (self.width * 0.5, self.height * 0.5, self.depth * 0.5);
        #[rustfmt::skip]
        let vertices = vec![
            // +Z face
            Vertex { position: [-x, -y,  z], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [ x, -y,  z], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [ x,  y,  z], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [-x,  y,  z], normal: [0.0, 0.0, 1.0] },
            // -Z face
            Vertex { position: [ x, -y, -z], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [-x, -y, -z], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [-x,  y, -z], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [ x,  y, -z], normal: [0.0, 0.0, -1.0] },
            // +X face
            Vertex { position: [ x, -y,  z], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ x, -y, -z], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ x,  y, -z], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ x,  y,  z], normal: [1.0, 0.0, 0.0] },
            // -X face
            Vertex { position: [-x, -y, -z], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-x, -y,  z], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-x,  y,  z], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-x,  y, -z], normal: [-1.0, 0.0, 0.0] },
            // +Y face
            Vertex { position: [-x,  y,  z], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [ x,  y,  z], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [ x,  y, -z], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [-x,  y, -z], normal: [0.0, 1.0, 0.0] },
            // -Y face
            Vertex { position: [-x, -y, -z], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [ x, -y, -z], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [ x, -y,  z], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [-x, -y,  z], normal: [0.0, -1.0, 0.0] },
        ];
        let indices = (0..6u16)
            .flat_map(|face| {
                let b = face * 4;
                [b, b + 1, b + 2, b + 2, b + 3, b]
            })
            .collect();
        (vertices, indices)
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::unit()
    }
}

/// Unlit material: every fragment gets the same color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Color,
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// A renderable node pairing a box with a material.
#[derive(Debug, Clone)]
pub struct Mesh {
    id: NodeId,
    pub geometry: BoxGeometry,
    pub material: BasicMaterial,
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: Vec3,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self {
            id: NodeId::new(),
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Euler::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Local-to-world transform. Nodes are direct children of the scene, so
    /// this is also the local transform.
    pub fn matrix_world(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation.to_quat(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_box_has_24_vertices_and_36_indices() {
        let (vertices, indices) = BoxGeometry::unit().triangles();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn box_extents_follow_dimensions() {
        let (vertices, _) = BoxGeometry::new(2.0, 4.0, 6.0).triangles();
        let max = vertices.iter().fold(Vec3::ZERO, |acc, v| {
            acc.max(Vec3::from_array(v.position).abs())
        });
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn face_winding_matches_normals() {
        let (vertices, indices) = BoxGeometry::unit().triangles();
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(vertices[i as usize].position));
            let n = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn new_mesh_has_identity_transform() {
        let mesh = Mesh::new(BoxGeometry::unit(), BasicMaterial::default());
        assert_eq!(mesh.matrix_world(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_world_applies_translation() {
        let mut mesh = Mesh::new(BoxGeometry::unit(), BasicMaterial::new(Color::GREEN));
        mesh.position = Vec3::new(1.0, 2.0, 3.0);
        let p = mesh.matrix_world().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
