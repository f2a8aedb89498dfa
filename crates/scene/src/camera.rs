use glam::{Mat4, Vec3};
use spincube_common::CameraId;

/// Perspective projection looking down -Z from `position`.
///
/// Field of view is vertical and stored in degrees.
#[derive(Debug)]
pub struct PerspectiveCamera {
    id: CameraId,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            id: CameraId::new(),
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
        }
    }

    pub fn id(&self) -> CameraId {
        self.id
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}
