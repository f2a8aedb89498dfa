use crate::error::RenderError;
use spincube_scene::{PerspectiveCamera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer draws the scene as seen from the camera. It never mutates
/// either; the caller owns both.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene from the given camera.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<Self::Output, RenderError>;
}

/// Lending a renderer keeps ownership with the caller.
impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Output = R::Output;

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<Self::Output, RenderError> {
        (**self).render(scene, camera)
    }
}

/// Debug text renderer.
///
/// Produces a human-readable dump of the scene and camera for each frame.
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<String, RenderError> {
        self.frames += 1;

        let mut out = String::new();
        let p = camera.position;
        out.push_str(&format!(
            "=== Frame {} (scene={}) ===\n",
            self.frames,
            scene.id().short()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.2} near={} far={}\n",
            p.x, p.y, p.z, camera.fov, camera.aspect, camera.near, camera.far
        ));
        out.push_str(&format!("Meshes: {}\n", scene.child_count()));

        for mesh in scene.children() {
            let r = mesh.rotation;
            let g = mesh.geometry;
            out.push_str(&format!(
                "  [{}] box={}x{}x{} color=#{:06x} rot=({:.2}, {:.2}, {:.2})\n",
                mesh.id().short(),
                g.width,
                g.height,
                g.depth,
                mesh.material.color.to_hex(),
                r.x,
                r.y,
                r.z
            ));
        }

        tracing::trace!(frame = self.frames, "debug frame rendered");
        Ok(out)
    }
}
