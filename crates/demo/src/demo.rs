use crate::config::{ConfigError, DemoConfig};
use crate::error::DemoError;
use crate::schedule::{FrameScheduler, LoopHandle};
use glam::Vec3;
use serde::Serialize;
use spincube_common::{Color, Euler};
use spincube_render::Renderer;
use spincube_scene::{BasicMaterial, Mesh, PerspectiveCamera, Scene};

/// Result of one call to [`CubeDemo::animate`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome<O> {
    /// The frame was rendered and the next one requested.
    Rendered(O),
    /// The loop handle is stopped; nothing happened.
    Stopped,
}

/// Point-in-time view of the demo state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoSnapshot {
    pub frames: u64,
    pub running: bool,
    pub rotation: Euler,
    pub camera_position: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub child_count: usize,
}

/// A scene with one spinning cube, drawn by a caller-supplied renderer.
///
/// Pass `&mut renderer` / `&mut scheduler` to keep ownership with the caller.
pub struct CubeDemo<R, S> {
    renderer: R,
    scheduler: S,
    scene: Scene,
    camera: PerspectiveCamera,
    /// Index of the cube among the scene's children. The scene only grows
    /// through `Scene::add`, which the demo never calls after construction.
    cube: usize,
    rotation_step: f64,
    frames: u64,
    handle: LoopHandle,
}

impl<R: Renderer, S: FrameScheduler> CubeDemo<R, S> {
    /// Build the classic scene: 75° camera five units back, unit green cube.
    pub fn new(renderer: R, scheduler: S) -> Self {
        Self::build(renderer, scheduler, &DemoConfig::default())
    }

    /// Build from explicit parameters. Rejects configs that fail
    /// [`DemoConfig::validate`], so a running demo never turns backwards.
    pub fn with_config(
        renderer: R,
        scheduler: S,
        config: &DemoConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(renderer, scheduler, config))
    }

    fn build(renderer: R, scheduler: S, config: &DemoConfig) -> Self {
        let mut scene = Scene::new();
        let mut camera = PerspectiveCamera::new(config.fov, config.aspect, config.near, config.far);
        let material = BasicMaterial::new(Color::from_hex(config.cube_color));
        let cube = scene.child_count();
        let cube_id = scene.add(Mesh::new(config.cube, material));
        camera.position.z = config.camera_z;

        tracing::debug!(
            scene = %scene.id().short(),
            camera = %camera.id().short(),
            cube = %cube_id.short(),
            "cube demo constructed"
        );

        Self {
            renderer,
            scheduler,
            scene,
            camera,
            cube,
            rotation_step: config.rotation_step,
            frames: 0,
            handle: LoopHandle::new(),
        }
    }

    /// Frame callback: request the next frame, turn the cube, render.
    ///
    /// The next frame is requested before rendering, so a renderer error
    /// still leaves the loop scheduled. Errors are returned unchanged.
    pub fn animate(&mut self) -> Result<FrameOutcome<R::Output>, DemoError> {
        if !self.handle.is_running() {
            tracing::trace!(frame = self.frames, "loop stopped, frame ignored");
            return Ok(FrameOutcome::Stopped);
        }

        self.scheduler.request_frame();

        let step = self.rotation_step;
        let cube = self.cube_mut();
        cube.rotation.x += step;
        cube.rotation.y += step;

        self.frames += 1;
        let output = self.renderer.render(&self.scene, &self.camera)?;
        tracing::trace!(frame = self.frames, "frame rendered");
        Ok(FrameOutcome::Rendered(output))
    }

    /// Render the current state again without turning the cube or
    /// requesting a frame. Hosts use it to repaint while the loop is stopped.
    pub fn redraw(&mut self) -> Result<R::Output, DemoError> {
        let output = self.renderer.render(&self.scene, &self.camera)?;
        tracing::trace!(frame = self.frames, "frame redrawn");
        Ok(output)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn cube(&self) -> &Mesh {
        &self.scene.children()[self.cube]
    }

    fn cube_mut(&mut self) -> &mut Mesh {
        &mut self.scene.children_mut()[self.cube]
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Stop switch for this demo's loop. Clones share state.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Number of frames rendered (stopped frames are not counted).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot(&self) -> DemoSnapshot {
        DemoSnapshot {
            frames: self.frames,
            running: self.handle.is_running(),
            rotation: self.cube().rotation,
            camera_position: self.camera.position,
            fov: self.camera.fov,
            aspect: self.camera.aspect,
            child_count: self.scene.child_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::FrameQueue;
    use spincube_common::{CameraId, SceneId};
    use spincube_render::{DebugTextRenderer, RenderError};

    const EPS: f64 = 1e-9;

    /// Records what every render call received.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<(SceneId, CameraId, Euler)>,
    }

    impl Renderer for RecordingRenderer {
        type Output = usize;

        fn render(
            &mut self,
            scene: &Scene,
            camera: &PerspectiveCamera,
        ) -> Result<usize, RenderError> {
            self.calls
                .push((scene.id(), camera.id(), scene.children()[0].rotation));
            Ok(self.calls.len())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        type Output = ();

        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), RenderError> {
            Err(RenderError::Backend("device lost".into()))
        }
    }

    #[test]
    fn construction_sets_up_classic_scene() {
        let demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());

        assert_eq!(demo.scene().child_count(), 1);
        assert_eq!(demo.camera().position.z, 5.0);
        assert_eq!(demo.camera().position.truncate(), glam::Vec2::ZERO);
        assert_eq!(demo.camera().fov, 75.0);
        assert_eq!(demo.camera().aspect, 2.0);
        assert_eq!(demo.camera().near, 0.1);
        assert_eq!(demo.camera().far, 1000.0);

        let cube = demo.cube();
        assert_eq!(cube.geometry.size(), Vec3::ONE);
        assert_eq!(cube.material.color.to_hex(), 0x00ff00);
        assert_eq!(cube.rotation, Euler::ZERO);
    }

    #[test]
    fn construction_neither_renders_nor_schedules() {
        let demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        assert!(demo.renderer().calls.is_empty());
        assert_eq!(demo.scheduler().requested(), 0);
        assert_eq!(demo.frames(), 0);
    }

    #[test]
    fn hundred_frames_turn_cube_one_radian() {
        let mut renderer = RecordingRenderer::default();
        let mut demo = CubeDemo::new(&mut renderer, FrameQueue::new());
        for _ in 0..100 {
            demo.animate().unwrap();
        }
        let rotation = demo.cube().rotation;
        assert!((rotation.x - 1.0).abs() < EPS);
        assert!((rotation.y - 1.0).abs() < EPS);
        assert_eq!(rotation.z, 0.0);
        drop(demo);

        assert_eq!(renderer.calls.len(), 100);
    }

    #[test]
    fn angles_grow_by_step_each_frame() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        for n in 1..=25u32 {
            demo.animate().unwrap();
            let expected = f64::from(n) * 0.01;
            let r = demo.cube().rotation;
            assert!((r.x - expected).abs() < EPS, "x after {n} frames: {}", r.x);
            assert!((r.y - expected).abs() < EPS, "y after {n} frames: {}", r.y);
        }
    }

    #[test]
    fn renderer_sees_rotation_of_current_frame() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        demo.animate().unwrap();
        demo.animate().unwrap();
        let seen: Vec<f64> = demo.renderer().calls.iter().map(|c| c.2.x).collect();
        assert!((seen[0] - 0.01).abs() < EPS);
        assert!((seen[1] - 0.02).abs() < EPS);
    }

    #[test]
    fn every_frame_requests_exactly_one_more() {
        let mut queue = FrameQueue::new();
        let mut demo = CubeDemo::new(RecordingRenderer::default(), &mut queue);
        demo.animate().unwrap();
        assert_eq!(demo.scheduler().requested(), 1);
        for _ in 0..9 {
            demo.animate().unwrap();
        }
        drop(demo);
        assert_eq!(queue.requested(), 10);
        assert_eq!(queue.pending(), 10);
    }

    #[test]
    fn scene_and_camera_identity_never_change() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        let scene_id = demo.scene().id();
        let camera_id = demo.camera().id();
        for _ in 0..5 {
            demo.animate().unwrap();
        }
        let calls = &demo.renderer().calls;
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|c| c.0 == scene_id && c.1 == camera_id));
    }

    #[test]
    fn renders_go_to_the_renderer_given_at_construction() {
        let mut mine = RecordingRenderer::default();
        let other = RecordingRenderer::default();
        {
            let mut demo = CubeDemo::new(&mut mine, FrameQueue::new());
            demo.animate().unwrap();
            demo.animate().unwrap();
        }
        assert_eq!(mine.calls.len(), 2);
        assert!(other.calls.is_empty());
    }

    #[test]
    fn renderer_output_is_passed_through() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        assert_eq!(demo.animate().unwrap(), FrameOutcome::Rendered(1));
        assert_eq!(demo.animate().unwrap(), FrameOutcome::Rendered(2));
    }

    #[test]
    fn queue_driven_loop_is_self_perpetuating() {
        let mut demo = CubeDemo::new(DebugTextRenderer::new(), FrameQueue::new());
        demo.scheduler_mut().request_frame();
        let mut rendered = 0;
        while rendered < 50 && demo.scheduler_mut().take() {
            demo.animate().unwrap();
            rendered += 1;
        }
        assert_eq!(rendered, 50);
        assert_eq!(demo.renderer().frames(), 50);
        // The last frame asked for one more.
        assert_eq!(demo.scheduler().pending(), 1);
    }

    #[test]
    fn renderer_error_propagates_after_scheduling() {
        let mut demo = CubeDemo::new(FailingRenderer, FrameQueue::new());
        let err = demo.animate().unwrap_err();
        assert!(matches!(err, DemoError::Render(RenderError::Backend(_))));
        assert_eq!(demo.scheduler().requested(), 1);
        assert!((demo.cube().rotation.x - 0.01).abs() < EPS);
    }

    #[test]
    fn stopped_handle_skips_everything() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        demo.animate().unwrap();
        let handle = demo.handle();
        handle.stop();

        assert_eq!(demo.animate().unwrap(), FrameOutcome::Stopped);
        assert_eq!(demo.renderer().calls.len(), 1);
        assert_eq!(demo.scheduler().requested(), 1);
        assert!((demo.cube().rotation.x - 0.01).abs() < EPS);
        assert_eq!(demo.frames(), 1);
    }

    #[test]
    fn resumed_handle_continues_from_last_angle() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        let handle = demo.handle();
        demo.animate().unwrap();
        handle.stop();
        demo.animate().unwrap();
        handle.resume();
        demo.animate().unwrap();
        assert!((demo.cube().rotation.y - 0.02).abs() < EPS);
        assert_eq!(demo.renderer().calls.len(), 2);
    }

    #[test]
    fn custom_config_is_applied() {
        let config = DemoConfig {
            fov: 50.0,
            camera_z: 8.0,
            cube_color: 0xff0000,
            rotation_step: 0.05,
            ..DemoConfig::default()
        };
        let mut demo =
            CubeDemo::with_config(RecordingRenderer::default(), FrameQueue::new(), &config)
                .unwrap();
        demo.animate().unwrap();
        assert_eq!(demo.camera().fov, 50.0);
        assert_eq!(demo.camera().position.z, 8.0);
        assert_eq!(demo.cube().material.color.to_hex(), 0xff0000);
        assert!((demo.cube().rotation.x - 0.05).abs() < EPS);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = DemoConfig {
            rotation_step: -0.01,
            ..DemoConfig::default()
        };
        let result =
            CubeDemo::with_config(RecordingRenderer::default(), FrameQueue::new(), &config);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn redraw_renders_without_turning_or_scheduling() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        demo.animate().unwrap();
        demo.handle().stop();

        assert_eq!(demo.redraw().unwrap(), 2);
        assert_eq!(demo.scheduler().requested(), 1);
        assert_eq!(demo.frames(), 1);
        let calls = &demo.renderer().calls;
        assert_eq!(calls[0].2, calls[1].2);
    }

    /// Renders nothing; keeps long loops cheap.
    struct NullRenderer;

    impl Renderer for NullRenderer {
        type Output = ();

        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn million_frames_keep_full_step_size() {
        const FRAMES: u32 = 1_000_000;
        let mut demo = CubeDemo::new(NullRenderer, FrameQueue::new());
        for _ in 0..FRAMES - 1 {
            demo.animate().unwrap();
        }
        let before = demo.cube().rotation.x;
        demo.animate().unwrap();
        let after = demo.cube().rotation;

        assert!((after.x - after.y).abs() < EPS);
        assert!((after.x - f64::from(FRAMES) * 0.01).abs() < 1e-5);
        assert!((after.x - before - 0.01).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut demo = CubeDemo::new(RecordingRenderer::default(), FrameQueue::new());
        for _ in 0..3 {
            demo.animate().unwrap();
        }
        let snap = demo.snapshot();
        assert_eq!(snap.frames, 3);
        assert!(snap.running);
        assert_eq!(snap.child_count, 1);
        assert_eq!(snap.camera_position, Vec3::new(0.0, 0.0, 5.0));
        assert!((snap.rotation.x - 0.03).abs() < EPS);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["frames"], 3);
        assert_eq!(json["child_count"], 1);
    }
}
