use anyhow::{Context, Result};
use clap::Parser;
use spincube_demo::{CubeDemo, DemoConfig, FrameOutcome, FrameScheduler};
use spincube_render_wgpu::SurfaceRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "Rotating cube demo in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file overriding the default scene parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in physical pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in physical pixels
    #[arg(long, default_value = "400")]
    height: u32,
}

/// Frame scheduler backed by winit redraw requests.
struct RedrawScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

type Demo = CubeDemo<SurfaceRenderer, RedrawScheduler>;

struct DesktopApp {
    config: DemoConfig,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    demo: Option<Demo>,
}

impl DesktopApp {
    fn new(config: DemoConfig, size: PhysicalSize<u32>) -> Self {
        Self {
            config,
            size,
            window: None,
            demo: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("spincube")
            .with_inner_size(self.size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let renderer = pollster::block_on(SurfaceRenderer::new(
            window.clone(),
            size.width,
            size.height,
        ))
        .context("initialize renderer")?;

        let scheduler = RedrawScheduler {
            window: window.clone(),
        };
        let demo = CubeDemo::with_config(renderer, scheduler, &self.config)?;

        // Kick the first frame; the demo schedules every later one.
        window.request_redraw();

        self.window = Some(window);
        self.demo = Some(demo);
        Ok(())
    }

    fn toggle_running(&self) {
        let (Some(demo), Some(window)) = (&self.demo, &self.window) else {
            return;
        };
        let handle = demo.handle();
        if handle.is_running() {
            handle.stop();
            tracing::info!("animation paused");
        } else {
            handle.resume();
            window.request_redraw();
            tracing::info!("animation resumed");
        }
    }

    fn shutdown(&self, event_loop: &ActiveEventLoop) {
        if let Some(demo) = &self.demo {
            demo.handle().stop();
            tracing::info!(frames = demo.frames(), "shutting down");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(new_size) => {
                if let (Some(demo), Some(window)) = (&mut self.demo, &self.window) {
                    demo.renderer_mut().resize(new_size.width, new_size.height);
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::Escape => self.shutdown(event_loop),
                KeyCode::Space => self.toggle_running(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let Some(demo) = &mut self.demo else {
                    return;
                };
                // Paused windows still get redraws from the system (expose,
                // resize); repaint the frozen frame instead of leaving it blank.
                let result = match demo.animate() {
                    Ok(FrameOutcome::Stopped) => demo.redraw(),
                    Ok(FrameOutcome::Rendered(())) => Ok(()),
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    tracing::error!("frame failed: {e}");
                    self.shutdown(event_loop);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    tracing::info!(
        demo = spincube_demo::crate_info(),
        backend = spincube_render_wgpu::crate_info(),
        "spincube-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = DesktopApp::new(config, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    Ok(())
}
