//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate them.
//! - A renderer may be owned by its caller and lent out as `&mut R`.
//!
//! The GPU backend lives in `spincube-render-wgpu`; the debug text renderer
//! here serves the CLI and tests without a device.

mod error;
mod renderer;

pub use error::RenderError;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "spincube-render v0.1.0"
}
