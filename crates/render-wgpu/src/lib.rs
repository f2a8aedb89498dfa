//! wgpu render backend.
//!
//! Draws every mesh of a scene as an instance of one unit box, scaled by its
//! geometry and colored by its basic material. No lighting.
//!
//! # Invariants
//! - The renderer never mutates the scene or camera.
//! - Camera aspect is not derived from the surface size; resizing the surface
//!   only reallocates the depth buffer.

mod gpu;
mod shaders;

pub use gpu::{GpuInitError, SurfaceRenderer};

pub fn crate_info() -> &'static str {
    "spincube-render-wgpu v0.1.0"
}
