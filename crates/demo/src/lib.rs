//! Rotating cube demo.
//!
//! `CubeDemo` owns one scene, one camera and one cube. Each call to
//! [`CubeDemo::animate`] requests the next frame from the host scheduler,
//! turns the cube and hands scene and camera to the renderer.
//!
//! # Invariants
//! - Exactly one scene, one camera and one cube per demo; none is replaced.
//! - Every running frame issues exactly one frame request and one render.
//! - The loop never stops itself. Only a [`LoopHandle`] can stop it.

mod config;
mod demo;
mod error;
mod schedule;

pub use config::{ConfigError, DemoConfig};
pub use demo::{CubeDemo, DemoSnapshot, FrameOutcome};
pub use error::DemoError;
pub use schedule::{FrameQueue, FrameScheduler, LoopHandle};

pub fn crate_info() -> &'static str {
    "spincube-demo v0.1.0"
}
