//! Shared identifiers and value types used across the spincube crates.

mod types;

pub use types::{CameraId, Color, Euler, NodeId, SceneId};
