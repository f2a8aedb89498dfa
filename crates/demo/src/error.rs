use spincube_render::RenderError;
use thiserror::Error;

/// Errors surfaced by [`crate::CubeDemo::animate`].
///
/// The demo adds no recovery of its own; renderer failures pass through.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Render(#[from] RenderError),
}
