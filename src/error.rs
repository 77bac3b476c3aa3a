//! Error types for the edges of the lab (content loading, canvas setup).
//!
//! The simulation itself never fails; its state is clamped instead.

use crate::scene::SceneKey;

/// Result alias that carries [`LabError`].
pub type Result<T> = std::result::Result<T, LabError>;

#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// The embedded content document did not parse.
    #[error("invalid content document: {0}")]
    Content(#[from] serde_json::Error),
    /// A scene has no entry in the content document.
    #[error("no content for scene `{0}`")]
    MissingContent(SceneKey),
    /// A scene key string did not match any scene.
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
    /// The canvas element or its 2D context could not be obtained.
    #[error("canvas unavailable: {0}")]
    Canvas(String),
}
