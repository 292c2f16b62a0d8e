//! Error types for scene construction and host interaction.

use crate::api::types::ObjectId;

/// Configuration errors. Any of these is fatal at construction: the scene
/// refuses to start rather than render a partially-defined state.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Two manifest entries share an id.
    #[error("duplicate object id {0}")]
    DuplicateObjectId(ObjectId),

    /// An object was declared without a label.
    #[error("object {0} has an empty label")]
    EmptyLabel(ObjectId),

    /// An object position contains NaN or infinity.
    #[error("object {0} has a non-finite position")]
    NonFinitePosition(ObjectId),

    /// The manifest declares no objects at all.
    #[error("manifest contains no objects")]
    EmptyManifest,

    /// The microservice ring is misconfigured.
    #[error("invalid microservice ring: {0}")]
    InvalidRing(&'static str),

    /// Descriptive content declares the same key twice.
    #[error("duplicate content key {0:?}")]
    DuplicateContentKey(String),

    /// Failed to parse the scene manifest JSON.
    #[error("failed to parse scene manifest: {0}")]
    ManifestParse(#[source] serde_json::Error),

    /// Failed to parse the descriptive content JSON.
    #[error("failed to parse descriptive content: {0}")]
    ContentParse(#[source] serde_json::Error),
}

/// Failure reported by a host callback (hover caption, selection handler,
/// cursor hint). Always caught at the dispatch boundary.
#[derive(Debug, Clone, thiserror::Error)]
#[error("host callback `{callback}` failed: {message}")]
pub struct HostError {
    pub callback: &'static str,
    pub message: String,
}

impl HostError {
    pub fn new(callback: &'static str, message: impl Into<String>) -> Self {
        Self {
            callback,
            message: message.into(),
        }
    }
}
