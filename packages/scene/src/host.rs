//! Host capability interface.
//!
//! The pipeline needs a handful of live queries the static export cannot
//! answer: per-run text styling, variable-id → name resolution, and
//! raster/vector export of a subtree. Production code backs this trait with
//! the host API; tests back it with fakes.

use crate::text::RawTextSegment;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("node '{id}' not found in the live document")]
    NodeNotFound { id: String },

    #[error("export failed for node '{id}': {reason}")]
    ExportFailed { id: String, reason: String },

    #[error("variable '{0}' could not be resolved")]
    VariableLookup(String),
}

/// Live-query capability injected into the normalizer and the emitter.
///
/// Implementations of [`SceneHost::export_raster`] must toggle child
/// visibility off immediately before capture and restore it immediately
/// after, even when the export fails; the compiler relies on that scoped
/// restoration and never touches visibility itself.
#[allow(async_fn_in_trait)]
pub trait SceneHost {
    /// Styled text runs for a text node, in document order.
    async fn text_segments(&self, node_id: &str) -> Result<Vec<RawTextSegment>, HostError>;

    /// Resolve a style-variable id to its human-readable name, `Ok(None)`
    /// when the variable exists but has no usable name.
    async fn resolve_color_variable(&self, variable_id: &str) -> Result<Option<String>, HostError>;

    /// Export a node as an encoded raster image (PNG bytes). When
    /// `exclude_children` is set, the node is captured without its children.
    async fn export_raster(&self, node_id: &str, exclude_children: bool)
        -> Result<Vec<u8>, HostError>;

    /// Export a node's subtree as vector markup.
    async fn export_vector(&self, node_id: &str) -> Result<String, HostError>;
}
