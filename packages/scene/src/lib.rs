//! # Scenemark Scene Model
//!
//! The raw scene-graph data model as exported by the host design tool, the
//! pure geometry math shared by the normalizer and the style synthesizer,
//! the host capability traits, and the conversion settings.
//!
//! Everything in this crate is host-agnostic: the exported tree is a plain
//! serde document, and every live query (text runs, variable lookups,
//! raster/vector export) goes through the [`SceneHost`] trait so tests can
//! substitute fakes.

pub mod geometry;
pub mod host;
pub mod node;
pub mod paint;
pub mod settings;
pub mod text;

pub use host::{HostError, SceneHost};
pub use node::*;
pub use paint::*;
pub use settings::*;
pub use text::*;
