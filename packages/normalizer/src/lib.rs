//! # Scenemark Normalizer
//!
//! Turns the host's raw exported scene graph into the canonical intermediate
//! tree the style synthesizer and markup emitter consume.
//!
//! The pass is a single recursive walk that resolves cumulative rotation and
//! parent-relative geometry, inlines groups, collapses empty containers,
//! binds style variables, zero-fills layout fields, deduplicates names and
//! classifies flattenable icon subtrees. Each conversion run gets a fresh
//! [`ConversionContext`]; nothing is shared across runs.
//!
//! ## Determinism
//!
//! Normalization is fully deterministic for a given input tree and host
//! responses: name ordinals are assigned in document order, variable lookups
//! are memoized per run, and sibling order is preserved (modulo the explicit
//! reverse-z-order adjustment).

pub mod context;
pub mod icon;
pub mod ir;
pub mod normalizer;

pub use context::ConversionContext;
pub use icon::{classify_icon, IconClassification};
pub use ir::*;
pub use normalizer::{NormalizeError, NormalizeResult, Normalizer};
