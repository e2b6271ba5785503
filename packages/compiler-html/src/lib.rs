//! # Scenemark HTML Compiler
//!
//! Compiles a normalized scene graph into nested markup plus a companion
//! stylesheet. The full pipeline lives behind [`Converter`]:
//!
//! raw export → normalize → synthesize styles + emit markup → (optional)
//! external enrichment, structurally validated → serialize.
//!
//! ## Conversion lifecycle
//!
//! One [`Converter`] allows a single conversion in flight: a call that
//! arrives while another is running is a no-op (`Ok(None)`), never queued or
//! merged. Cancellation mid-pipeline is not supported: a conversion
//! completes or fails as a unit, and starting a fresh one is the only
//! cancellation mechanism.
//!
//! ## Error behavior
//!
//! Only a fatal problem at the very root of the call (a top-level node
//! missing its identity, or an unsupported top-level type) aborts a
//! conversion. Everything else degrades locally: unsupported nested nodes
//! warn and skip, failed raster exports leave the node without its image,
//! and failed or garbled enrichment falls back to the deterministic local
//! naming.

pub mod emitter;
pub mod enrichment;
pub mod markup;
pub mod serializer;
pub mod style;

pub use emitter::{EmitOutput, Emitter};
pub use enrichment::{is_structure_identical, validate_enriched, EnrichError, Enricher, Rejected};
pub use markup::{CssCollection, MarkupNode, MarkupTag};
pub use serializer::render_markup;

use enrichment::apply_enriched_classes;
use scenemark_common::Warnings;
use scenemark_normalizer::{NormalizeError, Normalizer};
use scenemark_scene::{ConversionSettings, GenerationMode, RawNode, SceneHost};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
}

/// The result of one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub markup: String,
    /// Present only when at least one generated class carries declarations
    /// and stylesheet output is enabled.
    pub stylesheet: Option<String>,
    pub warnings: Vec<String>,
}

/// Enricher placeholder for plain conversions.
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    async fn enrich(&self, _nodes: &[MarkupNode]) -> Result<Value, EnrichError> {
        Err(EnrichError::Service("enrichment disabled".into()))
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Pipeline facade. Owns the in-flight guard; everything else is created
/// fresh per conversion.
#[derive(Default)]
pub struct Converter {
    in_flight: AtomicBool,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a selection of exported nodes. Returns `Ok(None)` when a
    /// conversion is already in flight.
    pub async fn convert<H: SceneHost>(
        &self,
        nodes: Vec<RawNode>,
        host: &H,
        settings: &ConversionSettings,
    ) -> PipelineResult<Option<ConversionOutput>> {
        self.run(nodes, host, settings, None::<&NoEnrichment>).await
    }

    /// Convert with an external enrichment collaborator. A failed or
    /// structurally mismatched enrichment silently falls back to the local
    /// naming already present.
    pub async fn convert_enriched<H: SceneHost, E: Enricher>(
        &self,
        nodes: Vec<RawNode>,
        host: &H,
        settings: &ConversionSettings,
        enricher: &E,
    ) -> PipelineResult<Option<ConversionOutput>> {
        self.run(nodes, host, settings, Some(enricher)).await
    }

    #[instrument(skip_all, fields(roots = nodes.len()))]
    async fn run<H: SceneHost, E: Enricher>(
        &self,
        nodes: Vec<RawNode>,
        host: &H,
        settings: &ConversionSettings,
        enricher: Option<&E>,
    ) -> PipelineResult<Option<ConversionOutput>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("conversion already in flight, ignoring");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let (ir, ctx) = Normalizer::new(host, settings).normalize(nodes).await?;
        let mut warnings: Warnings = ctx.warnings;

        let emitted = Emitter::new(host, settings, &mut warnings).emit(&ir).await;
        let mut markup_nodes = emitted.nodes;

        if let Some(enricher) = enricher {
            match enricher.enrich(&markup_nodes).await {
                Ok(candidate) => match validate_enriched(&markup_nodes, &candidate) {
                    Ok(enriched) => {
                        apply_enriched_classes(&mut markup_nodes, &enriched);
                        debug!("enrichment accepted");
                    }
                    Err(Rejected) => {
                        debug!("enrichment rejected, keeping local naming");
                    }
                },
                Err(error) => {
                    debug!(%error, "enrichment unavailable, keeping local naming");
                }
            }
        }

        let markup = render_markup(&markup_nodes, &emitted.css, settings);
        let stylesheet = if settings.html_generation_mode == GenerationMode::Stylesheet
            && emitted.css.has_declarations()
        {
            Some(emitted.css.to_css())
        } else {
            None
        };

        info!(
            elements = markup_nodes.len(),
            warnings = warnings.len(),
            "conversion complete"
        );
        Ok(Some(ConversionOutput {
            markup,
            stylesheet,
            warnings: warnings.into_vec(),
        }))
    }
}
