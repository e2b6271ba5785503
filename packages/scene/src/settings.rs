use serde::{Deserialize, Serialize};

/// How node styling is delivered in the generated markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Styles inlined into each element's `style` attribute.
    Inline,
    /// Elements carry generated class names; declarations go to a companion
    /// stylesheet.
    Stylesheet,
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode::Stylesheet
    }
}

/// Options recognized by a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    /// Include the layer name as a `data-layer` attribute on each element.
    pub show_layer_names: bool,
    /// Resolve style-variable bindings and emit `var(--name, fallback)`
    /// colors.
    pub use_color_variables: bool,
    /// Inline raster exports as base64 data URIs instead of placeholders.
    pub embed_images: bool,
    /// Flatten icon-like subtrees into embedded vector payloads.
    pub embed_vectors: bool,
    pub html_generation_mode: GenerationMode,
}
