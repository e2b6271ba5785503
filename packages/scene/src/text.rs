use crate::paint::Paint;
use serde::{Deserialize, Serialize};

/// Unit of a text metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricUnit {
    Auto,
    Pixels,
    Percent,
}

/// A letter-spacing or line-height value with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetric {
    pub unit: MetricUnit,
    #[serde(default)]
    pub value: f64,
}

impl TextMetric {
    /// Resolve the metric to pixels against the run's font size. `Auto`
    /// resolves to zero, which downstream rules treat as "omit".
    pub fn to_px(self, font_size: f64) -> f64 {
        match self.unit {
            MetricUnit::Auto => 0.0,
            MetricUnit::Pixels => self.value,
            MetricUnit::Percent => font_size * self.value / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
}

impl Default for TextDecoration {
    fn default() -> Self {
        TextDecoration::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

impl Default for TextCase {
    fn default() -> Self {
        TextCase::Original
    }
}

/// OpenType feature flags the compiler cares about: subscript and
/// superscript runs get wrapped in `<sub>`/`<sup>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OpenTypeFlags {
    #[serde(default)]
    pub subs: bool,
    #[serde(default)]
    pub sups: bool,
}

/// A contiguous run of characters sharing one text style, as returned by the
/// host's styled-segment query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextSegment {
    pub characters: String,
    pub font_family: String,
    /// Style name, e.g. `"Italic"` or `"Bold Italic"`.
    pub font_style: String,
    pub font_size: f64,
    pub font_weight: f64,
    pub text_decoration: TextDecoration,
    pub text_case: TextCase,
    pub letter_spacing: Option<TextMetric>,
    pub line_height: Option<TextMetric>,
    pub fills: Vec<Paint>,
    pub open_type_features: OpenTypeFlags,
}

impl Default for RawTextSegment {
    fn default() -> Self {
        Self {
            characters: String::new(),
            font_family: String::new(),
            font_style: String::new(),
            font_size: 0.0,
            font_weight: 400.0,
            text_decoration: TextDecoration::None,
            text_case: TextCase::Original,
            letter_spacing: None,
            line_height: None,
            fills: Vec::new(),
            open_type_features: OpenTypeFlags::default(),
        }
    }
}
