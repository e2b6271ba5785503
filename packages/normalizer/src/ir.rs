//! The canonical intermediate tree.
//!
//! Every `IrNode` is created fresh per conversion run, owned exclusively by
//! its parent, and carries everything later stages need, including the
//! parent facts (`has_parent`, `parent_layout_mode`, `parent_origin`)
//! recorded at build time so style synthesis stays a pure per-node
//! function with no back-pointers.

use scenemark_scene::{
    BlendMode, Effect, LayoutMode, LayoutPositioning, LayoutSizing, LayoutWrap, LeadingTrim,
    NodeType, Paint, Rect, StrokeAlign, StrokeWeights, TextAlignHorizontal, TextAlignVertical,
    TextAutoResize, TextCase, TextDecoration, TextMetric, OpenTypeFlags, Vector2,
};
use scenemark_scene::node::AxisAlign;
use std::collections::HashMap;

/// Normalized auto-layout fields. Paddings are always present (zero-filled)
/// so downstream rules never branch on absence.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFields {
    pub mode: LayoutMode,
    pub positioning: LayoutPositioning,
    pub grow: f64,
    pub sizing_horizontal: LayoutSizing,
    pub sizing_vertical: LayoutSizing,
    pub primary_axis_align: AxisAlign,
    pub counter_axis_align: AxisAlign,
    pub item_spacing: f64,
    pub wrap: LayoutWrap,
    pub reverse_z_index: bool,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl Default for LayoutFields {
    fn default() -> Self {
        Self {
            mode: LayoutMode::None,
            positioning: LayoutPositioning::Auto,
            grow: 0.0,
            sizing_horizontal: LayoutSizing::Fixed,
            sizing_vertical: LayoutSizing::Fixed,
            primary_axis_align: AxisAlign::Min,
            counter_axis_align: AxisAlign::Min,
            item_spacing: 0.0,
            wrap: LayoutWrap::NoWrap,
            reverse_z_index: false,
            padding_left: 0.0,
            padding_right: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
        }
    }
}

/// A styled text run with its stable, conversion-scoped identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledTextSegment {
    /// Derived from the owning node's unique name; a single run gets no
    /// index suffix, multiple runs get `_span_01`, `_span_02`, …
    pub unique_id: String,
    pub characters: String,
    pub font_family: String,
    pub font_style: String,
    pub font_size: f64,
    pub font_weight: f64,
    pub text_decoration: TextDecoration,
    pub text_case: TextCase,
    pub letter_spacing: Option<TextMetric>,
    pub line_height: Option<TextMetric>,
    pub fills: Vec<Paint>,
    pub open_type: OpenTypeFlags,
}

/// Text-specific fields inlined onto a text node during normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFields {
    pub characters: String,
    pub segments: Vec<StyledTextSegment>,
    pub auto_resize: TextAutoResize,
    pub align_horizontal: TextAlignHorizontal,
    pub align_vertical: TextAlignVertical,
    pub leading_trim: LeadingTrim,
}

/// One node of the canonical tree. Group nodes never appear here; they are
/// inlined during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct IrNode {
    pub id: String,
    pub name: String,
    /// Globally unique within one conversion run.
    pub unique_name: String,
    pub node_type: NodeType,
    pub visible: bool,

    /// The node's own rotation in degrees.
    pub rotation: f64,
    /// Rotation inherited from inlined ancestor groups; undone together with
    /// the node's own rotation when geometry is reconstructed.
    pub cumulative_rotation: f64,

    /// Parent-relative geometry, inverse-rotated.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub absolute_bounding_box: Option<Rect>,
    /// Origin of the parent's bounding box, for embedded-vector positioning.
    pub parent_origin: Option<Vector2>,

    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub effects: Vec<Effect>,
    pub stroke_weight: Option<f64>,
    pub stroke_weights: Option<StrokeWeights>,
    pub stroke_align: StrokeAlign,
    pub stroke_dashes: Vec<f64>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub clips_content: bool,
    pub opacity: f64,
    pub blend_mode: BlendMode,

    pub layout: LayoutFields,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,

    pub has_parent: bool,
    pub parent_layout_mode: Option<LayoutMode>,
    /// Children need `position: relative` on this node (free-form layout or
    /// an absolutely positioned child).
    pub is_relative: bool,

    /// Icon classification result; true only at the outermost flattenable
    /// ancestor.
    pub can_be_flattened: bool,
    /// For flattenable subtrees with variable tracking on: resolved css
    /// color string → variable name, used for embedded-vector substitution.
    pub color_variable_mappings: HashMap<String, String>,

    pub text: Option<TextFields>,
    /// Variant/boolean component properties as `(attribute, value)` pairs,
    /// sorted by attribute name.
    pub component_properties: Vec<(String, String)>,

    pub children: Vec<IrNode>,
}

impl IrNode {
    /// Whether any visible fill is an image paint.
    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(|f| f.visible() && f.is_image())
    }
}
