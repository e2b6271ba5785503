use crate::paint::{Effect, Paint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// Closed set of node types the host can export. Types the compiler does not
/// know how to render are warned about and skipped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Frame,
    Group,
    Rectangle,
    Ellipse,
    Line,
    Vector,
    BooleanOperation,
    Polygon,
    Star,
    Text,
    Component,
    ComponentSet,
    Instance,
    Section,
    Slice,
    Connector,
    Sticky,
    ShapeWithText,
    CodeBlock,
    Widget,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Line => "LINE",
            NodeType::Vector => "VECTOR",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Polygon => "POLYGON",
            NodeType::Star => "STAR",
            NodeType::Text => "TEXT",
            NodeType::Component => "COMPONENT",
            NodeType::ComponentSet => "COMPONENT_SET",
            NodeType::Instance => "INSTANCE",
            NodeType::Section => "SECTION",
            NodeType::Slice => "SLICE",
            NodeType::Connector => "CONNECTOR",
            NodeType::Sticky => "STICKY",
            NodeType::ShapeWithText => "SHAPE_WITH_TEXT",
            NodeType::CodeBlock => "CODE_BLOCK",
            NodeType::Widget => "WIDGET",
        }
    }

    /// Container types that can hold children and participate in layout.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeType::Frame | NodeType::Group | NodeType::Component | NodeType::Instance
        )
    }
}

/// Axis-aligned rectangle in absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    Fixed,
    Hug,
    Fill,
}

impl Default for LayoutSizing {
    fn default() -> Self {
        LayoutSizing::Fixed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

impl Default for AxisAlign {
    fn default() -> Self {
        AxisAlign::Min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    Auto,
    Absolute,
}

impl Default for LayoutPositioning {
    fn default() -> Self {
        LayoutPositioning::Auto
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    NoWrap,
    Wrap,
}

impl Default for LayoutWrap {
    fn default() -> Self {
        LayoutWrap::NoWrap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Inside,
    Outside,
    Center,
}

impl Default for StrokeAlign {
    fn default() -> Self {
        StrokeAlign::Inside
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    None,
    Height,
    WidthAndHeight,
    Truncate,
}

impl Default for TextAutoResize {
    fn default() -> Self {
        TextAutoResize::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    Left,
    Center,
    Right,
    Justified,
}

impl Default for TextAlignHorizontal {
    fn default() -> Self {
        TextAlignHorizontal::Left
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    Top,
    Center,
    Bottom,
}

impl Default for TextAlignVertical {
    fn default() -> Self {
        TextAlignVertical::Top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadingTrim {
    None,
    CapHeight,
}

impl Default for LeadingTrim {
    fn default() -> Self {
        LeadingTrim::None
    }
}

/// Per-side stroke weights as exported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokeWeights {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// An export hint attached to a node in the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSetting {
    pub format: String,
}

/// Node-level text style as exported on a text node's `style` field. Per-run
/// styling comes from the host's text-run query instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_auto_resize: Option<TextAutoResize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<TextAlignHorizontal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<TextAlignVertical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading_trim: Option<LeadingTrim>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentPropertyKind {
    Variant,
    Boolean,
    Text,
    InstanceSwap,
}

/// A component property exposed on an instance node; variant and boolean
/// properties become `data-*` attributes in the markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperty {
    #[serde(rename = "type")]
    pub kind: ComponentPropertyKind,
    pub value: serde_json::Value,
}

/// One node of the raw exported scene graph. Owned by the host; read-only
/// input to the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Rotation in degrees, as exported.
    pub rotation: Option<f64>,
    pub absolute_bounding_box: Option<Rect>,
    pub absolute_render_bounds: Option<Rect>,

    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub effects: Vec<Effect>,
    pub stroke_weight: Option<f64>,
    pub individual_stroke_weights: Option<StrokeWeights>,
    pub stroke_align: Option<StrokeAlign>,
    pub stroke_dashes: Vec<f64>,

    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,

    pub layout_mode: Option<LayoutMode>,
    pub layout_positioning: Option<LayoutPositioning>,
    pub layout_grow: Option<f64>,
    pub layout_sizing_horizontal: Option<LayoutSizing>,
    pub layout_sizing_vertical: Option<LayoutSizing>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub item_spacing: Option<f64>,
    pub layout_wrap: Option<LayoutWrap>,
    pub item_reverse_z_index: bool,

    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,

    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,

    pub clips_content: bool,
    pub opacity: Option<f64>,
    pub blend_mode: Option<crate::paint::BlendMode>,
    pub export_settings: Vec<ExportSetting>,

    pub characters: Option<String>,
    pub style: Option<TypeStyle>,

    /// Sorted map so data attributes come out in a stable order.
    pub component_properties: BTreeMap<String, ComponentProperty>,

    pub children: Vec<RawNode>,
}

impl Default for RawNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            node_type: None,
            // Visibility defaults on: the exporter omits the flag for
            // visible nodes.
            visible: true,
            rotation: None,
            absolute_bounding_box: None,
            absolute_render_bounds: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            effects: Vec::new(),
            stroke_weight: None,
            individual_stroke_weights: None,
            stroke_align: None,
            stroke_dashes: Vec::new(),
            corner_radius: None,
            rectangle_corner_radii: None,
            layout_mode: None,
            layout_positioning: None,
            layout_grow: None,
            layout_sizing_horizontal: None,
            layout_sizing_vertical: None,
            primary_axis_align_items: None,
            counter_axis_align_items: None,
            item_spacing: None,
            layout_wrap: None,
            item_reverse_z_index: false,
            padding_left: None,
            padding_right: None,
            padding_top: None,
            padding_bottom: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            clips_content: false,
            opacity: None,
            blend_mode: None,
            export_settings: Vec::new(),
            characters: None,
            style: None,
            component_properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

impl RawNode {
    /// The node's type, treating a missing tag as an unknown widget so the
    /// caller can warn and skip instead of failing deserialization.
    pub fn node_type(&self) -> NodeType {
        self.node_type.unwrap_or(NodeType::Widget)
    }

    /// Width/height from the absolute bounding box, when both are positive.
    pub fn bounding_size(&self) -> Option<(f64, f64)> {
        let rect = self.absolute_bounding_box?;
        if rect.width > 0.0 && rect.height > 0.0 {
            Some((rect.width, rect.height))
        } else {
            None
        }
    }

    /// Whether any export hint asks for vector output.
    pub fn has_vector_export_hint(&self) -> bool {
        self.export_settings
            .iter()
            .any(|setting| setting.format.eq_ignore_ascii_case("SVG"))
    }

    pub fn has_visible_fill(&self) -> bool {
        self.fills
            .iter()
            .any(|fill| fill.visible() && fill.opacity() > 0.0)
    }

    pub fn has_visible_stroke(&self) -> bool {
        self.strokes.iter().any(Paint::visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_node_deserializes_with_defaults() {
        let json = r#"{
            "id": "1:2",
            "name": "Card",
            "type": "FRAME",
            "absoluteBoundingBox": { "x": 10.0, "y": 20.0, "width": 100.0, "height": 50.0 },
            "layoutMode": "HORIZONTAL",
            "children": [
                { "id": "1:3", "name": "Label", "type": "TEXT", "characters": "hi" }
            ]
        }"#;
        let node: RawNode = serde_json::from_str(json).unwrap();
        assert!(node.visible);
        assert_eq!(node.node_type(), NodeType::Frame);
        assert_eq!(node.layout_mode, Some(LayoutMode::Horizontal));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].characters.as_deref(), Some("hi"));
    }

    #[test]
    fn unknown_type_tag_fails_open_as_widget() {
        let node = RawNode {
            id: "x".into(),
            ..RawNode::default()
        };
        assert_eq!(node.node_type(), NodeType::Widget);
    }

    #[test]
    fn svg_export_hint_is_case_insensitive() {
        let node = RawNode {
            export_settings: vec![ExportSetting {
                format: "svg".into(),
            }],
            ..RawNode::default()
        };
        assert!(node.has_vector_export_hint());
    }
}
