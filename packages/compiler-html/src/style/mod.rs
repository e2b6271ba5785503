//! Style synthesis.
//!
//! Each sub-module owns one concern and is total: it returns zero or more
//! `property: value` declarations and never fails. The [`StyleBuilder`]
//! chains them in the fixed order the emitter relies on: size → padding →
//! position → blend → background → shadow → border/radius → blur.

pub mod background;
pub mod blend;
pub mod blur;
pub mod border;
pub mod padding;
pub mod position;
pub mod shadow;
pub mod size;
pub mod text_style;

use scenemark_common::{decl, decl_px};
use scenemark_normalizer::IrNode;
use scenemark_scene::geometry::auto_layout_to_flex;
use scenemark_scene::{ConversionSettings, NodeType, TextAutoResize};

/// Chaining declaration collector for one node, mirroring the fixed
/// synthesis order.
pub struct StyleBuilder<'a> {
    node: &'a IrNode,
    settings: &'a ConversionSettings,
    styles: Vec<String>,
    data: Vec<(String, Option<String>)>,
}

impl<'a> StyleBuilder<'a> {
    pub fn new(node: &'a IrNode, settings: &'a ConversionSettings) -> Self {
        Self {
            node,
            settings,
            styles: Vec::new(),
            data: Vec::new(),
        }
    }

    fn push(&mut self, style: Option<String>) {
        if let Some(style) = style {
            self.styles.push(style);
        }
    }

    fn push_all(&mut self, styles: Vec<String>) {
        self.styles.extend(styles);
    }

    /// size → padding → position → blend.
    pub fn common_position_styles(self) -> Self {
        self.size().padding().position(false).blend()
    }

    /// background → shadow → border/radius → blur.
    pub fn common_shape_styles(self) -> Self {
        self.fills().shadow().border().blur()
    }

    pub fn size(mut self) -> Self {
        let sizes = size::size_styles(self.node);
        match self.node.text.as_ref().map(|t| t.auto_resize) {
            // Auto-sized text hugs its content on both axes.
            Some(TextAutoResize::WidthAndHeight) => {}
            Some(TextAutoResize::Height) => self.push(sizes.width),
            _ => {
                self.push(sizes.width);
                self.push(sizes.height);
            }
        }
        self.push_all(sizes.constraints);
        self
    }

    pub fn padding(mut self) -> Self {
        self.push_all(padding::padding_styles(self.node));
        self
    }

    pub fn position(mut self, use_absolute_bounds: bool) -> Self {
        self.push_all(position::position_styles(self.node, use_absolute_bounds));
        self
    }

    pub fn blend(mut self) -> Self {
        self.push(blend::visibility_style(self.node));
        self.push_all(blend::rotation_styles(self.node));
        self.push(blend::opacity_style(self.node));
        self.push(blend::blend_mode_style(self.node));
        self
    }

    pub fn fills(mut self) -> Self {
        if self.node.node_type == NodeType::Text {
            if let Some(color) = background::color_from_fills(&self.node.fills) {
                self.styles.push(decl("color", color));
            }
        } else {
            self.push_all(background::background_styles(&self.node.fills));
        }
        self
    }

    pub fn shadow(mut self) -> Self {
        if let Some(value) = shadow::box_shadow_value(&self.node.effects) {
            self.styles.push(decl("box-shadow", value));
        }
        self
    }

    pub fn border(mut self) -> Self {
        self.push_all(border::border_radius_styles(self.node));
        self.push_all(border::border_styles(self.node));
        self
    }

    pub fn blur(mut self) -> Self {
        self.push_all(blur::blur_styles(&self.node.effects));
        self
    }

    pub fn text_trim(mut self) -> Self {
        if let Some(text) = &self.node.text {
            self.push_all(text_style::text_trim_styles(text));
        }
        self
    }

    pub fn text_align(mut self) -> Self {
        if let Some(text) = &self.node.text {
            self.push_all(text_style::text_align_styles(text));
        }
        self
    }

    pub fn add_styles(mut self, styles: Vec<String>) -> Self {
        self.push_all(styles);
        self
    }

    pub fn add_data(mut self, label: impl Into<String>, value: Option<String>) -> Self {
        self.data.push((label.into(), value));
        self
    }

    /// Finish the builder: appends the layer-name and component-property
    /// data attributes and returns declarations plus data attributes.
    pub fn build(mut self) -> (Vec<String>, Vec<(String, Option<String>)>) {
        if self.settings.show_layer_names && !self.node.name.trim().is_empty() {
            self.data
                .push(("layer".to_string(), Some(self.node.name.trim().to_string())));
        }
        for (name, value) in &self.node.component_properties {
            self.data.push((name.clone(), Some(value.clone())));
        }
        (self.styles, self.data)
    }
}

/// Auto-layout declarations for a container with a layout mode, in the
/// fixed property order.
pub fn auto_layout_styles(node: &IrNode) -> Vec<String> {
    let flex = auto_layout_to_flex(
        node.layout.mode,
        node.layout.primary_axis_align,
        node.layout.counter_axis_align,
        node.layout.item_spacing,
        node.layout.wrap,
        node.parent_layout_mode,
    );

    let mut styles = Vec::new();
    if let Some(direction) = flex.direction {
        styles.push(decl("flex-direction", direction));
    }
    styles.push(decl("justify-content", flex.justify_content));
    styles.push(decl("align-items", flex.align_items));
    if let Some(gap) = flex.gap {
        styles.push(decl_px("gap", gap));
    }
    styles.push(decl("display", flex.display));
    if let Some(wrap) = flex.wrap {
        styles.push(decl("flex-wrap", wrap));
    }
    if let Some(align_content) = flex.align_content {
        styles.push(decl("align-content", align_content));
    }
    styles
}
