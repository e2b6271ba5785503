//! The scene-graph normalization pass.
//!
//! Walks the raw exported tree top-down, producing the canonical IR:
//! invisible and unsupported nodes are dropped, empty containers collapse to
//! rectangles, groups are inlined with their rotation folded into the
//! children, geometry is re-expressed relative to the parent with compound
//! rotation undone, style-variable bindings are resolved, and names are
//! deduplicated per run.
//!
//! Children are processed sequentially (document order drives name
//! ordinals); the only fan-out is at the paint-list level, where variable
//! lookups for one node's fills/strokes/effects are issued together and
//! joined.

use crate::context::{identifier_from_name, sanitize_css_name, ConversionContext};
use crate::icon::classify_icon;
use crate::ir::{IrNode, LayoutFields, StyledTextSegment, TextFields};
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use scenemark_scene::{
    ConversionSettings, Effect, HostError, LayoutMode, LayoutPositioning, LayoutSizing, NodeType,
    Paint, RawNode, Rect, SceneHost, Vector2,
};
use scenemark_scene::geometry::reconstruct_rectangle;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("top-level node is missing its id")]
    MissingId,

    #[error("{0} node is not supported at the top level")]
    UnsupportedTopLevel(&'static str),

    #[error("host error: {0}")]
    Host(#[from] HostError),
}

/// Types the normalizer can never turn into renderable IR. Nested
/// occurrences are skipped; at the top level they abort the subtree.
fn is_unsupported(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Slice
            | NodeType::Connector
            | NodeType::Sticky
            | NodeType::ShapeWithText
            | NodeType::CodeBlock
            | NodeType::Widget
    )
}

/// Parent facts threaded down the walk in place of a back-pointer.
#[derive(Debug, Clone, Copy)]
struct ParentContext {
    origin: Option<Rect>,
    layout_mode: LayoutMode,
    can_be_flattened: bool,
}

enum NodeOutcome {
    Dropped,
    One(Box<IrNode>),
    /// Result of inlining a group: the group's processed children.
    Many(Vec<IrNode>),
}

pub struct Normalizer<'a, H: SceneHost> {
    host: &'a H,
    settings: &'a ConversionSettings,
    ctx: ConversionContext,
}

impl<'a, H: SceneHost> Normalizer<'a, H> {
    pub fn new(host: &'a H, settings: &'a ConversionSettings) -> Self {
        Self {
            host,
            settings,
            ctx: ConversionContext::new(),
        }
    }

    /// Normalize a selection of root nodes. Fatal errors (missing identity
    /// or unsupported type at the top level) abort the whole call; nested
    /// problems degrade locally.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub async fn normalize(
        mut self,
        roots: Vec<RawNode>,
    ) -> NormalizeResult<(Vec<IrNode>, ConversionContext)> {
        let mut out = Vec::new();
        for mut root in roots {
            if root.id.trim().is_empty() {
                return Err(NormalizeError::MissingId);
            }
            let node_type = root.node_type();
            if is_unsupported(node_type) {
                return Err(NormalizeError::UnsupportedTopLevel(node_type.as_str()));
            }

            // A top-level group keeps a wrapper (unlike nested groups, which
            // are inlined): it is retyped to a frame and its rotation moves
            // into the children's cumulative term.
            let mut root_cumulative = 0.0;
            if node_type == NodeType::Group {
                root.node_type = Some(NodeType::Frame);
                root_cumulative = root.rotation.take().unwrap_or(0.0);
            }

            match self.process_node(root, None, root_cumulative).await? {
                NodeOutcome::Dropped => {}
                NodeOutcome::One(node) => out.push(*node),
                NodeOutcome::Many(nodes) => out.extend(nodes),
            }
        }
        Ok((out, self.ctx))
    }

    fn process_node(
        &mut self,
        mut node: RawNode,
        parent: Option<ParentContext>,
        parent_cumulative: f64,
    ) -> LocalBoxFuture<'_, NormalizeResult<NodeOutcome>> {
        async move {
            if node.id.is_empty() || !node.visible {
                return Ok(NodeOutcome::Dropped);
            }

            // Empty containers render exactly like rectangles.
            let mut node_type = node.node_type();
            if matches!(
                node_type,
                NodeType::Frame | NodeType::Instance | NodeType::Component | NodeType::ComponentSet
            ) && node.children.is_empty()
            {
                node.node_type = Some(NodeType::Rectangle);
                node_type = NodeType::Rectangle;
            }

            // Groups never reach the IR: process their children in place,
            // folding the group's rotation into the cumulative term.
            if node_type == NodeType::Group {
                let group_rotation = node.rotation.unwrap_or(0.0);
                let mut inlined = Vec::new();
                for child in node.children {
                    if !child.visible {
                        continue;
                    }
                    match self
                        .process_node(child, parent, parent_cumulative + group_rotation)
                        .await?
                    {
                        NodeOutcome::Dropped => {}
                        NodeOutcome::One(child_node) => inlined.push(*child_node),
                        NodeOutcome::Many(children) => inlined.extend(children),
                    }
                }
                return Ok(NodeOutcome::Many(inlined));
            }

            // Nested slices vanish silently; other unrenderable types stay
            // in the IR so the emitter can warn about them in place.
            if node_type == NodeType::Slice {
                return Ok(NodeOutcome::Dropped);
            }

            let cumulative_rotation = if parent.is_some() {
                parent_cumulative
            } else {
                0.0
            };
            let rotation = node.rotation.unwrap_or(0.0);
            let unique_name = self.ctx.unique_name(&node.name);

            let text = if node_type == NodeType::Text {
                Some(self.build_text_fields(&node, &unique_name).await)
            } else {
                None
            };

            // Relative geometry: undo the compounded rotation against the
            // parent's bounding-box origin.
            let mut x = 0.0;
            let mut y = 0.0;
            let mut width = 0.0;
            let mut height = 0.0;
            let mut parent_origin = None;
            if let Some(bounds) = node.absolute_bounding_box {
                match parent.and_then(|p| p.origin) {
                    Some(origin) => {
                        let rect = reconstruct_rectangle(
                            &Rect {
                                x: bounds.x - origin.x,
                                y: bounds.y - origin.y,
                                width: bounds.width,
                                height: bounds.height,
                            },
                            -(rotation + cumulative_rotation),
                        );
                        width = rect.width;
                        height = rect.height;
                        x = rect.left;
                        y = rect.top;
                        parent_origin = Some(Vector2 {
                            x: origin.x,
                            y: origin.y,
                        });
                    }
                    None => {
                        width = bounds.width;
                        height = bounds.height;
                    }
                }
            }

            // Only the outermost flattenable ancestor is flattened.
            let inside_flattened = parent.is_some_and(|p| p.can_be_flattened);
            let can_be_flattened = if self.settings.embed_vectors && !inside_flattened {
                let classification = classify_icon(&node);
                debug!(
                    node = %unique_name,
                    flattenable = classification.flattenable,
                    reason = %classification.reason,
                    "icon classification"
                );
                classification.flattenable
            } else {
                false
            };

            if self.settings.use_color_variables {
                self.resolve_paint_variables(&mut node.fills).await;
                self.resolve_paint_variables(&mut node.strokes).await;
                self.resolve_effect_variables(&mut node.effects).await;
            }

            let has_children = !node.children.is_empty();
            let mut layout = LayoutFields {
                mode: node.layout_mode.unwrap_or_default(),
                positioning: node.layout_positioning.unwrap_or_default(),
                grow: node.layout_grow.unwrap_or(0.0),
                sizing_horizontal: node.layout_sizing_horizontal.unwrap_or_default(),
                sizing_vertical: node.layout_sizing_vertical.unwrap_or_default(),
                primary_axis_align: node.primary_axis_align_items.unwrap_or_default(),
                counter_axis_align: node.counter_axis_align_items.unwrap_or_default(),
                item_spacing: node.item_spacing.unwrap_or(0.0),
                wrap: node.layout_wrap.unwrap_or_default(),
                reverse_z_index: node.item_reverse_z_index,
                padding_left: node.padding_left.unwrap_or(0.0),
                padding_right: node.padding_right.unwrap_or(0.0),
                padding_top: node.padding_top.unwrap_or(0.0),
                padding_bottom: node.padding_bottom.unwrap_or(0.0),
            };
            // A hug-sized axis with nothing to hug behaves as fixed.
            if layout.sizing_horizontal == LayoutSizing::Hug && !has_children {
                layout.sizing_horizontal = LayoutSizing::Fixed;
            }
            if layout.sizing_vertical == LayoutSizing::Hug && !has_children {
                layout.sizing_vertical = LayoutSizing::Fixed;
            }

            let component_properties = extract_component_properties(&node);

            let child_context = ParentContext {
                origin: node.absolute_bounding_box,
                layout_mode: layout.mode,
                can_be_flattened,
            };
            let mut children = Vec::new();
            for child in std::mem::take(&mut node.children) {
                if !child.visible {
                    continue;
                }
                match self
                    .process_node(child, Some(child_context), parent_cumulative)
                    .await?
                {
                    NodeOutcome::Dropped => {}
                    NodeOutcome::One(child_node) => children.push(*child_node),
                    NodeOutcome::Many(inlined) => children.extend(inlined),
                }
            }

            let is_relative = !children.is_empty()
                && (layout.mode == LayoutMode::None
                    || children
                        .iter()
                        .any(|c| c.layout.positioning == LayoutPositioning::Absolute));

            if layout.reverse_z_index && layout.mode != LayoutMode::None {
                children = reverse_free_form_order(children);
            }

            let mut ir = IrNode {
                id: node.id,
                name: node.name,
                unique_name,
                node_type,
                visible: node.visible,
                rotation,
                cumulative_rotation,
                x,
                y,
                width,
                height,
                absolute_bounding_box: node.absolute_bounding_box,
                parent_origin,
                fills: node.fills,
                strokes: node.strokes,
                effects: node.effects,
                stroke_weight: node.stroke_weight,
                stroke_weights: node.individual_stroke_weights,
                stroke_align: node.stroke_align.unwrap_or_default(),
                stroke_dashes: node.stroke_dashes,
                corner_radius: node.corner_radius,
                rectangle_corner_radii: node.rectangle_corner_radii,
                clips_content: node.clips_content,
                opacity: node.opacity.unwrap_or(1.0),
                blend_mode: node.blend_mode.unwrap_or_default(),
                layout,
                min_width: node.min_width,
                max_width: node.max_width,
                min_height: node.min_height,
                max_height: node.max_height,
                has_parent: parent.is_some(),
                parent_layout_mode: parent.map(|p| p.layout_mode),
                is_relative,
                can_be_flattened,
                color_variable_mappings: HashMap::new(),
                text,
                component_properties,
                children,
            };

            if can_be_flattened && self.settings.use_color_variables {
                let mut mappings = HashMap::new();
                collect_color_mappings(&ir, &mut mappings);
                ir.color_variable_mappings = mappings;
            }

            Ok(NodeOutcome::One(Box::new(ir)))
        }
        .boxed_local()
    }

    async fn build_text_fields(&mut self, node: &RawNode, unique_name: &str) -> TextFields {
        let raw_segments = match self.host.text_segments(&node.id).await {
            Ok(segments) => segments,
            Err(error) => {
                debug!(node = %node.name, %error, "text run query failed");
                self.ctx
                    .warnings
                    .add(format!("Failed to read text runs for '{}'", node.name));
                Vec::new()
            }
        };

        let base_id = identifier_from_name(unique_name);
        let total = raw_segments.len();
        let mut segments = Vec::with_capacity(total);
        for (index, mut segment) in raw_segments.into_iter().enumerate() {
            if self.settings.use_color_variables {
                for fill in &segment.fills {
                    if !fill.blend_mode().is_default() {
                        self.ctx
                            .warnings
                            .add("Blend modes are not supported on text color");
                    }
                }
                self.resolve_paint_variables(&mut segment.fills).await;
            }
            let unique_id = if total == 1 {
                format!("{base_id}_span")
            } else {
                format!("{base_id}_span_{:02}", index + 1)
            };
            segments.push(StyledTextSegment {
                unique_id,
                characters: segment.characters,
                font_family: segment.font_family,
                font_style: segment.font_style,
                font_size: segment.font_size,
                font_weight: segment.font_weight,
                text_decoration: segment.text_decoration,
                text_case: segment.text_case,
                letter_spacing: segment.letter_spacing,
                line_height: segment.line_height,
                fills: segment.fills,
                open_type: segment.open_type_features,
            });
        }

        let style = node.style.clone().unwrap_or_default();
        TextFields {
            characters: node.characters.clone().unwrap_or_default(),
            segments,
            auto_resize: style.text_auto_resize.unwrap_or_default(),
            align_horizontal: style.text_align_horizontal.unwrap_or_default(),
            align_vertical: style.text_align_vertical.unwrap_or_default(),
            leading_trim: style.leading_trim.unwrap_or_default(),
        }
    }

    /// Resolve the variable bindings of one paint list. Lookups for the list
    /// are issued together and joined; results land in the run-scoped memo.
    async fn resolve_paint_variables(&mut self, paints: &mut [Paint]) {
        let mut wanted: Vec<String> = Vec::new();
        for paint in paints.iter() {
            match paint {
                Paint::Solid(solid) => {
                    if let Some(binding) = solid.bound_variables.as_ref().and_then(|b| b.color.as_ref())
                    {
                        wanted.push(binding.id.clone());
                    }
                }
                Paint::GradientLinear(gradient)
                | Paint::GradientRadial(gradient)
                | Paint::GradientAngular(gradient)
                | Paint::GradientDiamond(gradient) => {
                    for stop in &gradient.gradient_stops {
                        if let Some(binding) =
                            stop.bound_variables.as_ref().and_then(|b| b.color.as_ref())
                        {
                            wanted.push(binding.id.clone());
                        }
                    }
                }
                Paint::Image(_) => {}
            }
        }
        self.lookup_variables(wanted).await;

        for paint in paints.iter_mut() {
            match paint {
                Paint::Solid(solid) => {
                    if let Some(binding) = solid.bound_variables.as_ref().and_then(|b| b.color.as_ref())
                    {
                        solid.variable_color_name = self.resolved_name(binding);
                    }
                }
                Paint::GradientLinear(gradient)
                | Paint::GradientRadial(gradient)
                | Paint::GradientAngular(gradient)
                | Paint::GradientDiamond(gradient) => {
                    for stop in &mut gradient.gradient_stops {
                        if let Some(binding) =
                            stop.bound_variables.as_ref().and_then(|b| b.color.as_ref())
                        {
                            stop.variable_color_name = self.resolved_name(binding);
                        }
                    }
                }
                Paint::Image(_) => {}
            }
        }
    }

    async fn resolve_effect_variables(&mut self, effects: &mut [Effect]) {
        let mut wanted: Vec<String> = Vec::new();
        for effect in effects.iter() {
            if let Some(shadow) = effect.as_shadow() {
                if let Some(binding) = shadow.bound_variables.as_ref().and_then(|b| b.color.as_ref())
                {
                    wanted.push(binding.id.clone());
                }
            }
        }
        self.lookup_variables(wanted).await;

        for effect in effects.iter_mut() {
            let shadow = match effect {
                Effect::DropShadow(shadow) | Effect::InnerShadow(shadow) => shadow,
                _ => continue,
            };
            if let Some(binding) = shadow.bound_variables.as_ref().and_then(|b| b.color.as_ref()) {
                shadow.variable_color_name = self.resolved_name(binding);
            }
        }
    }

    /// Populate the memo for any ids it does not already hold.
    async fn lookup_variables(&mut self, mut ids: Vec<String>) {
        ids.sort();
        ids.dedup();
        ids.retain(|id| self.ctx.cached_variable_name(id).is_none());
        if ids.is_empty() {
            return;
        }
        let host = self.host;
        let results = join_all(ids.iter().map(|id| host.resolve_color_variable(id))).await;
        for (id, result) in ids.into_iter().zip(results) {
            let name = match result {
                Ok(name) => name,
                Err(error) => {
                    debug!(variable = %id, %error, "variable lookup failed");
                    None
                }
            };
            self.ctx.cache_variable_name(id, name);
        }
    }

    /// The binding's own name wins over the host lookup; either way the
    /// result is sanitized for CSS.
    fn resolved_name(&self, binding: &scenemark_scene::VariableBinding) -> Option<String> {
        binding
            .name
            .clone()
            .or_else(|| {
                self.ctx
                    .cached_variable_name(&binding.id)
                    .and_then(|cached| cached.clone())
            })
            .map(|name| sanitize_css_name(&name))
    }
}

/// When a layout explicitly reverses paint order, free-form children come
/// first (in reverse document order), then flow children in document order.
fn reverse_free_form_order(children: Vec<IrNode>) -> Vec<IrNode> {
    let mut free_form = Vec::new();
    let mut flow = Vec::new();
    for child in children {
        if child.layout.positioning == LayoutPositioning::Absolute {
            free_form.push(child);
        } else {
            flow.push(child);
        }
    }
    free_form.reverse();
    free_form.extend(flow);
    free_form
}

fn extract_component_properties(node: &RawNode) -> Vec<(String, String)> {
    use scenemark_scene::node::ComponentPropertyKind;

    let mut properties: Vec<(String, String)> = node
        .component_properties
        .iter()
        .filter(|(_, prop)| {
            matches!(
                prop.kind,
                ComponentPropertyKind::Variant | ComponentPropertyKind::Boolean
            )
        })
        .map(|(name, prop)| {
            let clean = name
                .split('#')
                .next()
                .unwrap_or(name)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
                .to_lowercase();
            let value = match &prop.value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (clean, value)
        })
        .collect();
    properties.sort();
    properties
}

/// Collect resolved color → variable-name mappings from a flattened subtree,
/// for color substitution inside the embedded vector payload.
fn collect_color_mappings(node: &IrNode, mappings: &mut HashMap<String, String>) {
    for paint in node.fills.iter().chain(node.strokes.iter()) {
        let Paint::Solid(solid) = paint else { continue };
        let (Some(name), Some(_)) = (
            solid.variable_color_name.as_ref(),
            solid.bound_variables.as_ref().and_then(|b| b.color.as_ref()),
        ) else {
            continue;
        };

        let r = (solid.color.r * 255.0).round() as u8;
        let g = (solid.color.g * 255.0).round() as u8;
        let b = (solid.color.b * 255.0).round() as u8;
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        mappings.insert(hex, name.clone());

        // Vector serializers shorten pure white/black; alias those forms.
        if r == 255 && g == 255 && b == 255 {
            mappings.insert("white".to_string(), name.clone());
            mappings.insert("rgb(255,255,255)".to_string(), name.clone());
        } else if r == 0 && g == 0 && b == 0 {
            mappings.insert("black".to_string(), name.clone());
            mappings.insert("rgb(0,0,0)".to_string(), name.clone());
        }
    }
    for child in &node.children {
        collect_color_mappings(child, mappings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenemark_scene::{
        BoundVariables, ConversionSettings, Paint, RawTextSegment, Rgb, SolidPaint,
        VariableBinding,
    };
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeHost {
        segments: HashMap<String, Vec<RawTextSegment>>,
        variables: HashMap<String, String>,
    }

    impl SceneHost for FakeHost {
        async fn text_segments(&self, node_id: &str) -> Result<Vec<RawTextSegment>, HostError> {
            Ok(self.segments.get(node_id).cloned().unwrap_or_default())
        }

        async fn resolve_color_variable(
            &self,
            variable_id: &str,
        ) -> Result<Option<String>, HostError> {
            Ok(self.variables.get(variable_id).cloned())
        }

        async fn export_raster(
            &self,
            node_id: &str,
            _exclude_children: bool,
        ) -> Result<Vec<u8>, HostError> {
            Err(HostError::ExportFailed {
                id: node_id.to_string(),
                reason: "not supported by the fake".into(),
            })
        }

        async fn export_vector(&self, _node_id: &str) -> Result<String, HostError> {
            Ok("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".into())
        }
    }

    fn raw(id: &str, name: &str, node_type: NodeType) -> RawNode {
        RawNode {
            id: id.into(),
            name: name.into(),
            node_type: Some(node_type),
            ..RawNode::default()
        }
    }

    fn with_bounds(mut node: RawNode, x: f64, y: f64, width: f64, height: f64) -> RawNode {
        node.absolute_bounding_box = Some(Rect {
            x,
            y,
            width,
            height,
        });
        node
    }

    async fn normalize(roots: Vec<RawNode>) -> Vec<IrNode> {
        let host = FakeHost::default();
        let settings = ConversionSettings::default();
        let (nodes, _) = Normalizer::new(&host, &settings)
            .normalize(roots)
            .await
            .unwrap();
        nodes
    }

    #[tokio::test]
    async fn groups_are_inlined_recursively() {
        let mut inner = raw("1:4", "Inner", NodeType::Group);
        inner.children = vec![
            with_bounds(raw("1:5", "C", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
            with_bounds(raw("1:6", "D", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
        ];
        let mut outer = raw("1:1", "Outer", NodeType::Group);
        outer.children = vec![
            with_bounds(raw("1:2", "A", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
            with_bounds(raw("1:3", "B", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
            inner,
        ];
        let mut frame = with_bounds(raw("1:0", "Frame", NodeType::Frame), 0.0, 0.0, 100.0, 100.0);
        frame.children = vec![outer];

        let nodes = normalize(vec![frame]).await;
        assert_eq!(nodes.len(), 1);
        let children = &nodes[0].children;
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.node_type != NodeType::Group));
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn sibling_names_are_deduplicated_in_order() {
        let mut frame = with_bounds(raw("0:0", "Root", NodeType::Frame), 0.0, 0.0, 500.0, 500.0);
        frame.children = (0..10)
            .map(|i| {
                with_bounds(
                    raw(&format!("2:{i}"), "Icon", NodeType::Rectangle),
                    0.0,
                    0.0,
                    10.0,
                    10.0,
                )
            })
            .collect();

        let nodes = normalize(vec![frame]).await;
        let names: Vec<&str> = nodes[0]
            .children
            .iter()
            .map(|c| c.unique_name.as_str())
            .collect();
        assert_eq!(names[0], "Icon");
        assert_eq!(names[1], "Icon_01");
        assert_eq!(names[9], "Icon_09");
    }

    #[tokio::test]
    async fn empty_frames_collapse_to_rectangles() {
        let frame = with_bounds(raw("1:1", "Empty", NodeType::Frame), 0.0, 0.0, 50.0, 50.0);
        let nodes = normalize(vec![frame]).await;
        assert_eq!(nodes[0].node_type, NodeType::Rectangle);
    }

    #[tokio::test]
    async fn relative_geometry_subtracts_parent_origin() {
        let mut frame = with_bounds(raw("1:1", "Frame", NodeType::Frame), 10.0, 20.0, 200.0, 100.0);
        frame.children = vec![with_bounds(
            raw("1:2", "Child", NodeType::Rectangle),
            30.0,
            40.0,
            50.0,
            25.0,
        )];

        let nodes = normalize(vec![frame]).await;
        let child = &nodes[0].children[0];
        assert_eq!(child.x, 20.0);
        assert_eq!(child.y, 20.0);
        assert_eq!(child.width, 50.0);
        assert_eq!(child.height, 25.0);
        assert!(child.has_parent);
    }

    #[tokio::test]
    async fn roots_keep_extents_at_origin() {
        let rect = with_bounds(raw("1:1", "Rect", NodeType::Rectangle), 99.0, 98.0, 100.0, 50.0);
        let nodes = normalize(vec![rect]).await;
        assert_eq!(nodes[0].x, 0.0);
        assert_eq!(nodes[0].y, 0.0);
        assert_eq!(nodes[0].width, 100.0);
        assert_eq!(nodes[0].height, 50.0);
        assert!(!nodes[0].has_parent);
    }

    #[tokio::test]
    async fn missing_root_id_is_fatal() {
        let node = raw("", "NoId", NodeType::Rectangle);
        let host = FakeHost::default();
        let settings = ConversionSettings::default();
        let result = Normalizer::new(&host, &settings).normalize(vec![node]).await;
        assert!(matches!(result, Err(NormalizeError::MissingId)));
    }

    #[tokio::test]
    async fn unsupported_root_type_is_a_reported_failure() {
        let node = raw("1:1", "Slice", NodeType::Slice);
        let host = FakeHost::default();
        let settings = ConversionSettings::default();
        let result = Normalizer::new(&host, &settings).normalize(vec![node]).await;
        assert!(matches!(
            result,
            Err(NormalizeError::UnsupportedTopLevel("SLICE"))
        ));
    }

    #[tokio::test]
    async fn nested_nodes_without_id_are_dropped_silently() {
        let mut frame = with_bounds(raw("1:1", "Frame", NodeType::Frame), 0.0, 0.0, 100.0, 100.0);
        frame.children = vec![
            raw("", "Ghost", NodeType::Rectangle),
            with_bounds(raw("1:3", "Kept", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
        ];
        let nodes = normalize(vec![frame]).await;
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].name, "Kept");
    }

    #[tokio::test]
    async fn hug_sizing_without_children_becomes_fixed() {
        let mut rect = with_bounds(raw("1:1", "Rect", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0);
        rect.layout_sizing_horizontal = Some(LayoutSizing::Hug);
        rect.layout_sizing_vertical = Some(LayoutSizing::Hug);
        let nodes = normalize(vec![rect]).await;
        assert_eq!(nodes[0].layout.sizing_horizontal, LayoutSizing::Fixed);
        assert_eq!(nodes[0].layout.sizing_vertical, LayoutSizing::Fixed);
    }

    #[tokio::test]
    async fn flattenable_only_at_the_outermost_ancestor() {
        let mut frame = with_bounds(raw("1:1", "Icon", NodeType::Frame), 0.0, 0.0, 40.0, 40.0);
        frame.children = vec![with_bounds(
            raw("1:2", "Path", NodeType::Vector),
            10.0,
            10.0,
            20.0,
            20.0,
        )];

        let host = FakeHost::default();
        let settings = ConversionSettings {
            embed_vectors: true,
            ..ConversionSettings::default()
        };
        let (nodes, _) = Normalizer::new(&host, &settings)
            .normalize(vec![frame])
            .await
            .unwrap();
        assert!(nodes[0].can_be_flattened);
        assert!(!nodes[0].children[0].can_be_flattened);
    }

    #[tokio::test]
    async fn reversed_layouts_put_free_form_children_first() {
        let mut frame = with_bounds(raw("1:1", "Row", NodeType::Frame), 0.0, 0.0, 300.0, 100.0);
        frame.layout_mode = Some(LayoutMode::Horizontal);
        frame.item_reverse_z_index = true;
        let mut abs_a = with_bounds(raw("1:2", "AbsA", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0);
        abs_a.layout_positioning = Some(LayoutPositioning::Absolute);
        let mut abs_b = with_bounds(raw("1:4", "AbsB", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0);
        abs_b.layout_positioning = Some(LayoutPositioning::Absolute);
        frame.children = vec![
            abs_a,
            with_bounds(raw("1:3", "Flow", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0),
            abs_b,
        ];

        let nodes = normalize(vec![frame]).await;
        let names: Vec<&str> = nodes[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AbsB", "AbsA", "Flow"]);
        assert!(nodes[0].is_relative);
    }

    #[tokio::test]
    async fn text_runs_get_stable_span_ids() {
        let mut host = FakeHost::default();
        host.segments.insert(
            "1:2".into(),
            vec![
                RawTextSegment {
                    characters: "Hello ".into(),
                    font_size: 14.0,
                    ..RawTextSegment::default()
                },
                RawTextSegment {
                    characters: "world".into(),
                    font_size: 14.0,
                    ..RawTextSegment::default()
                },
            ],
        );
        let text = with_bounds(raw("1:2", "Label", NodeType::Text), 0.0, 0.0, 80.0, 20.0);
        let settings = ConversionSettings::default();
        let (nodes, _) = Normalizer::new(&host, &settings)
            .normalize(vec![text])
            .await
            .unwrap();
        let segments = &nodes[0].text.as_ref().unwrap().segments;
        assert_eq!(segments[0].unique_id, "label_span_01");
        assert_eq!(segments[1].unique_id, "label_span_02");
    }

    #[tokio::test]
    async fn variable_bindings_resolve_through_the_memo() {
        let mut host = FakeHost::default();
        host.variables
            .insert("VariableID:1".into(), "colors/primary 500".into());

        let mut rect = with_bounds(raw("1:1", "Rect", NodeType::Rectangle), 0.0, 0.0, 10.0, 10.0);
        rect.fills = vec![Paint::Solid(SolidPaint {
            color: Rgb {
                r: 0.2,
                g: 0.4,
                b: 0.6,
            },
            opacity: None,
            visible: true,
            blend_mode: Default::default(),
            bound_variables: Some(BoundVariables {
                color: Some(VariableBinding {
                    id: "VariableID:1".into(),
                    name: None,
                }),
            }),
            variable_color_name: None,
        })];

        let settings = ConversionSettings {
            use_color_variables: true,
            ..ConversionSettings::default()
        };
        let (nodes, _) = Normalizer::new(&host, &settings)
            .normalize(vec![rect])
            .await
            .unwrap();
        let solid = nodes[0].fills[0].as_solid().unwrap();
        assert_eq!(
            solid.variable_color_name.as_deref(),
            Some("colors-primary-500")
        );
    }
}
