//! The markup emitter.
//!
//! Walks the styled IR tree in document order and produces the
//! [`MarkupNode`] forest plus the collected stylesheet. Flattened subtrees
//! become a single wrapper around the exported vector payload; image-filled
//! nodes route through the raster-export collaborator; everything else
//! dispatches to a small set of element templates.

use crate::markup::{CssCollection, MarkupNode, MarkupTag};
use crate::style::{auto_layout_styles, text_style, StyleBuilder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use scenemark_common::{decl, Warnings};
use scenemark_normalizer::context::identifier_from_name;
use scenemark_normalizer::{IrNode, StyledTextSegment};
use scenemark_scene::{ConversionSettings, LayoutMode, NodeType, SceneHost};
use std::collections::HashMap;
use tracing::{debug, instrument};

const PLACEHOLDER_IMAGE_DOMAIN: &str = "https://placehold.co";

pub struct EmitOutput {
    pub nodes: Vec<MarkupNode>,
    pub css: CssCollection,
}

pub struct Emitter<'a, H: SceneHost> {
    host: &'a H,
    settings: &'a ConversionSettings,
    warnings: &'a mut Warnings,
    css: CssCollection,
    class_counts: HashMap<String, usize>,
    /// Raster exports are cached per node to avoid duplicate export calls.
    raster_cache: HashMap<String, String>,
}

impl<'a, H: SceneHost> Emitter<'a, H> {
    pub fn new(host: &'a H, settings: &'a ConversionSettings, warnings: &'a mut Warnings) -> Self {
        Self {
            host,
            settings,
            warnings,
            css: CssCollection::new(),
            class_counts: HashMap::new(),
            raster_cache: HashMap::new(),
        }
    }

    #[instrument(skip_all, fields(roots = nodes.len()))]
    pub async fn emit(mut self, nodes: &[IrNode]) -> EmitOutput {
        let mut out = Vec::new();
        for node in nodes {
            out.extend(self.emit_node(node).await);
        }
        debug!(elements = out.len(), "markup emission complete");
        EmitOutput {
            nodes: out,
            css: self.css,
        }
    }

    /// Register a stylesheet class for a node name, keeping keys unique
    /// even after sanitization collapses distinct names.
    fn register_class(&mut self, name: &str, styles: Vec<String>) -> String {
        let mut key = identifier_from_name(name);
        if key.is_empty() {
            key = "node".to_string();
        }
        let count = self.class_counts.entry(key.clone()).or_insert(0);
        if *count > 0 {
            key = format!("{key}-{count}");
        }
        *count += 1;
        self.css.insert(key.clone(), styles);
        key
    }

    fn emit_node<'s>(&'s mut self, node: &'s IrNode) -> LocalBoxFuture<'s, Vec<MarkupNode>> {
        async move {
            if self.settings.embed_vectors && node.can_be_flattened {
                match self.host.export_vector(&node.id).await {
                    Ok(svg) if svg.is_empty() => return Vec::new(),
                    Ok(svg) => return vec![self.wrap_vector(node, svg)],
                    Err(error) => {
                        debug!(node = %node.unique_name, %error, "vector export failed");
                        self.warnings
                            .add(format!("Failed to render vector for '{}'", node.name));
                    }
                }
            }

            match node.node_type {
                NodeType::Rectangle | NodeType::Ellipse => {
                    self.container(node, Vec::new(), Vec::new()).await
                }
                NodeType::Frame
                | NodeType::Component
                | NodeType::Instance
                | NodeType::ComponentSet => self.frame(node).await,
                NodeType::Section => self.section(node).await,
                NodeType::Text => vec![self.text(node)],
                NodeType::Line => vec![self.line(node)],
                NodeType::Vector => {
                    if !self.settings.embed_vectors {
                        self.warnings.add("Vector is not supported");
                    }
                    self.container(node, Vec::new(), Vec::new()).await
                }
                other => {
                    self.warnings
                        .add(format!("{} node is not supported", other.as_str()));
                    Vec::new()
                }
            }
        }
        .boxed_local()
    }

    async fn emit_children(&mut self, children: &[IrNode]) -> Vec<MarkupNode> {
        let mut out = Vec::new();
        for child in children {
            out.extend(self.emit_node(child).await);
        }
        out
    }

    /// Wrap an exported vector payload in a single positioned element. The
    /// payload gets variable substitution from the mappings collected
    /// during normalization.
    fn wrap_vector(&mut self, node: &IrNode, svg: String) -> MarkupNode {
        let svg = substitute_vector_colors(&svg, &node.color_variable_mappings);
        let (styles, data) = StyleBuilder::new(node, self.settings)
            .add_data("svg-wrapper", None)
            .position(true)
            .build();
        let class = self.register_class(&node.unique_name, styles);

        let mut markup = MarkupNode::new(MarkupTag::Block, class);
        markup.is_svg = true;
        markup.svg = Some(svg);
        markup.data = data;
        markup
    }

    async fn frame(&mut self, node: &IrNode) -> Vec<MarkupNode> {
        let children = self.emit_children(&node.children).await;
        let layout = if node.layout.mode != LayoutMode::None {
            auto_layout_styles(node)
        } else {
            Vec::new()
        };
        self.container(node, children, layout).await
    }

    async fn container(
        &mut self,
        node: &IrNode,
        children: Vec<MarkupNode>,
        additional_styles: Vec<String>,
    ) -> Vec<MarkupNode> {
        // Degenerate geometry: elide the wrapper, promote the children.
        if node.width <= 0.0 || node.height <= 0.0 {
            return children;
        }

        let mut builder = StyleBuilder::new(node, self.settings)
            .common_position_styles()
            .common_shape_styles()
            .add_styles(additional_styles);

        let mut tag = MarkupTag::Block;
        let mut src = None;
        if node.has_image_fill() {
            let has_children = !node.children.is_empty();
            let image_url = self.image_url(node, has_children).await;
            if has_children {
                if let Some(url) = image_url {
                    builder = builder.add_styles(vec![decl(
                        "background-image",
                        format!("url({url})"),
                    )]);
                }
            } else {
                tag = MarkupTag::Image;
                src = image_url;
            }
        }

        let (styles, data) = builder.build();
        let class = self.register_class(&node.unique_name, styles);

        let mut markup = MarkupNode::new(tag, class).with_children(children);
        markup.src = src;
        markup.data = data;
        vec![markup]
    }

    /// The image source for an image-filled node: an embedded base64 export
    /// or a sized placeholder. A failed export leaves the node without its
    /// image.
    async fn image_url(&mut self, node: &IrNode, exclude_children: bool) -> Option<String> {
        if !self.settings.embed_images {
            return Some(placeholder_image(node.width, node.height));
        }
        if let Some(cached) = self.raster_cache.get(&node.id) {
            return Some(cached.clone());
        }
        match self.host.export_raster(&node.id, exclude_children).await {
            Ok(bytes) => {
                let url = format!("data:image/png;base64,{}", BASE64.encode(bytes));
                self.raster_cache.insert(node.id.clone(), url.clone());
                Some(url)
            }
            Err(error) => {
                debug!(node = %node.unique_name, %error, "raster export failed");
                self.warnings
                    .add(format!("Failed to export image for '{}'", node.name));
                None
            }
        }
    }

    async fn section(&mut self, node: &IrNode) -> Vec<MarkupNode> {
        let children = self.emit_children(&node.children).await;
        let (styles, data) = StyleBuilder::new(node, self.settings)
            .size()
            .position(false)
            .fills()
            .build();
        let class = self.register_class(&node.unique_name, styles);

        let mut markup = MarkupNode::new(MarkupTag::Block, class).with_children(children);
        markup.data = data;
        vec![markup]
    }

    /// Lines have no height of their own, so they bypass the degenerate
    /// size check containers apply.
    fn line(&mut self, node: &IrNode) -> MarkupNode {
        let (styles, data) = StyleBuilder::new(node, self.settings)
            .common_position_styles()
            .common_shape_styles()
            .build();
        let class = self.register_class(&node.unique_name, styles);
        let mut markup = MarkupNode::new(MarkupTag::Block, class);
        markup.data = data;
        markup
    }

    fn text(&mut self, node: &IrNode) -> MarkupNode {
        let mut builder = StyleBuilder::new(node, self.settings)
            .common_position_styles()
            .text_trim()
            .text_align();

        let segments: &[StyledTextSegment] = node
            .text
            .as_ref()
            .map(|t| t.segments.as_slice())
            .unwrap_or_default();

        if let Some(filter) = text_style::text_blur_style(&node.effects) {
            builder = builder.add_styles(vec![filter]);
        }
        if let Some(shadow) = text_style::text_shadow_style(&node.effects) {
            builder = builder.add_styles(vec![shadow]);
        }

        // Single-run fast path: the run's style merges into the node.
        if let [segment] = segments {
            builder = builder.add_styles(text_style::segment_styles(segment));
            let (styles, data) = builder.build();
            let class = self.register_class(&node.unique_name, styles);
            let mut markup =
                MarkupNode::new(MarkupTag::Inline, class).with_content(segment_content(segment));
            markup.data = data;
            return markup;
        }

        let children: Vec<MarkupNode> = segments
            .iter()
            .map(|segment| {
                let styles = text_style::segment_styles(segment);
                self.css.insert(segment.unique_id.clone(), styles);
                MarkupNode::new(MarkupTag::Inline, segment.unique_id.clone())
                    .with_content(segment_content(segment))
            })
            .collect();

        let (styles, data) = builder.build();
        let class = self.register_class(&node.unique_name, styles);
        let mut markup = MarkupNode::new(MarkupTag::Inline, class).with_children(children);
        if children_is_empty(&markup) {
            // No runs at all: fall back to the raw characters.
            if let Some(text) = &node.text {
                if !text.characters.is_empty() {
                    markup.content = Some(prepare_text(&text.characters));
                }
            }
        }
        markup.data = data;
        markup
    }
}

fn children_is_empty(node: &MarkupNode) -> bool {
    node.children.as_ref().map_or(true, Vec::is_empty)
}

fn placeholder_image(width: f64, height: f64) -> String {
    format!(
        "{PLACEHOLDER_IMAGE_DOMAIN}/{}x{}",
        width.round(),
        height.round()
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape, restore line breaks, and protect collapsed double spaces so the
/// rendered markup keeps the visual spacing.
fn prepare_text(characters: &str) -> String {
    escape_html(characters)
        .replace('\n', "<br/>")
        .replace("  ", "&nbsp;&nbsp;")
}

fn segment_content(segment: &StyledTextSegment) -> String {
    let content = prepare_text(&segment.characters);
    if segment.open_type.subs {
        format!("<sub>{content}</sub>")
    } else if segment.open_type.sups {
        format!("<sup>{content}</sup>")
    } else {
        content
    }
}

/// Replace resolved colors inside a vector payload with `var()` references,
/// covering both attribute (`fill="..."`) and inline-style (`fill: ...`)
/// forms; unmapped colors pass through untouched.
fn substitute_vector_colors(svg: &str, mappings: &HashMap<String, String>) -> String {
    if mappings.is_empty() {
        return svg.to_string();
    }

    let mut out = String::with_capacity(svg.len());
    let mut rest = svg;
    while let Some(start) = find_color_site(rest) {
        let (prefix, attribute, value, suffix_start) = start;
        out.push_str(prefix);
        let normalized = value.trim().to_lowercase();
        match mappings.get(&normalized) {
            Some(variable) => {
                out.push_str(&format!("{attribute}var(--{variable}, {value})"));
            }
            None => {
                out.push_str(&format!("{attribute}{value}"));
            }
        }
        rest = suffix_start;
    }
    out.push_str(rest);
    out
}

/// Locate the next `fill="…"`/`stroke="…"` attribute or `fill: …`/`stroke: …`
/// style property. Returns (text before the site, the attribute text up to
/// the value, the color value, the remaining input).
fn find_color_site(input: &str) -> Option<(&str, &str, &str, &str)> {
    let mut best: Option<(usize, usize, usize, usize)> = None;
    for needle in ["fill=\"", "stroke=\"", "fill: ", "stroke: "] {
        if let Some(at) = input.find(needle) {
            let value_start = at + needle.len();
            let value_end = if needle.ends_with('"') {
                value_start + input[value_start..].find('"')?
            } else {
                let rest = &input[value_start..];
                let end = rest
                    .find(|c| c == ';' || c == '"')
                    .unwrap_or(rest.len());
                value_start + end
            };
            if best.map_or(true, |(b, _, _, _)| at < b) {
                best = Some((at, value_start, value_end, value_end));
            }
        }
    }
    let (at, value_start, value_end, rest_at) = best?;
    Some((
        &input[..at],
        &input[at..value_start],
        &input[value_start..value_end],
        &input[rest_at..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_spaces_become_non_breaking_pairs() {
        assert_eq!(
            prepare_text("Hello  world"),
            "Hello&nbsp;&nbsp;world"
        );
        assert_eq!(prepare_text("a\nb"), "a<br/>b");
        assert_eq!(prepare_text("1 < 2"), "1 &lt; 2");
    }

    #[test]
    fn vector_colors_substitute_to_variables() {
        let mut mappings = HashMap::new();
        mappings.insert("#ff0000".to_string(), "colors-primary".to_string());
        let svg = r##"<svg><path fill="#FF0000" stroke="#00FF00"/></svg>"##;
        let out = substitute_vector_colors(svg, &mappings);
        assert!(out.contains(r##"fill="var(--colors-primary, #FF0000)""##));
        assert!(out.contains(r##"stroke="#00FF00""##));
    }

    #[test]
    fn style_properties_substitute_too() {
        let mut mappings = HashMap::new();
        mappings.insert("black".to_string(), "ink".to_string());
        let svg = r#"<path style="fill: black; opacity: 1"/>"#;
        let out = substitute_vector_colors(svg, &mappings);
        assert!(out.contains("fill: var(--ink, black);"), "{out}");
    }
}
