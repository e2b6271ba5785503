//! Markup serialization: the emitted tree plus the collected stylesheet
//! become the final `{ markup, stylesheet }` strings.

use crate::markup::{CssCollection, MarkupNode, MarkupTag};
use scenemark_common::{class_attribute, data_attribute, indent_block, style_attribute};
use scenemark_scene::{ConversionSettings, GenerationMode};

/// Render the markup forest. Each element starts on its own line; children
/// indent one level per depth.
pub fn render_markup(
    nodes: &[MarkupNode],
    css: &CssCollection,
    settings: &ConversionSettings,
) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&render_node(node, css, settings));
    }
    if let Some(stripped) = out.strip_prefix('\n') {
        stripped.to_string()
    } else {
        out
    }
}

fn attributes(node: &MarkupNode, css: &CssCollection, settings: &ConversionSettings) -> String {
    let mut attrs = String::new();
    for (label, value) in &node.data {
        attrs.push_str(&data_attribute(label, value.as_deref()));
    }
    match settings.html_generation_mode {
        GenerationMode::Stylesheet => {
            attrs.push_str(&class_attribute(&[
                node.style_id.as_str(),
                node.class_id.as_str(),
            ]));
        }
        GenerationMode::Inline => {
            if !node.class_id.is_empty() {
                attrs.push_str(&class_attribute(&[node.class_id.as_str()]));
            }
            if let Some(styles) = css.get(&node.style_id) {
                attrs.push_str(&style_attribute(styles));
            }
        }
    }
    if let Some(src) = &node.src {
        attrs.push_str(&format!(" src=\"{src}\""));
    }
    attrs
}

fn render_node(node: &MarkupNode, css: &CssCollection, settings: &ConversionSettings) -> String {
    let tag = node.tag.as_str();
    let attrs = attributes(node, css, settings);

    if node.tag == MarkupTag::Image {
        return format!("\n<{tag}{attrs} />");
    }

    if let Some(svg) = &node.svg {
        return format!("\n<{tag}{attrs}>\n{}\n</{tag}>", indent_block(svg));
    }

    if let Some(children) = &node.children {
        let inner: String = children
            .iter()
            .map(|child| render_node(child, css, settings))
            .collect();
        return format!("\n<{tag}{attrs}>{}\n</{tag}>", indent_block(&inner));
    }

    match &node.content {
        Some(content) => format!("\n<{tag}{attrs}>{content}</{tag}>"),
        None => format!("\n<{tag}{attrs}></{tag}>"),
    }
}
