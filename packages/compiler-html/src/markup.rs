//! The markup model produced by the emitter.
//!
//! A `MarkupNode` is one-to-one with an IR node that survives filtering.
//! The serialized shape (`tag`/`styleID`/`classID`/`isSVG` plus optional
//! `content`/`svg`/`src`/`children`) is the wire contract with the external
//! enrichment collaborator, so field names are fixed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Element category. Serialized as the concrete tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupTag {
    #[serde(rename = "div")]
    Block,
    #[serde(rename = "span")]
    Inline,
    #[serde(rename = "img")]
    Image,
}

impl MarkupTag {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkupTag::Block => "div",
            MarkupTag::Inline => "span",
            MarkupTag::Image => "img",
        }
    }
}

/// One emitted element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupNode {
    pub tag: MarkupTag,
    /// Generated stylesheet key, stable and unique within a run.
    #[serde(rename = "styleID")]
    pub style_id: String,
    /// Semantic class name; empty until enrichment fills it in.
    #[serde(rename = "classID")]
    pub class_id: String,
    #[serde(rename = "isSVG")]
    pub is_svg: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MarkupNode>>,
    /// Data attributes; not part of the enrichment exchange.
    #[serde(skip)]
    pub data: Vec<(String, Option<String>)>,
}

impl MarkupNode {
    pub fn new(tag: MarkupTag, style_id: impl Into<String>) -> Self {
        Self {
            tag,
            style_id: style_id.into(),
            class_id: String::new(),
            is_svg: false,
            content: None,
            svg: None,
            src: None,
            children: None,
            data: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        if !children.is_empty() {
            self.children = Some(children);
        }
        self
    }

    pub fn with_data(mut self, label: impl Into<String>, value: Option<String>) -> Self {
        self.data.push((label.into(), value));
        self
    }
}

/// Flat stylesheet keyed by generated class identifiers, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct CssCollection {
    rules: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl CssCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class with its declarations. Re-inserting a key replaces
    /// its declarations in place.
    pub fn insert(&mut self, class: impl Into<String>, declarations: Vec<String>) {
        let class = class.into();
        match self.index.get(&class) {
            Some(&slot) => self.rules[slot].1 = declarations,
            None => {
                self.index.insert(class.clone(), self.rules.len());
                self.rules.push((class, declarations));
            }
        }
    }

    pub fn get(&self, class: &str) -> Option<&[String]> {
        self.index
            .get(class)
            .map(|&slot| self.rules[slot].1.as_slice())
    }

    /// Whether any class carries at least one declaration.
    pub fn has_declarations(&self) -> bool {
        self.rules.iter().any(|(_, decls)| !decls.is_empty())
    }

    /// Render the stylesheet. Classes without declarations are skipped.
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .filter(|(_, decls)| !decls.is_empty())
            .map(|(class, decls)| format!(".{class} {{\n  {};\n}}", decls.join(";\n  ")))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_matches_the_enrichment_contract() {
        let node = MarkupNode::new(MarkupTag::Block, "card")
            .with_children(vec![
                MarkupNode::new(MarkupTag::Inline, "card_span").with_content("hi")
            ])
            .with_data("layer", Some("Card".into()));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["tag"], "div");
        assert_eq!(value["styleID"], "card");
        assert_eq!(value["classID"], "");
        assert_eq!(value["isSVG"], false);
        assert_eq!(value["children"][0]["content"], "hi");
        // Data attributes stay out of the exchange.
        assert!(value.get("data").is_none());
    }

    #[test]
    fn stylesheet_skips_empty_classes() {
        let mut css = CssCollection::new();
        css.insert("a", vec!["width: 1px".into(), "height: 2px".into()]);
        css.insert("b", vec![]);
        let rendered = css.to_css();
        assert_eq!(rendered, ".a {\n  width: 1px;\n  height: 2px;\n}");
        assert!(css.has_declarations());
    }

    #[test]
    fn reinserting_a_class_replaces_in_place() {
        let mut css = CssCollection::new();
        css.insert("a", vec!["width: 1px".into()]);
        css.insert("b", vec!["height: 1px".into()]);
        css.insert("a", vec!["width: 2px".into()]);
        assert_eq!(css.get("a"), Some(&["width: 2px".to_string()][..]));
        assert!(css.to_css().starts_with(".a"));
    }
}
