//! Icon detection.
//!
//! Decides whether a subtree should be flattened into a single embedded
//! vector image. The decision is a fixed-order cascade over the node's type,
//! export hints, size and (for containers) a recursive scan of its visible
//! descendants; the first matching rule wins.

use scenemark_scene::{NodeType, RawNode};

/// Maximum edge length for a shape or container to still count as an icon.
pub const ICON_MAX_SIZE: f64 = 64.0;

/// Classification outcome. The reason string exists for audit logging only;
/// control flow never branches on it beyond the boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconClassification {
    pub flattenable: bool,
    pub reason: String,
}

impl IconClassification {
    fn yes(reason: impl Into<String>) -> Self {
        Self {
            flattenable: true,
            reason: reason.into(),
        }
    }

    fn no(reason: impl Into<String>) -> Self {
        Self {
            flattenable: false,
            reason: reason.into(),
        }
    }
}

/// Basic primitive shapes, icon material when small enough.
fn is_primitive(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Ellipse | NodeType::Rectangle | NodeType::Star | NodeType::Polygon | NodeType::Line
    )
}

/// Complex vector content, icon material at any size.
fn is_complex_vector(node_type: NodeType) -> bool {
    matches!(node_type, NodeType::Vector | NodeType::BooleanOperation)
}

/// Types that qualify regardless of size (or missing size information).
fn ignores_size(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Vector | NodeType::BooleanOperation | NodeType::Polygon | NodeType::Star
    )
}

fn is_icon_container(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Frame | NodeType::Group | NodeType::Component | NodeType::Instance
    )
}

/// Types that can never be (or sit at the top of) an icon.
fn is_disallowed_top(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Slice
            | NodeType::Connector
            | NodeType::Sticky
            | NodeType::ShapeWithText
            | NodeType::CodeBlock
            | NodeType::Widget
            | NodeType::Text
            | NodeType::ComponentSet
    )
}

/// Types that disqualify a container when found anywhere in its subtree.
/// Groups are transparent and scanned through instead.
fn is_disallowed_child(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Frame
            | NodeType::Component
            | NodeType::Instance
            | NodeType::Text
            | NodeType::Slice
            | NodeType::Connector
            | NodeType::Sticky
            | NodeType::ShapeWithText
            | NodeType::CodeBlock
            | NodeType::Widget
            | NodeType::ComponentSet
    )
}

fn within_icon_size(node: &RawNode) -> bool {
    match node.bounding_size() {
        Some((width, height)) => width <= ICON_MAX_SIZE && height <= ICON_MAX_SIZE,
        None => false,
    }
}

struct ChildScan {
    has_disallowed: bool,
    has_vector_content: bool,
}

/// Scan visible descendants. Short-circuits on the first disallowed type,
/// including inside nested groups; invisible children are skipped entirely.
fn scan_children(children: &[RawNode]) -> ChildScan {
    let mut result = ChildScan {
        has_disallowed: false,
        has_vector_content: false,
    };

    for child in children {
        if !child.visible {
            continue;
        }
        let child_type = child.node_type();
        if is_disallowed_child(child_type) {
            result.has_disallowed = true;
            break;
        }
        if is_complex_vector(child_type) || is_primitive(child_type) {
            result.has_vector_content = true;
        } else if child_type == NodeType::Group {
            let nested = scan_children(&child.children);
            if nested.has_disallowed {
                result.has_disallowed = true;
                break;
            }
            if nested.has_vector_content {
                result.has_vector_content = true;
            }
        }
        // Other types (sections, lines without children, …) are ignored.
    }

    result
}

/// Decide whether a node's subtree is flattenable into one vector image.
pub fn classify_icon(node: &RawNode) -> IconClassification {
    let node_type = node.node_type();

    if is_disallowed_top(node_type) {
        return IconClassification::no(format!("disallowed type: {}", node_type.as_str()));
    }

    if node.has_vector_export_hint() {
        return IconClassification::yes("explicit vector export hint");
    }

    if node.bounding_size().is_none() {
        return if ignores_size(node_type) {
            IconClassification::yes(format!(
                "{} is icon material regardless of size",
                node_type.as_str()
            ))
        } else {
            IconClassification::no("no usable size information")
        };
    }

    if ignores_size(node_type) {
        return IconClassification::yes(format!(
            "{} is icon material regardless of size",
            node_type.as_str()
        ));
    }

    if is_primitive(node_type) {
        return if within_icon_size(node) {
            IconClassification::yes(format!("{} within icon size", node_type.as_str()))
        } else {
            IconClassification::no(format!("{} larger than icon size", node_type.as_str()))
        };
    }

    if is_icon_container(node_type) {
        if !within_icon_size(node) {
            return IconClassification::no("container larger than icon size");
        }

        let has_visible_children = node.children.iter().any(|c| c.visible);
        if !has_visible_children {
            return if node.has_visible_fill() || node.has_visible_stroke() {
                IconClassification::yes("empty container with visible fill or stroke")
            } else {
                IconClassification::no("empty container without visible paint")
            };
        }

        let scan = scan_children(&node.children);
        if scan.has_disallowed {
            return IconClassification::no("container has a disallowed descendant");
        }
        if !scan.has_vector_content {
            return IconClassification::no("container has no vector or primitive content");
        }
        return IconClassification::yes("container with vector content within icon size");
    }

    IconClassification::no("not an icon-like structure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenemark_scene::{ExportSetting, Paint, Rect, Rgb, SolidPaint};

    fn node(node_type: NodeType, width: f64, height: f64) -> RawNode {
        RawNode {
            id: "1:1".into(),
            name: "node".into(),
            node_type: Some(node_type),
            absolute_bounding_box: Some(Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            }),
            ..RawNode::default()
        }
    }

    fn solid_fill() -> Paint {
        Paint::Solid(SolidPaint {
            color: Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
            opacity: None,
            visible: true,
            blend_mode: Default::default(),
            bound_variables: None,
            variable_color_name: None,
        })
    }

    #[test]
    fn text_is_never_an_icon() {
        let result = classify_icon(&node(NodeType::Text, 16.0, 16.0));
        assert!(!result.flattenable);
        assert!(result.reason.contains("disallowed"));
    }

    #[test]
    fn export_hint_wins_over_size() {
        let mut frame = node(NodeType::Frame, 500.0, 500.0);
        frame.export_settings = vec![ExportSetting {
            format: "SVG".into(),
        }];
        assert!(classify_icon(&frame).flattenable);
    }

    #[test]
    fn vector_ignores_size() {
        assert!(classify_icon(&node(NodeType::Vector, 400.0, 400.0)).flattenable);
        let mut no_size = node(NodeType::BooleanOperation, 0.0, 0.0);
        no_size.absolute_bounding_box = None;
        assert!(classify_icon(&no_size).flattenable);
    }

    #[test]
    fn primitives_respect_the_size_threshold() {
        assert!(classify_icon(&node(NodeType::Ellipse, 64.0, 64.0)).flattenable);
        assert!(!classify_icon(&node(NodeType::Ellipse, 65.0, 64.0)).flattenable);
    }

    #[test]
    fn empty_container_needs_visible_paint() {
        let plain = node(NodeType::Frame, 24.0, 24.0);
        assert!(!classify_icon(&plain).flattenable);

        let mut filled = node(NodeType::Frame, 24.0, 24.0);
        filled.fills = vec![solid_fill()];
        assert!(classify_icon(&filled).flattenable);
    }

    #[test]
    fn container_with_vector_child_qualifies() {
        let mut frame = node(NodeType::Frame, 40.0, 40.0);
        frame.children = vec![node(NodeType::Vector, 20.0, 20.0)];
        let result = classify_icon(&frame);
        assert!(result.flattenable, "{}", result.reason);
    }

    #[test]
    fn disallowed_descendant_inside_nested_group_disqualifies() {
        let mut group = node(NodeType::Group, 30.0, 30.0);
        group.children = vec![node(NodeType::Text, 10.0, 10.0)];
        let mut frame = node(NodeType::Frame, 40.0, 40.0);
        frame.children = vec![node(NodeType::Vector, 20.0, 20.0), group];
        assert!(!classify_icon(&frame).flattenable);
    }

    #[test]
    fn invisible_disallowed_children_are_skipped() {
        let mut text = node(NodeType::Text, 10.0, 10.0);
        text.visible = false;
        let mut frame = node(NodeType::Frame, 40.0, 40.0);
        frame.children = vec![text, node(NodeType::Vector, 20.0, 20.0)];
        assert!(classify_icon(&frame).flattenable);
    }

    #[test]
    fn classification_is_deterministic() {
        let mut frame = node(NodeType::Frame, 40.0, 40.0);
        frame.children = vec![node(NodeType::Vector, 20.0, 20.0)];
        let first = classify_icon(&frame);
        let second = classify_icon(&frame);
        assert_eq!(first, second);
    }
}
