//! Positioning synthesis.

use scenemark_common::{decl, decl_px};
use scenemark_normalizer::IrNode;
use scenemark_scene::{LayoutMode, LayoutPositioning};

/// A node is absolutely positioned when it is explicitly free-form, or when
/// its parent exists but imposes no layout. A root node is never absolute.
pub fn is_absolute(node: &IrNode) -> bool {
    node.layout.positioning == LayoutPositioning::Absolute
        || (node.has_parent && node.parent_layout_mode == Some(LayoutMode::None))
}

/// Position declarations. Zero offsets are omitted individually: `left`
/// without `top`, `top` without `left`, or neither.
///
/// `use_absolute_bounds` selects the raw bounding-box offset instead of the
/// inverse-rotated coordinates; embedded vector payloads carry their
/// rotation inside the payload.
pub fn position_styles(node: &IrNode, use_absolute_bounds: bool) -> Vec<String> {
    if is_absolute(node) {
        let (x, y) = offset(node, use_absolute_bounds);
        let mut styles = Vec::new();
        if x != 0.0 {
            styles.push(decl_px("left", x));
        }
        if y != 0.0 {
            styles.push(decl_px("top", y));
        }
        styles.push(decl("position", "absolute"));
        return styles;
    }

    if node.is_relative {
        return vec![decl("position", "relative")];
    }

    Vec::new()
}

fn offset(node: &IrNode, use_absolute_bounds: bool) -> (f64, f64) {
    if use_absolute_bounds {
        if let (Some(bounds), Some(origin)) = (node.absolute_bounding_box, node.parent_origin) {
            return (bounds.x - origin.x, bounds.y - origin.y);
        }
    }
    (node.x, node.y)
}
