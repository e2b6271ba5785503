//! Visibility, rotation, opacity and blend-mode synthesis.

use scenemark_common::{decl, fmt_num};
use scenemark_normalizer::IrNode;

pub fn visibility_style(node: &IrNode) -> Option<String> {
    // Invisible nodes are filtered before emission; this stays total for
    // direct use on synthetic nodes.
    if node.visible {
        None
    } else {
        Some(decl("visibility", "hidden"))
    }
}

/// Rotation re-applied in CSS space: the compounded angle is negated,
/// rounded, and rotated around the top-left corner to match the
/// reconstructed geometry.
pub fn rotation_styles(node: &IrNode) -> Vec<String> {
    let rotation = -(node.rotation + node.cumulative_rotation).round();
    if rotation != 0.0 {
        vec![
            decl("transform", format!("rotate({}deg)", fmt_num(rotation))),
            decl("transform-origin", "top left"),
        ]
    } else {
        Vec::new()
    }
}

pub fn opacity_style(node: &IrNode) -> Option<String> {
    if node.opacity != 1.0 {
        Some(decl("opacity", fmt_num(node.opacity)))
    } else {
        None
    }
}

pub fn blend_mode_style(node: &IrNode) -> Option<String> {
    node.blend_mode
        .to_css()
        .map(|mode| decl("mix-blend-mode", mode))
}
