//! Width/height synthesis from the normalized sizing axes.

use scenemark_common::{decl, decl_px};
use scenemark_normalizer::IrNode;
use scenemark_scene::{LayoutMode, LayoutSizing};

pub struct SizeStyles {
    pub width: Option<String>,
    pub height: Option<String>,
    pub constraints: Vec<String>,
}

fn axis_style(
    sizing: LayoutSizing,
    extent: f64,
    property: &str,
    fills_parent_axis: bool,
    has_max_constraint: bool,
) -> Option<String> {
    match sizing {
        LayoutSizing::Fixed => Some(decl_px(property, extent)),
        // Hug sizing is implicit: the element sizes to its content.
        LayoutSizing::Hug => None,
        LayoutSizing::Fill => {
            if fills_parent_axis {
                Some(decl("flex", "1 1 0"))
            } else if has_max_constraint {
                Some(decl(property, "100%"))
            } else {
                Some(decl("align-self", "stretch"))
            }
        }
    }
}

/// Size declarations for a node. A "fill" axis becomes flex-grow when the
/// parent lays out along that axis, else a stretch/100% declaration
/// depending on whether a max constraint bounds it.
pub fn size_styles(node: &IrNode) -> SizeStyles {
    let width = axis_style(
        node.layout.sizing_horizontal,
        node.width,
        "width",
        node.parent_layout_mode == Some(LayoutMode::Horizontal),
        node.max_width.is_some(),
    );
    let height = axis_style(
        node.layout.sizing_vertical,
        node.height,
        "height",
        node.parent_layout_mode == Some(LayoutMode::Vertical),
        node.max_height.is_some(),
    );

    let mut constraints = Vec::new();
    if let Some(max_width) = node.max_width {
        constraints.push(decl_px("max-width", max_width));
    }
    if let Some(min_width) = node.min_width {
        constraints.push(decl_px("min-width", min_width));
    }
    if let Some(max_height) = node.max_height {
        constraints.push(decl_px("max-height", max_height));
    }
    if let Some(min_height) = node.min_height {
        constraints.push(decl_px("min-height", min_height));
    }

    SizeStyles {
        width,
        height,
        constraints,
    }
}
