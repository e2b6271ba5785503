//! Border, outline and corner-radius synthesis.

use crate::style::background::color_from_fills;
use scenemark_common::{decl, decl_px, fmt_num};
use scenemark_normalizer::IrNode;
use scenemark_scene::geometry::{
    consolidate_radius, consolidate_stroke, BorderWidths, CornerRadius,
};
use scenemark_scene::{NodeType, StrokeAlign};

/// Corner radius declarations, plus `overflow: hidden` for clipping
/// containers. Ellipses are approximated with an oversized radius.
pub fn border_radius_styles(node: &IrNode) -> Vec<String> {
    let mut styles = Vec::new();

    if !node.children.is_empty() && node.clips_content {
        styles.push(decl("overflow", "hidden"));
    }

    if node.node_type == NodeType::Ellipse {
        styles.push(decl_px("border-radius", 9999.0));
        return styles;
    }

    let radius = match node.rectangle_corner_radii {
        Some([top_left, top_right, bottom_right, bottom_left]) => {
            consolidate_radius(top_left, top_right, bottom_right, bottom_left)
        }
        None => CornerRadius::All(node.corner_radius.unwrap_or(0.0)),
    };

    match radius {
        CornerRadius::All(all) => {
            if all != 0.0 {
                styles.push(decl_px("border-radius", all));
            }
        }
        CornerRadius::PerCorner {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } => {
            let corners = [
                ("border-top-left-radius", top_left),
                ("border-top-right-radius", top_right),
                ("border-bottom-right-radius", bottom_right),
                ("border-bottom-left-radius", bottom_left),
            ];
            for (property, value) in corners {
                if value > 0.0 {
                    styles.push(decl_px(property, value));
                }
            }
        }
    }

    styles
}

/// Stroke declarations. A uniform stroke on a center/outside alignment or a
/// layout container becomes an outline (with a matching negative offset) so
/// it does not perturb the layout box; non-uniform strokes are always four
/// independent per-side borders.
pub fn border_styles(node: &IrNode) -> Vec<String> {
    if node.strokes.is_empty() {
        return Vec::new();
    }
    let Some(widths) = consolidate_stroke(node.stroke_weight, node.stroke_weights.as_ref()) else {
        return Vec::new();
    };
    let Some(color) = color_from_fills(&node.strokes) else {
        return Vec::new();
    };

    let border_style = if node.stroke_dashes.is_empty() {
        "solid"
    } else {
        "dotted"
    };
    let border_value = |weight: f64| format!("{}px {color} {border_style}", fmt_num(weight));

    match widths {
        BorderWidths::All(weight) => {
            if weight == 0.0 {
                return Vec::new();
            }
            let as_outline = matches!(node.stroke_align, StrokeAlign::Center | StrokeAlign::Outside)
                || matches!(
                    node.node_type,
                    NodeType::Frame | NodeType::Instance | NodeType::Component
                );
            if as_outline {
                let mut styles = vec![decl("outline", border_value(weight))];
                match node.stroke_align {
                    StrokeAlign::Center => {
                        styles.push(decl_px("outline-offset", -weight / 2.0));
                    }
                    StrokeAlign::Inside => {
                        styles.push(decl_px("outline-offset", -weight));
                    }
                    StrokeAlign::Outside => {}
                }
                styles
            } else {
                vec![decl("border", border_value(weight))]
            }
        }
        BorderWidths::PerSide {
            left,
            top,
            right,
            bottom,
        } => {
            let mut styles = Vec::new();
            if left != 0.0 {
                styles.push(decl("border-left", border_value(left)));
            }
            if top != 0.0 {
                styles.push(decl("border-top", border_value(top)));
            }
            if right != 0.0 {
                styles.push(decl("border-right", border_value(right)));
            }
            if bottom != 0.0 {
                styles.push(decl("border-bottom", border_value(bottom)));
            }
            styles
        }
    }
}
