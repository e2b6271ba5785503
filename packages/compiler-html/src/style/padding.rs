//! Padding synthesis from the zero-filled layout insets.

use scenemark_common::decl_px;
use scenemark_normalizer::IrNode;
use scenemark_scene::geometry::{consolidate_insets, Insets};
use scenemark_scene::LayoutMode;

/// Padding declarations for an auto-layout node. Non-layout nodes have no
/// padding concept; zero components are omitted individually.
pub fn padding_styles(node: &IrNode) -> Vec<String> {
    if node.layout.mode == LayoutMode::None {
        return Vec::new();
    }

    let padding = consolidate_insets(
        node.layout.padding_left,
        node.layout.padding_right,
        node.layout.padding_top,
        node.layout.padding_bottom,
    );

    match padding {
        Insets::All(all) => {
            if all != 0.0 {
                vec![decl_px("padding", all)]
            } else {
                Vec::new()
            }
        }
        Insets::Symmetric {
            horizontal,
            vertical,
        } => {
            let mut styles = Vec::new();
            if horizontal != 0.0 {
                styles.push(decl_px("padding-left", horizontal));
                styles.push(decl_px("padding-right", horizontal));
            }
            if vertical != 0.0 {
                styles.push(decl_px("padding-top", vertical));
                styles.push(decl_px("padding-bottom", vertical));
            }
            styles
        }
        Insets::PerSide {
            left,
            right,
            top,
            bottom,
        } => {
            let mut styles = Vec::new();
            if top != 0.0 {
                styles.push(decl_px("padding-top", top));
            }
            if bottom != 0.0 {
                styles.push(decl_px("padding-bottom", bottom));
            }
            if left != 0.0 {
                styles.push(decl_px("padding-left", left));
            }
            if right != 0.0 {
                styles.push(decl_px("padding-right", right));
            }
            styles
        }
    }
}
