//! Pure geometry math: bounding-box ↔ rotated-rectangle reconstruction, the
//! "collapse if uniform" reducers for padding/radius/stroke, and the
//! auto-layout → flexbox mapping tables. No state, no host access.

use crate::node::{AxisAlign, LayoutMode, LayoutWrap, Rect, StrokeWeights};

/// The reconstruction denominator `cos²θ − sin²θ` is zero at ±45°/135°.
/// Rather than divide by zero, the denominator (and `|cosθ|`) is clamped to
/// this signed minimum; exact singular inputs produce large but finite
/// extents.
const MIN_DENOMINATOR: f64 = 1e-6;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn clamp_magnitude(value: f64) -> f64 {
    if value.abs() < MIN_DENOMINATOR {
        if value.is_sign_negative() {
            -MIN_DENOMINATOR
        } else {
            MIN_DENOMINATOR
        }
    } else {
        value
    }
}

/// The recovered pre-rotation rectangle, positioned so that rotating it
/// around its own top-left corner reproduces the original bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleStyle {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    /// CSS-convention rotation in degrees (the negated input rotation).
    pub rotation: f64,
}

/// Recover an object's pre-rotation width/height and CSS offset from its
/// axis-aligned bounding box and the rotation already baked into that box.
///
/// The bounding box extents relate to the true extents through
/// `w_b = w·|cosθ| + h·|sinθ|` and `h_b = w·|sinθ| + h·|cosθ|`; solving that
/// 2×2 system and re-rotating the corners yields the offset of the top-left
/// corner inside the bounding box.
pub fn reconstruct_rectangle(bounds: &Rect, rotation_degrees: f64) -> RectangleStyle {
    let css_rotation = -rotation_degrees;
    let theta = css_rotation.to_radians();
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let abs_cos = cos_theta.abs();
    let abs_sin = sin_theta.abs();

    let denominator = clamp_magnitude(abs_cos * abs_cos - abs_sin * abs_sin);
    let height = (bounds.width * abs_sin - bounds.height * abs_cos) / -denominator;
    let width = (bounds.width - height * abs_sin) / clamp_magnitude(abs_cos);

    let corners = [
        (0.0, 0.0),
        (width, 0.0),
        (width, height),
        (0.0, height),
    ];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for (x, y) in corners {
        let rotated_x = x * cos_theta + y * sin_theta;
        let rotated_y = -x * sin_theta + y * cos_theta;
        min_x = min_x.min(rotated_x);
        min_y = min_y.min(rotated_y);
    }

    RectangleStyle {
        width: round2(width),
        height: round2(height),
        left: round2(bounds.x - min_x),
        top: round2(bounds.y - min_y),
        rotation: css_rotation,
    }
}

/// Four sampled inset values collapsed to their most compact form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Insets {
    All(f64),
    Symmetric { horizontal: f64, vertical: f64 },
    PerSide { left: f64, right: f64, top: f64, bottom: f64 },
}

/// Collapse four inset values: all equal → one scalar, opposite pairs equal
/// → horizontal/vertical, anything else → per side. Values are rounded to
/// two decimals before comparison.
pub fn consolidate_insets(left: f64, right: f64, top: f64, bottom: f64) -> Insets {
    let left = round2(left);
    let right = round2(right);
    let top = round2(top);
    let bottom = round2(bottom);

    if left == right && left == top && left == bottom {
        Insets::All(left)
    } else if left == right && top == bottom {
        Insets::Symmetric {
            horizontal: left,
            vertical: top,
        }
    } else {
        Insets::PerSide {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Corner radii collapsed to their most compact form. No symmetric pair
/// form exists for radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerRadius {
    All(f64),
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

pub fn consolidate_radius(
    top_left: f64,
    top_right: f64,
    bottom_right: f64,
    bottom_left: f64,
) -> CornerRadius {
    if top_left == top_right && top_left == bottom_right && top_left == bottom_left {
        CornerRadius::All(top_left)
    } else {
        CornerRadius::PerCorner {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

/// Border widths collapsed to their most compact form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderWidths {
    All(f64),
    PerSide { left: f64, top: f64, right: f64, bottom: f64 },
}

/// Collapse stroke weights. Per-side weights win over the uniform weight
/// when both are present; a missing or zero uniform weight with no per-side
/// data means no stroke at all.
pub fn consolidate_stroke(
    uniform: Option<f64>,
    per_side: Option<&StrokeWeights>,
) -> Option<BorderWidths> {
    if let Some(weights) = per_side {
        if weights.top == weights.bottom
            && weights.top == weights.left
            && weights.top == weights.right
        {
            return Some(BorderWidths::All(weights.top));
        }
        return Some(BorderWidths::PerSide {
            left: weights.left,
            top: weights.top,
            right: weights.right,
            bottom: weights.bottom,
        });
    }
    match uniform {
        Some(weight) if weight != 0.0 => Some(BorderWidths::All(weight)),
        _ => None,
    }
}

/// The flexbox rendition of a node's auto-layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexStyle {
    /// `None` means the default `row` direction and is omitted.
    pub direction: Option<&'static str>,
    pub justify_content: &'static str,
    pub align_items: &'static str,
    pub gap: Option<f64>,
    pub display: &'static str,
    pub wrap: Option<&'static str>,
    pub align_content: Option<&'static str>,
}

fn primary_alignment(align: AxisAlign) -> &'static str {
    match align {
        // Baseline only applies to the cross axis; clamp to the default.
        AxisAlign::Min | AxisAlign::Baseline => "flex-start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "flex-end",
        AxisAlign::SpaceBetween => "space-between",
    }
}

fn counter_alignment(align: AxisAlign) -> &'static str {
    match align {
        AxisAlign::Min | AxisAlign::SpaceBetween => "flex-start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "flex-end",
        AxisAlign::Baseline => "baseline",
    }
}

/// Map auto-layout fields onto flexbox. `gap` is suppressed under
/// space-between (the two would be redundant), and `display` is `flex` only
/// when the parent shares the node's layout axis.
pub fn auto_layout_to_flex(
    mode: LayoutMode,
    primary_axis: AxisAlign,
    counter_axis: AxisAlign,
    item_spacing: f64,
    wrap: LayoutWrap,
    parent_mode: Option<LayoutMode>,
) -> FlexStyle {
    let direction = if mode == LayoutMode::Horizontal {
        None
    } else {
        Some("column")
    };

    let gap = if item_spacing > 0.0 && primary_axis != AxisAlign::SpaceBetween {
        Some(item_spacing)
    } else {
        None
    };

    let display = if parent_mode == Some(mode) {
        "flex"
    } else {
        "inline-flex"
    };

    let (wrap_value, align_content) = if wrap == LayoutWrap::Wrap {
        (Some("wrap"), Some(counter_alignment(counter_axis)))
    } else {
        (None, None)
    };

    FlexStyle {
        direction,
        justify_content: primary_alignment(primary_axis),
        align_items: counter_alignment(counter_axis),
        gap,
        display,
        wrap: wrap_value,
        align_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rotate a `w × h` rectangle around its top-left corner and return the
    /// resulting axis-aligned bounding box at the given origin.
    fn bounding_box_of(width: f64, height: f64, rotation_degrees: f64) -> Rect {
        let theta = (-rotation_degrees).to_radians();
        let (sin, cos) = (theta.sin(), theta.cos());
        let corners = [
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
        ];
        let xs: Vec<f64> = corners.iter().map(|(x, y)| x * cos + y * sin).collect();
        let ys: Vec<f64> = corners.iter().map(|(x, y)| -x * sin + y * cos).collect();
        let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Rect {
            x: 0.0,
            y: 0.0,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    #[test]
    fn rotation_round_trips_through_reconstruction() {
        // Exclude a band around the ±45°/135° singularities.
        let angles = [-80.0, -30.0, -10.0, 0.0, 10.0, 30.0, 60.0, 80.0];
        for &angle in &angles {
            let bounds = bounding_box_of(120.0, 48.0, angle);
            let rect = reconstruct_rectangle(&bounds, angle);
            assert!(
                (rect.width - 120.0).abs() < 0.05,
                "width at {angle}°: {}",
                rect.width
            );
            assert!(
                (rect.height - 48.0).abs() < 0.05,
                "height at {angle}°: {}",
                rect.height
            );
        }
    }

    #[test]
    fn zero_rotation_is_identity() {
        let bounds = Rect {
            x: 12.0,
            y: 30.0,
            width: 100.0,
            height: 50.0,
        };
        let rect = reconstruct_rectangle(&bounds, 0.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.left, 12.0);
        assert_eq!(rect.top, 30.0);
        assert_eq!(rect.rotation, 0.0);
    }

    #[test]
    fn singular_angle_stays_finite() {
        let bounds = bounding_box_of(64.0, 64.0, 45.0);
        let rect = reconstruct_rectangle(&bounds, 45.0);
        assert!(rect.width.is_finite());
        assert!(rect.height.is_finite());
    }

    #[test]
    fn equal_insets_collapse_to_all() {
        assert_eq!(consolidate_insets(8.0, 8.0, 8.0, 8.0), Insets::All(8.0));
    }

    #[test]
    fn paired_insets_collapse_to_symmetric() {
        assert_eq!(
            consolidate_insets(8.0, 8.0, 4.0, 4.0),
            Insets::Symmetric {
                horizontal: 8.0,
                vertical: 4.0
            }
        );
    }

    #[test]
    fn distinct_insets_stay_per_side() {
        assert_eq!(
            consolidate_insets(1.0, 2.0, 3.0, 4.0),
            Insets::PerSide {
                left: 1.0,
                right: 2.0,
                top: 3.0,
                bottom: 4.0
            }
        );
    }

    #[test]
    fn equal_radii_collapse_to_all() {
        assert_eq!(consolidate_radius(6.0, 6.0, 6.0, 6.0), CornerRadius::All(6.0));
        assert_eq!(
            consolidate_radius(6.0, 0.0, 6.0, 0.0),
            CornerRadius::PerCorner {
                top_left: 6.0,
                top_right: 0.0,
                bottom_right: 6.0,
                bottom_left: 0.0
            }
        );
    }

    #[test]
    fn stroke_weights_collapse_like_the_other_reducers() {
        let uniform = StrokeWeights {
            top: 2.0,
            right: 2.0,
            bottom: 2.0,
            left: 2.0,
        };
        assert_eq!(
            consolidate_stroke(None, Some(&uniform)),
            Some(BorderWidths::All(2.0))
        );

        let mixed = StrokeWeights {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        assert_eq!(
            consolidate_stroke(None, Some(&mixed)),
            Some(BorderWidths::PerSide {
                left: 4.0,
                top: 1.0,
                right: 2.0,
                bottom: 3.0
            })
        );

        assert_eq!(consolidate_stroke(Some(0.0), None), None);
        assert_eq!(consolidate_stroke(None, None), None);
        assert_eq!(
            consolidate_stroke(Some(1.5), None),
            Some(BorderWidths::All(1.5))
        );
    }

    #[test]
    fn gap_is_suppressed_under_space_between() {
        let flex = auto_layout_to_flex(
            LayoutMode::Horizontal,
            AxisAlign::SpaceBetween,
            AxisAlign::Center,
            16.0,
            LayoutWrap::NoWrap,
            None,
        );
        assert_eq!(flex.gap, None);
        assert_eq!(flex.justify_content, "space-between");
        assert_eq!(flex.display, "inline-flex");
    }

    #[test]
    fn display_is_flex_only_when_parent_axis_matches() {
        let flex = auto_layout_to_flex(
            LayoutMode::Vertical,
            AxisAlign::Min,
            AxisAlign::Min,
            8.0,
            LayoutWrap::NoWrap,
            Some(LayoutMode::Vertical),
        );
        assert_eq!(flex.display, "flex");
        assert_eq!(flex.direction, Some("column"));
        assert_eq!(flex.gap, Some(8.0));
    }

    #[test]
    fn align_content_only_appears_when_wrapping() {
        let no_wrap = auto_layout_to_flex(
            LayoutMode::Horizontal,
            AxisAlign::Min,
            AxisAlign::Baseline,
            0.0,
            LayoutWrap::NoWrap,
            None,
        );
        assert_eq!(no_wrap.align_content, None);
        assert_eq!(no_wrap.align_items, "baseline");

        let wrap = auto_layout_to_flex(
            LayoutMode::Horizontal,
            AxisAlign::Min,
            AxisAlign::Center,
            0.0,
            LayoutWrap::Wrap,
            None,
        );
        assert_eq!(wrap.wrap, Some("wrap"));
        assert_eq!(wrap.align_content, Some("center"));
    }
}
