//! Paint → CSS color and background synthesis.

use scenemark_common::{decl, fmt_num};
use scenemark_scene::{GradientKind, GradientPaint, GradientStop, Paint, Rgb, SolidPaint};

/// RGB (plus alpha) to a CSS color string: `white`/`black` shorthand for the
/// pure opaque extremes, uppercase hex when opaque, `rgba()` otherwise.
pub fn html_color(color: Rgb, alpha: f64) -> String {
    if color.r == 1.0 && color.g == 1.0 && color.b == 1.0 && alpha == 1.0 {
        return "white".to_string();
    }
    if color.r == 0.0 && color.g == 0.0 && color.b == 0.0 && alpha == 1.0 {
        return "black".to_string();
    }

    if alpha == 1.0 {
        let r = (color.r * 255.0).round() as u8;
        let g = (color.g * 255.0).round() as u8;
        let b = (color.b * 255.0).round() as u8;
        return format!("#{r:02X}{g:02X}{b:02X}");
    }

    format!(
        "rgba({}, {}, {}, {})",
        fmt_num(color.r * 255.0),
        fmt_num(color.g * 255.0),
        fmt_num(color.b * 255.0),
        fmt_num(alpha)
    )
}

/// Color with an optional resolved variable name: `var(--name, fallback)`.
fn color_with_variable(color: Rgb, alpha: f64, variable: Option<&str>) -> String {
    let fallback = html_color(color, alpha);
    match variable {
        Some(name) => format!("var(--{name}, {fallback})"),
        None => fallback,
    }
}

pub fn solid_paint_color(solid: &SolidPaint) -> String {
    color_with_variable(
        solid.color,
        solid.opacity.unwrap_or(1.0),
        solid.variable_color_name.as_deref(),
    )
}

/// The topmost visible paint. Paint order in the source model is
/// bottom-to-top, so the top paint sits at the end of the list.
pub fn retrieve_top_fill(fills: &[Paint]) -> Option<&Paint> {
    fills.iter().rev().find(|fill| fill.visible())
}

/// CSS color of the topmost visible fill: a solid paint's own color, or a
/// gradient's first stop.
pub fn color_from_fills(fills: &[Paint]) -> Option<String> {
    let top = retrieve_top_fill(fills)?;
    if let Some(solid) = top.as_solid() {
        return Some(solid_paint_color(solid));
    }
    if let Some((_, gradient)) = top.as_gradient() {
        let first = gradient.gradient_stops.first()?;
        return Some(color_with_variable(
            Rgb {
                r: first.color.r,
                g: first.color.g,
                b: first.color.b,
            },
            gradient.opacity.unwrap_or(1.0),
            first.variable_color_name.as_deref(),
        ));
    }
    // Image fills contribute a fully transparent color here; the emitter
    // routes the actual pixels separately.
    Some(html_color(
        Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        },
        0.0,
    ))
}

fn gradient_stop_css(stop: &GradientStop, fill_opacity: f64, multiplier: f64, unit: &str) -> String {
    let color = color_with_variable(
        Rgb {
            r: stop.color.r,
            g: stop.color.g,
            b: stop.color.b,
        },
        stop.color.a * fill_opacity,
        stop.variable_color_name.as_deref(),
    );
    format!("{color} {}{unit}", (stop.position * multiplier).round())
}

fn gradient_stops_css(gradient: &GradientPaint, multiplier: f64, unit: &str) -> String {
    let opacity = gradient.opacity.unwrap_or(1.0);
    gradient
        .gradient_stops
        .iter()
        .map(|stop| gradient_stop_css(stop, opacity, multiplier, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

fn linear_gradient_css(gradient: &GradientPaint) -> String {
    let (start, end) = match gradient.gradient_handle_positions.as_slice() {
        [start, end, ..] => (start, end),
        _ => return format!("linear-gradient(0deg, {})", gradient_stops_css(gradient, 100.0, "%")),
    };
    let angle = (end.y - start.y).atan2(end.x - start.x).to_degrees();
    let angle = (angle + 360.0) % 360.0;
    let css_angle = (angle + 90.0) % 360.0;
    format!(
        "linear-gradient({}deg, {})",
        css_angle.round(),
        gradient_stops_css(gradient, 100.0, "%")
    )
}

fn radial_gradient_css(gradient: &GradientPaint) -> String {
    let (center, h1, h2) = match gradient.gradient_handle_positions.as_slice() {
        [center, h1, h2, ..] => (center, h1, h2),
        _ => {
            return format!(
                "radial-gradient(circle, {})",
                gradient_stops_css(gradient, 100.0, "%")
            )
        }
    };
    let rx = ((h1.x - center.x).powi(2) + (h1.y - center.y).powi(2)).sqrt() * 100.0;
    let ry = ((h2.x - center.x).powi(2) + (h2.y - center.y).powi(2)).sqrt() * 100.0;
    format!(
        "radial-gradient(ellipse {:.2}% {:.2}% at {:.2}% {:.2}%, {})",
        rx,
        ry,
        center.x * 100.0,
        center.y * 100.0,
        gradient_stops_css(gradient, 100.0, "%")
    )
}

fn angular_gradient_css(gradient: &GradientPaint) -> String {
    let (center, direction) = match gradient.gradient_handle_positions.as_slice() {
        [center, _, direction, ..] => (center, direction),
        _ => {
            return format!(
                "conic-gradient(from 0deg, {})",
                gradient_stops_css(gradient, 360.0, "deg")
            )
        }
    };
    let angle = (direction.y - center.y)
        .atan2(direction.x - center.x)
        .to_degrees();
    let angle = (angle + 360.0) % 360.0;
    format!(
        "conic-gradient(from {}deg at {:.2}% {:.2}%, {})",
        angle.round(),
        center.x * 100.0,
        center.y * 100.0,
        gradient_stops_css(gradient, 360.0, "deg")
    )
}

/// Approximate a diamond gradient with four quarter-size linear gradients.
fn diamond_gradient_css(gradient: &GradientPaint) -> String {
    let stops = gradient_stops_css(gradient, 50.0, "%");
    [
        ("to bottom right", "bottom right"),
        ("to bottom left", "bottom left"),
        ("to top left", "top left"),
        ("to top right", "top right"),
    ]
    .iter()
    .map(|(direction, position)| {
        format!("linear-gradient({direction}, {stops}) {position} / 50% 50% no-repeat")
    })
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn gradient_css(kind: GradientKind, gradient: &GradientPaint) -> String {
    match kind {
        GradientKind::Linear => linear_gradient_css(gradient),
        GradientKind::Radial => radial_gradient_css(gradient),
        GradientKind::Angular => angular_gradient_css(gradient),
        GradientKind::Diamond => diamond_gradient_css(gradient),
    }
}

/// Combine a fill stack into one `background` value. Stacking order is
/// last-to-first in the source model, so the list is reversed; a solid layer
/// at the bottom of the stack is synthesized as a flat two-stop gradient so
/// the whole stack fits a single property.
pub fn build_background_values(fills: &[Paint]) -> Option<String> {
    let visible: Vec<&Paint> = fills.iter().filter(|f| f.visible()).collect();
    if visible.is_empty() {
        return None;
    }

    if visible.len() == 1 {
        let paint = visible[0];
        if let Some(solid) = paint.as_solid() {
            return Some(solid_paint_color(solid));
        }
        if let Some((kind, gradient)) = paint.as_gradient() {
            return Some(gradient_css(kind, gradient));
        }
        return None;
    }

    let layers: Vec<String> = visible
        .iter()
        .rev()
        .enumerate()
        .filter_map(|(index, paint)| {
            if let Some(solid) = paint.as_solid() {
                let color = solid_paint_color(solid);
                if index == 0 {
                    Some(format!("linear-gradient(0deg, {color} 0%, {color} 100%)"))
                } else {
                    Some(color)
                }
            } else {
                paint
                    .as_gradient()
                    .map(|(kind, gradient)| gradient_css(kind, gradient))
            }
        })
        .collect();

    if layers.is_empty() {
        None
    } else {
        Some(layers.join(", "))
    }
}

/// `background-blend-mode` for a fill stack, present only when some paint
/// actually blends.
pub fn background_blend_modes(fills: &[Paint]) -> Option<String> {
    let visible: Vec<&Paint> = fills.iter().filter(|f| f.visible()).collect();
    if visible.is_empty() || visible.iter().all(|f| f.blend_mode().is_default()) {
        return None;
    }
    let modes: Vec<&str> = visible
        .iter()
        .rev()
        .map(|paint| paint.blend_mode().to_css().unwrap_or("normal"))
        .collect();
    Some(modes.join(", "))
}

/// The `background` and `background-blend-mode` declarations for a node.
pub fn background_styles(fills: &[Paint]) -> Vec<String> {
    let mut styles = Vec::new();
    if let Some(background) = build_background_values(fills) {
        styles.push(decl("background", background));
        if let Some(modes) = background_blend_modes(fills) {
            styles.push(decl("background-blend-mode", modes));
        }
    }
    styles
}
