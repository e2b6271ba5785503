//! Shadow synthesis.
//!
//! Only the first visible drop-shadow, inner-shadow or layer-blur effect in
//! the list is honored; any further effects are dropped.

use crate::style::background::html_color;
use scenemark_common::fmt_num;
use scenemark_scene::{Effect, Rgb};

/// The `box-shadow` value for a node's effect list, if any.
pub fn box_shadow_value(effects: &[Effect]) -> Option<String> {
    let effect = effects.iter().find(|effect| {
        effect.visible()
            && matches!(
                effect,
                Effect::DropShadow(_) | Effect::InnerShadow(_) | Effect::LayerBlur(_)
            )
    })?;

    match effect {
        Effect::DropShadow(shadow) | Effect::InnerShadow(shadow) => {
            let spread = shadow
                .spread
                .filter(|s| *s != 0.0)
                .map(|s| format!("{}px ", fmt_num(s)))
                .unwrap_or_default();
            let color = html_color(
                Rgb {
                    r: shadow.color.r,
                    g: shadow.color.g,
                    b: shadow.color.b,
                },
                shadow.color.a,
            );
            let inset = if matches!(effect, Effect::InnerShadow(_)) {
                " inset"
            } else {
                ""
            };
            Some(format!(
                "{}px {}px {}px {spread}{color}{inset}",
                fmt_num(shadow.offset.x),
                fmt_num(shadow.offset.y),
                fmt_num(shadow.radius)
            ))
        }
        // A layer blur that reaches the front of the list degenerates to a
        // colorless blur in shadow space.
        Effect::LayerBlur(blur) => Some(format!(
            "{0}px {0}px {0}px",
            fmt_num(blur.radius)
        )),
        Effect::BackgroundBlur(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenemark_scene::{Rgba, ShadowEffect, Vector2};

    fn drop_shadow(x: f64, y: f64, radius: f64, alpha: f64) -> Effect {
        Effect::DropShadow(ShadowEffect {
            color: Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: alpha,
            },
            offset: Vector2 { x, y },
            radius,
            spread: None,
            visible: true,
            bound_variables: None,
            variable_color_name: None,
        })
    }

    #[test]
    fn only_the_first_visible_shadow_is_honored() {
        let effects = vec![drop_shadow(0.0, 4.0, 8.0, 0.25), drop_shadow(0.0, 8.0, 16.0, 0.5)];
        assert_eq!(
            box_shadow_value(&effects),
            Some("0px 4px 8px rgba(0, 0, 0, 0.25)".to_string())
        );
    }

    #[test]
    fn inner_shadows_get_the_inset_keyword() {
        let effects = vec![Effect::InnerShadow(ShadowEffect {
            color: Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            offset: Vector2 { x: 1.0, y: 2.0 },
            radius: 3.0,
            spread: Some(4.0),
            visible: true,
            bound_variables: None,
            variable_color_name: None,
        })];
        assert_eq!(
            box_shadow_value(&effects),
            Some("1px 2px 3px 4px black inset".to_string())
        );
    }

    #[test]
    fn invisible_effects_are_skipped() {
        let mut hidden = drop_shadow(0.0, 4.0, 8.0, 0.25);
        if let Effect::DropShadow(ref mut shadow) = hidden {
            shadow.visible = false;
        }
        assert_eq!(box_shadow_value(&[hidden]), None);
    }
}
