//! Typography synthesis: per-run styles and node-level text alignment.

use crate::style::background::{color_from_fills, html_color};
use scenemark_common::{decl, decl_px, fmt_num};
use scenemark_normalizer::{StyledTextSegment, TextFields};
use scenemark_scene::{
    Effect, LeadingTrim, Rgb, TextAlignHorizontal, TextAlignVertical, TextCase, TextDecoration,
};

const FONT_FALLBACK: &str = "-apple-system, BlinkMacSystemFont, sans-serif";

fn font_family_value(family: &str) -> String {
    if family.is_empty() {
        FONT_FALLBACK.to_string()
    } else {
        format!("'{family}', {FONT_FALLBACK}")
    }
}

fn decoration_value(decoration: TextDecoration) -> Option<&'static str> {
    match decoration {
        TextDecoration::Strikethrough => Some("line-through"),
        TextDecoration::Underline => Some("underline"),
        TextDecoration::None => None,
    }
}

fn transform_value(case: TextCase) -> Option<&'static str> {
    match case {
        TextCase::Upper => Some("uppercase"),
        TextCase::Lower => Some("lowercase"),
        TextCase::Title => Some("capitalize"),
        TextCase::Original | TextCase::SmallCaps | TextCase::SmallCapsForced => None,
    }
}

/// The declarations for one styled run.
pub fn segment_styles(segment: &StyledTextSegment) -> Vec<String> {
    let mut styles = Vec::new();

    if let Some(color) = color_from_fills(&segment.fills) {
        styles.push(decl("color", color));
    }
    if segment.font_size > 0.0 {
        styles.push(decl_px("font-size", segment.font_size));
    }
    styles.push(decl("font-family", font_family_value(&segment.font_family)));
    if segment.font_style.to_lowercase().contains("italic") {
        styles.push(decl("font-style", "italic"));
    }
    styles.push(decl("font-weight", fmt_num(segment.font_weight)));
    if let Some(decoration) = decoration_value(segment.text_decoration) {
        styles.push(decl("text-decoration", decoration));
    }
    if let Some(transform) = transform_value(segment.text_case) {
        styles.push(decl("text-transform", transform));
    }
    if let Some(line_height) = segment.line_height {
        let px = line_height.to_px(segment.font_size);
        if px > 0.0 {
            styles.push(decl_px("line-height", px));
        }
    }
    if let Some(letter_spacing) = segment.letter_spacing {
        let px = letter_spacing.to_px(segment.font_size);
        if px > 0.0 {
            styles.push(decl_px("letter-spacing", px));
        }
    }
    styles.push(decl("word-wrap", "break-word"));

    styles
}

/// Cap-height leading trim maps to the text-box properties.
pub fn text_trim_styles(text: &TextFields) -> Vec<String> {
    if text.leading_trim == LeadingTrim::CapHeight {
        vec![
            decl("text-box-trim", "trim-both"),
            decl("text-box-edge", "cap alphabetic"),
        ]
    } else {
        Vec::new()
    }
}

pub fn text_align_styles(text: &TextFields) -> Vec<String> {
    let mut styles = Vec::new();

    match text.align_horizontal {
        TextAlignHorizontal::Left => {}
        TextAlignHorizontal::Center => styles.push(decl("text-align", "center")),
        TextAlignHorizontal::Right => styles.push(decl("text-align", "right")),
        TextAlignHorizontal::Justified => styles.push(decl("text-align", "justify")),
    }

    let vertical = match text.align_vertical {
        TextAlignVertical::Top => None,
        TextAlignVertical::Center => Some("center"),
        TextAlignVertical::Bottom => Some("flex-end"),
    };
    if let Some(alignment) = vertical {
        styles.push(decl("justify-content", alignment));
        styles.push(decl("display", "flex"));
        styles.push(decl("flex-direction", "column"));
    }

    styles
}

/// Text nodes use the unhalved blur radius, unlike containers.
pub fn text_blur_style(effects: &[Effect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        Effect::LayerBlur(blur) if blur.visible && blur.radius > 0.0 => Some(decl(
            "filter",
            format!("blur({}px)", fmt_num(blur.radius)),
        )),
        _ => None,
    })
}

/// Drop shadows on text render as `text-shadow` with whole-pixel offsets.
pub fn text_shadow_style(effects: &[Effect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        Effect::DropShadow(shadow) if shadow.visible => {
            let color = html_color(
                Rgb {
                    r: shadow.color.r,
                    g: shadow.color.g,
                    b: shadow.color.b,
                },
                shadow.color.a,
            );
            Some(decl(
                "text-shadow",
                format!(
                    "{}px {}px {}px {color}",
                    shadow.offset.x.round(),
                    shadow.offset.y.round(),
                    shadow.radius.round()
                ),
            ))
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenemark_scene::{MetricUnit, Paint, Rgb, SolidPaint, TextMetric};

    fn segment() -> StyledTextSegment {
        StyledTextSegment {
            unique_id: "label_span".into(),
            characters: "Hello".into(),
            font_family: "Inter".into(),
            font_style: "Italic".into(),
            font_size: 16.0,
            font_weight: 600.0,
            text_decoration: TextDecoration::Underline,
            text_case: TextCase::Upper,
            letter_spacing: Some(TextMetric {
                unit: MetricUnit::Percent,
                value: 10.0,
            }),
            line_height: Some(TextMetric {
                unit: MetricUnit::Pixels,
                value: 24.0,
            }),
            fills: vec![Paint::Solid(SolidPaint {
                color: Rgb {
                    r: 1.0,
                    g: 0.0,
                    b: 0.0,
                },
                opacity: None,
                visible: true,
                blend_mode: Default::default(),
                bound_variables: None,
                variable_color_name: None,
            })],
            open_type: Default::default(),
        }
    }

    #[test]
    fn segment_styles_cover_the_full_run_style() {
        let styles = segment_styles(&segment());
        assert!(styles.contains(&"color: #FF0000".to_string()));
        assert!(styles.contains(&"font-size: 16px".to_string()));
        assert!(styles
            .contains(&"font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif".to_string()));
        assert!(styles.contains(&"font-style: italic".to_string()));
        assert!(styles.contains(&"font-weight: 600".to_string()));
        assert!(styles.contains(&"text-decoration: underline".to_string()));
        assert!(styles.contains(&"text-transform: uppercase".to_string()));
        assert!(styles.contains(&"line-height: 24px".to_string()));
        assert!(styles.contains(&"letter-spacing: 1.6px".to_string()));
        assert!(styles.contains(&"word-wrap: break-word".to_string()));
    }

    #[test]
    fn vertical_alignment_switches_to_flex() {
        let text = TextFields {
            align_vertical: TextAlignVertical::Bottom,
            ..TextFields::default()
        };
        let styles = text_align_styles(&text);
        assert_eq!(
            styles,
            vec![
                "justify-content: flex-end".to_string(),
                "display: flex".to_string(),
                "flex-direction: column".to_string(),
            ]
        );
    }
}
