//! Formatting helpers shared by the style synthesizer and the markup
//! serializer: CSS-friendly numbers, `property: value` declarations and
//! attribute strings.

/// Format a number the way the generated CSS expects it: at most two decimal
/// places, trailing zeros trimmed, never `-0`.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut out = format!("{rounded:.2}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    out
}

/// Build a `property: value` declaration from a raw string value.
pub fn decl(property: &str, value: impl AsRef<str>) -> String {
    format!("{property}: {}", value.as_ref())
}

/// Build a `property: <n>px` declaration from a numeric value.
pub fn decl_px(property: &str, value: f64) -> String {
    format!("{property}: {}px", fmt_num(value))
}

/// Join declarations into the body of a `style` attribute.
pub fn join_styles(styles: &[String]) -> String {
    styles
        .iter()
        .map(|s| s.trim())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a `style="..."` attribute, or nothing when there are no
/// declarations.
pub fn style_attribute(styles: &[String]) -> String {
    let joined = join_styles(styles);
    if joined.is_empty() {
        String::new()
    } else {
        format!(" style=\"{joined}\"")
    }
}

/// Render a `class="..."` attribute, or nothing for an empty class list.
pub fn class_attribute(classes: &[&str]) -> String {
    let non_empty: Vec<&str> = classes.iter().copied().filter(|c| !c.is_empty()).collect();
    if non_empty.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", non_empty.join(" "))
    }
}

/// Render a `data-*` attribute. A `None` value yields a bare attribute,
/// e.g. `data-svg-wrapper`.
pub fn data_attribute(label: &str, value: Option<&str>) -> String {
    let mut chars = label.chars();
    let label = match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    let label = label.replace(' ', "-");
    match value {
        Some(value) => format!(" data-{label}=\"{value}\""),
        None => format!(" data-{label}"),
    }
}

/// Indent every non-empty line of a block by one level (two spaces).
pub fn indent_block(block: &str) -> String {
    block
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_trim_trailing_zeros() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(2.504), "2.5");
        assert_eq!(fmt_num(2.507), "2.51");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn px_declarations_use_formatted_numbers() {
        assert_eq!(decl_px("width", 100.0), "width: 100px");
        assert_eq!(decl_px("top", -12.25), "top: -12.25px");
    }

    #[test]
    fn style_attribute_skips_empty_lists() {
        assert_eq!(style_attribute(&[]), "");
        assert_eq!(
            style_attribute(&["width: 1px".to_string(), "height: 2px".to_string()]),
            " style=\"width: 1px; height: 2px\""
        );
    }

    #[test]
    fn data_attributes_lowercase_and_kebab() {
        assert_eq!(
            data_attribute("layer", Some("Icon Frame")),
            " data-layer=\"Icon Frame\""
        );
        assert_eq!(data_attribute("svg-wrapper", None), " data-svg-wrapper");
    }

    #[test]
    fn indenting_preserves_blank_lines() {
        assert_eq!(indent_block("\n<div>\n</div>"), "\n  <div>\n  </div>");
    }
}
