//! Blur synthesis: layer blur → `filter`, background blur →
//! `backdrop-filter`. The exported radius is halved to match how the host
//! renders gaussian blur.

use scenemark_common::{decl, fmt_num};
use scenemark_scene::Effect;

pub fn blur_styles(effects: &[Effect]) -> Vec<String> {
    let mut styles = Vec::new();

    if let Some(Effect::LayerBlur(blur)) = effects
        .iter()
        .find(|e| matches!(e, Effect::LayerBlur(_)) && e.visible())
    {
        styles.push(decl(
            "filter",
            format!("blur({}px)", fmt_num(blur.radius / 2.0)),
        ));
    }

    if let Some(Effect::BackgroundBlur(blur)) = effects
        .iter()
        .find(|e| matches!(e, Effect::BackgroundBlur(_)) && e.visible())
    {
        styles.push(decl(
            "backdrop-filter",
            format!("blur({}px)", fmt_num(blur.radius / 2.0)),
        ));
    }

    styles
}
