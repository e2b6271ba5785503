use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// 2D point, used for gradient handles and effect offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A property bound to a named style variable in the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableBinding {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The set of variable bindings a paint or effect may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<VariableBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    PassThrough,
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::Normal
    }
}

impl BlendMode {
    /// CSS name for non-default blend modes. `Normal` and `PassThrough`
    /// contribute nothing.
    pub fn to_css(self) -> Option<&'static str> {
        match self {
            BlendMode::PassThrough | BlendMode::Normal => None,
            BlendMode::Multiply => Some("multiply"),
            BlendMode::Screen => Some("screen"),
            BlendMode::Overlay => Some("overlay"),
            BlendMode::Darken => Some("darken"),
            BlendMode::Lighten => Some("lighten"),
            BlendMode::ColorDodge => Some("color-dodge"),
            BlendMode::ColorBurn => Some("color-burn"),
            BlendMode::HardLight => Some("hard-light"),
            BlendMode::SoftLight => Some("soft-light"),
            BlendMode::Difference => Some("difference"),
            BlendMode::Exclusion => Some("exclusion"),
            BlendMode::Hue => Some("hue"),
            BlendMode::Saturation => Some("saturation"),
            BlendMode::Color => Some("color"),
            BlendMode::Luminosity => Some("luminosity"),
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, BlendMode::Normal | BlendMode::PassThrough)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: Rgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    /// Resolved by the normalizer when variable-aware output is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_color_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub position: f64,
    pub color: Rgba,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_color_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    /// Handle positions in normalized coordinates. Linear gradients use the
    /// first two; radial and angular use all three.
    #[serde(default)]
    pub gradient_handle_positions: Vec<Vector2>,
    /// Stops ordered by position in `[0, 1]`.
    #[serde(default)]
    pub gradient_stops: Vec<GradientStop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

/// Which gradient shape a gradient paint renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

/// A fill or stroke layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
}

impl Paint {
    pub fn visible(&self) -> bool {
        match self {
            Paint::Solid(p) => p.visible,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.visible,
            Paint::Image(p) => p.visible,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Paint::Solid(p) => p.opacity.unwrap_or(1.0),
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.opacity.unwrap_or(1.0),
            Paint::Image(_) => 1.0,
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        match self {
            Paint::Solid(p) => p.blend_mode,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.blend_mode,
            Paint::Image(p) => p.blend_mode,
        }
    }

    pub fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Paint::Solid(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gradient(&self) -> Option<(GradientKind, &GradientPaint)> {
        match self {
            Paint::GradientLinear(p) => Some((GradientKind::Linear, p)),
            Paint::GradientRadial(p) => Some((GradientKind::Radial, p)),
            Paint::GradientAngular(p) => Some((GradientKind::Angular, p)),
            Paint::GradientDiamond(p) => Some((GradientKind::Diamond, p)),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Paint::Image(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    pub color: Rgba,
    #[serde(default)]
    pub offset: Vector2,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_color_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurEffect {
    pub radius: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// A node-level visual effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    LayerBlur(BlurEffect),
    BackgroundBlur(BlurEffect),
}

impl Effect {
    pub fn visible(&self) -> bool {
        match self {
            Effect::DropShadow(e) | Effect::InnerShadow(e) => e.visible,
            Effect::LayerBlur(e) | Effect::BackgroundBlur(e) => e.visible,
        }
    }

    pub fn as_shadow(&self) -> Option<&ShadowEffect> {
        match self {
            Effect::DropShadow(e) | Effect::InnerShadow(e) => Some(e),
            _ => None,
        }
    }
}
