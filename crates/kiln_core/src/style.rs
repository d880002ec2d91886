//! Declarative style records
//!
//! These are the caller-facing descriptions that builders translate into
//! engine-native paints and shaders. Every record is serializable, so its
//! JSON encoding doubles as fingerprint input.
//!
//! Enum-valued options carry a name table ([`NamedEnum`]). When style
//! records are read from declarative input, an unknown name does not fail
//! the whole record: the field degrades to `None`, meaning "use the engine
//! default", and a warning is logged.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Color, Point};

// ─────────────────────────────────────────────────────────────────────────────
// Named enums
// ─────────────────────────────────────────────────────────────────────────────

/// An enum whose variants are addressed by name in declarative input
pub trait NamedEnum: Sized + Copy + PartialEq + 'static {
    /// Label used in diagnostics
    const KIND: &'static str;
    /// Every variant with its canonical name
    const NAMES: &'static [(&'static str, Self)];

    /// Resolve a name, ignoring ASCII case
    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Canonical name of this variant
    fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

/// Declare a [`NamedEnum`] that serializes as its canonical name
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::style::NamedEnum for $name {
            const KIND: &'static str = $kind;
            const NAMES: &'static [(&'static str, Self)] = &[ $( ($text, $name::$variant) ),+ ];
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::style::NamedEnum::name(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let name = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::style::NamedEnum>::from_name(&name).ok_or_else(|| {
                    ::serde::de::Error::custom(format!("unknown {} `{}`", $kind, name))
                })
            }
        }
    };
}

pub(crate) use named_enum;

/// Deserialize an optional named enum, mapping unknown names to `None`
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: NamedEnum,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.and_then(|name| resolve_or_warn(&name)))
}

/// Resolve a name, logging a warning and returning `None` when unknown
pub fn resolve_or_warn<T: NamedEnum>(name: &str) -> Option<T> {
    let value = T::from_name(name);
    if value.is_none() {
        tracing::warn!(kind = T::KIND, name, "unknown name, using engine default");
    }
    value
}

named_enum! {
    /// Whether a paint fills or strokes geometry
    pub enum PaintStyle: "paint style" {
        Fill => "Fill",
        Stroke => "Stroke",
    }
}

named_enum! {
    /// Stroke line cap style
    pub enum LineCap: "stroke cap" {
        Butt => "Butt",
        Round => "Round",
        Square => "Square",
    }
}

named_enum! {
    /// Stroke line join style
    pub enum LineJoin: "stroke join" {
        Miter => "Miter",
        Round => "Round",
        Bevel => "Bevel",
    }
}

named_enum! {
    /// Compositing operator
    pub enum BlendMode: "blend mode" {
        Clear => "Clear",
        Src => "Src",
        Dst => "Dst",
        SrcOver => "SrcOver",
        DstOver => "DstOver",
        SrcIn => "SrcIn",
        DstIn => "DstIn",
        SrcOut => "SrcOut",
        DstOut => "DstOut",
        SrcATop => "SrcATop",
        DstATop => "DstATop",
        Xor => "Xor",
        Plus => "Plus",
        Modulate => "Modulate",
        Screen => "Screen",
        Overlay => "Overlay",
        Darken => "Darken",
        Lighten => "Lighten",
        ColorDodge => "ColorDodge",
        ColorBurn => "ColorBurn",
        HardLight => "HardLight",
        SoftLight => "SoftLight",
        Difference => "Difference",
        Exclusion => "Exclusion",
        Multiply => "Multiply",
        Hue => "Hue",
        Saturation => "Saturation",
        Color => "Color",
        Luminosity => "Luminosity",
    }
}

named_enum! {
    /// How a shader treats coordinates outside its defined range
    pub enum TileMode: "tile mode" {
        Clamp => "Clamp",
        Repeat => "Repeat",
        Mirror => "Mirror",
        Decal => "Decal",
    }
}

named_enum! {
    /// Rule deciding which regions of a path are inside
    pub enum FillRule: "fill rule" {
        Winding => "Winding",
        EvenOdd => "EvenOdd",
    }
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::Winding
    }
}

impl Default for TileMode {
    fn default() -> Self {
        TileMode::Clamp
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paint
// ─────────────────────────────────────────────────────────────────────────────

/// Dash path effect: alternating on/off lengths starting at `phase`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub intervals: Vec<f32>,
    #[serde(default)]
    pub phase: f32,
}

/// Declarative paint description
///
/// Every field is optional; unset fields keep the engine default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintOptions {
    pub color: Option<Color>,
    #[serde(deserialize_with = "lenient")]
    pub style: Option<PaintStyle>,
    pub anti_alias: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub blend_mode: Option<BlendMode>,
    #[serde(deserialize_with = "lenient")]
    pub stroke_cap: Option<LineCap>,
    #[serde(deserialize_with = "lenient")]
    pub stroke_join: Option<LineJoin>,
    pub stroke_miter: Option<f32>,
    pub stroke_width: Option<f32>,
    pub dash: Option<DashPattern>,
    pub alpha: Option<f32>,
}

impl PaintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filled paint of the given color
    pub fn fill(color: Color) -> Self {
        Self::new().with_style(PaintStyle::Fill).with_color(color)
    }

    /// A stroking paint of the given color and width
    pub fn stroke(color: Color, width: f32) -> Self {
        Self::new()
            .with_style(PaintStyle::Stroke)
            .with_color(color)
            .with_stroke_width(width)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = Some(anti_alias);
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    pub fn with_stroke_cap(mut self, cap: LineCap) -> Self {
        self.stroke_cap = Some(cap);
        self
    }

    pub fn with_stroke_join(mut self, join: LineJoin) -> Self {
        self.stroke_join = Some(join);
        self
    }

    pub fn with_stroke_miter(mut self, miter: f32) -> Self {
        self.stroke_miter = Some(miter);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_dash(mut self, intervals: Vec<f32>, phase: f32) -> Self {
        self.dash = Some(DashPattern { intervals, phase });
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

/// A color at a position along a gradient, `offset` in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient filling a `width x height` rectangle
///
/// The gradient line passes through the rectangle's center and is rotated
/// by `rotation` degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientOptions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub stops: Vec<ColorStop>,
    #[serde(default, deserialize_with = "lenient")]
    pub tile_mode: Option<TileMode>,
}

/// Radial gradient description, accepted but never rendered
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialGradientOptions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// Declarative gradient description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GradientOptions {
    Linear(LinearGradientOptions),
    Radial(RadialGradientOptions),
}

impl GradientOptions {
    pub fn kind(&self) -> &'static str {
        match self {
            GradientOptions::Linear(_) => "linear",
            GradientOptions::Radial(_) => "radial",
        }
    }
}

/// Resolved linear gradient handed to the engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientDesc {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
    pub tile_mode: TileMode,
}
