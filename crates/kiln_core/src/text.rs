//! Paragraph and text style vocabulary
//!
//! Mirrors the option set of a typical paragraph engine. The bundled
//! engine honours a subset (size, color, letter/word spacing, alignment,
//! max lines, ellipsis, height multiplier); the rest still participates in
//! fingerprints so two paragraphs differing only in an unsupported option
//! never share a cached artifact.

use serde::{Deserialize, Serialize};

use crate::style::{lenient, named_enum};
use crate::types::Color;

named_enum! {
    /// Horizontal alignment of lines within the layout width
    pub enum TextAlign: "text align" {
        Left => "Left",
        Right => "Right",
        Center => "Center",
        Justify => "Justify",
        Start => "Start",
        End => "End",
    }
}

named_enum! {
    pub enum TextDirection: "text direction" {
        Rtl => "RTL",
        Ltr => "LTR",
    }
}

named_enum! {
    /// Whether ascent/descent of the first and last lines are adjusted
    pub enum TextHeightBehavior: "text height behavior" {
        All => "All",
        DisableFirstAscent => "DisableFirstAscent",
        DisableLastDescent => "DisableLastDescent",
        DisableAll => "DisableAll",
    }
}

named_enum! {
    pub enum TextBaseline: "text baseline" {
        Alphabetic => "Alphabetic",
        Ideographic => "Ideographic",
    }
}

named_enum! {
    pub enum DecorationStyle: "decoration style" {
        Solid => "Solid",
        Double => "Double",
        Dotted => "Dotted",
        Dashed => "Dashed",
        Wavy => "Wavy",
    }
}

named_enum! {
    /// Line drawn along the text
    pub enum Decoration: "decoration" {
        None => "NoDecoration",
        Underline => "UnderlineDecoration",
        Overline => "OverlineDecoration",
        LineThrough => "LineThroughDecoration",
    }
}

named_enum! {
    pub enum FontWeight: "font weight" {
        Invisible => "Invisible",
        Thin => "Thin",
        ExtraLight => "ExtraLight",
        Light => "Light",
        Normal => "Normal",
        Medium => "Medium",
        SemiBold => "SemiBold",
        Bold => "Bold",
        ExtraBold => "ExtraBold",
        Black => "Black",
        ExtraBlack => "ExtraBlack",
    }
}

impl FontWeight {
    /// Numeric weight on the usual 0..1000 scale
    pub fn to_numeric(self) -> u16 {
        match self {
            FontWeight::Invisible => 0,
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
            FontWeight::ExtraBlack => 1000,
        }
    }
}

named_enum! {
    pub enum FontWidth: "font width" {
        UltraCondensed => "UltraCondensed",
        ExtraCondensed => "ExtraCondensed",
        Condensed => "Condensed",
        SemiCondensed => "SemiCondensed",
        Normal => "Normal",
        SemiExpanded => "SemiExpanded",
        Expanded => "Expanded",
        ExtraExpanded => "ExtraExpanded",
        UltraExpanded => "UltraExpanded",
    }
}

named_enum! {
    pub enum FontSlant: "font slant" {
        Upright => "Upright",
        Italic => "Italic",
        Oblique => "Oblique",
    }
}

/// Font selection hints
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    #[serde(deserialize_with = "lenient")]
    pub weight: Option<FontWeight>,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<FontWidth>,
    #[serde(deserialize_with = "lenient")]
    pub slant: Option<FontSlant>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextShadow {
    pub color: Option<Color>,
    /// x and y offset, `(0, 0)` when unset
    pub offset: Option<(f32, f32)>,
    pub blur_radius: Option<f32>,
}

/// OpenType feature toggle, e.g. `("smcp", 1)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontFeature {
    pub name: String,
    pub value: i32,
}

/// Variable font axis setting, e.g. `("wght", 650.0)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontVariation {
    pub axis: String,
    pub value: f32,
}

/// Character-level styling
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub word_spacing: Option<f32>,
    pub font_families: Vec<String>,
    pub font_style: Option<FontStyle>,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub foreground_color: Option<Color>,
    #[serde(deserialize_with = "lenient")]
    pub decoration: Option<Decoration>,
    pub decoration_color: Option<Color>,
    pub decoration_thickness: Option<f32>,
    #[serde(deserialize_with = "lenient")]
    pub decoration_style: Option<DecorationStyle>,
    pub font_features: Vec<FontFeature>,
    pub font_variations: Vec<FontVariation>,
    pub height_multiplier: Option<f32>,
    pub half_leading: Option<bool>,
    pub locale: Option<String>,
    pub shadows: Vec<TextShadow>,
    #[serde(deserialize_with = "lenient")]
    pub text_baseline: Option<TextBaseline>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn with_word_spacing(mut self, spacing: f32) -> Self {
        self.word_spacing = Some(spacing);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_families.push(family.into());
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = Some(decoration);
        self
    }
}

/// Minimum line metrics applied to every line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrutStyle {
    pub strut_enabled: Option<bool>,
    pub font_families: Vec<String>,
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f32>,
    pub height_multiplier: Option<f32>,
    pub half_leading: Option<bool>,
    pub leading: Option<f32>,
    pub force_strut_height: Option<bool>,
}

/// Block-level styling, including the default text style for segments
/// that carry none
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub disable_hinting: Option<bool>,
    pub ellipsis: Option<String>,
    pub height_multiplier: Option<f32>,
    pub max_lines: Option<usize>,
    pub replace_tab_characters: Option<bool>,
    pub strut_style: Option<StrutStyle>,
    #[serde(deserialize_with = "lenient")]
    pub text_align: Option<TextAlign>,
    #[serde(deserialize_with = "lenient")]
    pub text_direction: Option<TextDirection>,
    #[serde(deserialize_with = "lenient")]
    pub text_height_behavior: Option<TextHeightBehavior>,
    pub text_style: Option<TextStyle>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.text_style = Some(style);
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }
}

/// A run of text with an optional style override
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    #[serde(default)]
    pub style: Option<TextStyle>,
}

impl TextSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// A segment whose style has been resolved against the paragraph default
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

/// Measurements of a laid-out paragraph
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParagraphMetrics {
    /// Width the paragraph was laid out at
    pub max_width: f64,
    pub height: f64,
    /// Width of the longest line without wrapping
    pub max_intrinsic_width: f64,
    /// Width of the widest unbreakable run
    pub min_intrinsic_width: f64,
    pub line_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NamedEnum;

    #[test]
    fn decoration_uses_prefixed_names() {
        assert_eq!(
            Decoration::from_name("UnderlineDecoration"),
            Some(Decoration::Underline)
        );
        assert_eq!(Decoration::None.name(), "NoDecoration");
        assert_eq!(TextDirection::from_name("rtl"), Some(TextDirection::Rtl));
    }

    #[test]
    fn paragraph_style_parses_partially_valid_input() {
        let style: ParagraphStyle = serde_json::from_str(
            r#"{
                "text_align": "Diagonal",
                "max_lines": 2,
                "text_style": {"font_size": 18.0, "font_style": {"weight": "Bold", "slant": "Sideways"}}
            }"#,
        )
        .unwrap();
        assert_eq!(style.text_align, None);
        assert_eq!(style.max_lines, Some(2));
        let font_style = style.text_style.unwrap().font_style.unwrap();
        assert_eq!(font_style.weight, Some(FontWeight::Bold));
        assert_eq!(font_style.slant, None);
    }

    #[test]
    fn numeric_weights() {
        assert_eq!(FontWeight::Normal.to_numeric(), 400);
        assert_eq!(FontWeight::Bold.to_numeric(), 700);
    }
}
