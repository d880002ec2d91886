//! Conversions from Kiln style values to tiny-skia types

use kiln_core::{BlendMode, Color, FillRule, LineCap, LineJoin, Point, Rect, TileMode};
use tiny_skia::{
    BlendMode as SkiaBlendMode, FillRule as SkiaFillRule, LineCap as SkiaLineCap,
    LineJoin as SkiaLineJoin, SpreadMode,
};

/// Extension trait for converting Kiln values to tiny-skia
pub(crate) trait ToSkia {
    type Output;

    fn to_skia(self) -> Self::Output;
}

impl ToSkia for BlendMode {
    type Output = SkiaBlendMode;

    fn to_skia(self) -> SkiaBlendMode {
        match self {
            BlendMode::Clear => SkiaBlendMode::Clear,
            BlendMode::Src => SkiaBlendMode::Source,
            BlendMode::Dst => SkiaBlendMode::Destination,
            BlendMode::SrcOver => SkiaBlendMode::SourceOver,
            BlendMode::DstOver => SkiaBlendMode::DestinationOver,
            BlendMode::SrcIn => SkiaBlendMode::SourceIn,
            BlendMode::DstIn => SkiaBlendMode::DestinationIn,
            BlendMode::SrcOut => SkiaBlendMode::SourceOut,
            BlendMode::DstOut => SkiaBlendMode::DestinationOut,
            BlendMode::SrcATop => SkiaBlendMode::SourceAtop,
            BlendMode::DstATop => SkiaBlendMode::DestinationAtop,
            BlendMode::Xor => SkiaBlendMode::Xor,
            BlendMode::Plus => SkiaBlendMode::Plus,
            BlendMode::Modulate => SkiaBlendMode::Modulate,
            BlendMode::Screen => SkiaBlendMode::Screen,
            BlendMode::Overlay => SkiaBlendMode::Overlay,
            BlendMode::Darken => SkiaBlendMode::Darken,
            BlendMode::Lighten => SkiaBlendMode::Lighten,
            BlendMode::ColorDodge => SkiaBlendMode::ColorDodge,
            BlendMode::ColorBurn => SkiaBlendMode::ColorBurn,
            BlendMode::HardLight => SkiaBlendMode::HardLight,
            BlendMode::SoftLight => SkiaBlendMode::SoftLight,
            BlendMode::Difference => SkiaBlendMode::Difference,
            BlendMode::Exclusion => SkiaBlendMode::Exclusion,
            BlendMode::Multiply => SkiaBlendMode::Multiply,
            BlendMode::Hue => SkiaBlendMode::Hue,
            BlendMode::Saturation => SkiaBlendMode::Saturation,
            BlendMode::Color => SkiaBlendMode::Color,
            BlendMode::Luminosity => SkiaBlendMode::Luminosity,
        }
    }
}

impl ToSkia for LineCap {
    type Output = SkiaLineCap;

    fn to_skia(self) -> SkiaLineCap {
        match self {
            LineCap::Butt => SkiaLineCap::Butt,
            LineCap::Round => SkiaLineCap::Round,
            LineCap::Square => SkiaLineCap::Square,
        }
    }
}

impl ToSkia for LineJoin {
    type Output = SkiaLineJoin;

    fn to_skia(self) -> SkiaLineJoin {
        match self {
            LineJoin::Miter => SkiaLineJoin::Miter,
            LineJoin::Round => SkiaLineJoin::Round,
            LineJoin::Bevel => SkiaLineJoin::Bevel,
        }
    }
}

impl ToSkia for FillRule {
    type Output = SkiaFillRule;

    fn to_skia(self) -> SkiaFillRule {
        match self {
            FillRule::Winding => SkiaFillRule::Winding,
            FillRule::EvenOdd => SkiaFillRule::EvenOdd,
        }
    }
}

impl ToSkia for TileMode {
    type Output = SpreadMode;

    /// tiny-skia has no decal mode; it falls back to edge padding
    fn to_skia(self) -> SpreadMode {
        match self {
            TileMode::Clamp | TileMode::Decal => SpreadMode::Pad,
            TileMode::Repeat => SpreadMode::Repeat,
            TileMode::Mirror => SpreadMode::Reflect,
        }
    }
}

impl ToSkia for Color {
    type Output = tiny_skia::Color;

    fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }
}

impl ToSkia for Point {
    type Output = tiny_skia::Point;

    fn to_skia(self) -> tiny_skia::Point {
        tiny_skia::Point::from_xy(self.x as f32, self.y as f32)
    }
}

impl ToSkia for Rect {
    type Output = Option<tiny_skia::Rect>;

    fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_ltrb(
            self.left as f32,
            self.top as f32,
            self.right as f32,
            self.bottom as f32,
        )
    }
}

/// Convert tiny-skia bounds back to Kiln's f64 rectangle
pub(crate) fn rect_from_skia(rect: tiny_skia::Rect) -> Rect {
    Rect::from_ltrb(
        rect.left() as f64,
        rect.top() as f64,
        rect.right() as f64,
        rect.bottom() as f64,
    )
}
