//! Minimal paragraph engine on ttf-parser
//!
//! Glyphs are mapped one per character through the font's cmap and placed
//! by horizontal advance. Lines break at Unicode line break opportunities.
//! There is no shaping, kerning, bidi reordering or font fallback per
//! character: each run picks one face by family name, from the loaded fonts
//! or the host's, and falls back to the first loaded face.
//!
//! Honoured options: font size, color, letter and word spacing, height
//! multiplier, alignment, max lines and ellipsis. Everything else in the
//! style records is accepted and ignored.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kiln_core::{
    Color, KilnError, ParagraphMetrics, ParagraphStyle, Result, TextAlign, TextDirection,
    TextRun, TextStyle,
};
use rustc_hash::FxHashMap;
use tiny_skia::{FillRule, Paint, PathBuilder, PixmapMut, Transform};
use ttf_parser::{GlyphId, OutlineBuilder};
use unicode_linebreak::BreakOpportunity;

use crate::convert::ToSkia;

/// Font size used when neither the run nor the paragraph sets one
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

// ─────────────────────────────────────────────────────────────────────────────
// Fonts
// ─────────────────────────────────────────────────────────────────────────────

/// Fonts installed on the host, discovered through fontdb
///
/// The directory scan runs on the first lookup. Faces are cached by the
/// family name they were requested under, misses included.
pub struct SystemFonts {
    db: OnceLock<Database>,
    faces: Mutex<FxHashMap<String, Option<Arc<FontFace>>>>,
}

impl SystemFonts {
    pub fn new() -> Self {
        Self {
            db: OnceLock::new(),
            faces: Mutex::new(FxHashMap::default()),
        }
    }

    fn database(&self) -> &Database {
        self.db.get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.faces().count(), "system fonts loaded");
            db
        })
    }

    /// Face of an installed family, `None` when the host lacks it
    pub fn family(&self, name: &str) -> Option<Arc<FontFace>> {
        let mut faces = self.faces.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = faces.get(name) {
            return cached.clone();
        }

        let db = self.database();
        let face = db
            .query(&regular(&[Family::Name(name)]))
            .and_then(|id| db.with_face_data(id, |data, index| (data.to_vec(), index)))
            .and_then(|(data, index)| match FontFace::from_data_index(data, index) {
                Ok(face) => Some(Arc::new(face)),
                Err(err) => {
                    tracing::warn!(family = name, error = %err, "system font rejected");
                    None
                }
            });
        if face.is_none() {
            tracing::debug!(family = name, "font family not installed");
        }
        faces.insert(name.to_string(), face.clone());
        face
    }

    /// Raw data of a default face: sans-serif, then serif, then monospace,
    /// then any installed single-face font
    pub fn default_face_data(&self) -> Option<Vec<u8>> {
        let db = self.database();
        let generic = [Family::SansSerif, Family::Serif, Family::Monospace]
            .into_iter()
            .filter_map(|family| db.query(&regular(&[family])));
        let id = generic
            .chain(db.faces().map(|face| face.id))
            .find(|&id| db.face(id).is_some_and(|face| face.index == 0))?;
        if let Some(face) = db.face(id) {
            tracing::debug!(font = %face.post_script_name, "using system font");
        }
        db.with_face_data(id, |data, _| data.to_vec())
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFonts")
            .field("scanned", &self.db.get().is_some())
            .finish()
    }
}

fn regular<'a>(families: &'a [Family<'a>]) -> Query<'a> {
    Query {
        families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    }
}

/// Read a default face from the fonts installed on the host
pub fn load_system_font() -> Option<Vec<u8>> {
    SystemFonts::new().default_face_data()
}

/// A parsed font face
pub struct FontFace {
    /// Raw font data (kept alive for ttf-parser)
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
}

impl FontFace {
    /// Load the first face from raw TTF/OTF data
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Load face `index` of a font file or collection
    pub fn from_data_index(data: Vec<u8>, index: u32) -> Result<Self> {
        let data = Arc::new(data);
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| KilnError::ResourceCreationFailed(format!("font parse error: {:?}", e)))?;

        let family = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            family,
            index,
            data,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn as_ttf_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em.max(1) as f32
    }

    fn metrics(&self, font_size: f32) -> LineMetrics {
        let scale = self.scale(font_size);
        LineMetrics {
            ascent: self.ascender as f32 * scale,
            descent: -(self.descender as f32) * scale,
            gap: self.line_gap as f32 * scale,
        }
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

/// The set of faces paragraphs draw from
///
/// Families a run names that none of the loaded faces provide are looked
/// up among the host's fonts when system fonts are attached.
#[derive(Clone, Debug)]
pub struct SkiaFonts {
    faces: Vec<Arc<FontFace>>,
    /// Requested family names resolved through the system fonts
    aliases: Vec<(String, usize)>,
    system: Option<Arc<SystemFonts>>,
}

impl SkiaFonts {
    /// Parse every font; at least one is required
    pub fn from_data(fonts: &[Vec<u8>]) -> Result<Self> {
        if fonts.is_empty() {
            return Err(KilnError::MissingDependency("no font data supplied".into()));
        }
        let faces = fonts
            .iter()
            .map(|data| FontFace::from_data(data.clone()).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            faces = faces.len(),
            families = ?faces.iter().map(|f| f.family()).collect::<Vec<_>>(),
            "fonts loaded"
        );
        Ok(Self {
            faces,
            aliases: Vec::new(),
            system: None,
        })
    }

    /// Resolve unknown family names against the host's fonts
    pub fn with_system_fonts(mut self, system: Arc<SystemFonts>) -> Self {
        self.system = Some(system);
        self
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn find(&self, family: &str) -> Option<usize> {
        self.faces
            .iter()
            .position(|face| face.family.eq_ignore_ascii_case(family))
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(family))
                    .map(|&(_, index)| index)
            })
    }

    /// Copy of this set extended with system faces for missing families
    fn with_families<'a>(&self, families: impl IntoIterator<Item = &'a String>) -> SkiaFonts {
        let mut fonts = self.clone();
        let Some(system) = &self.system else {
            return fonts;
        };
        for family in families {
            if fonts.find(family).is_some() {
                continue;
            }
            let Some(face) = system.family(family) else {
                continue;
            };
            let index = match fonts.faces.iter().position(|f| Arc::ptr_eq(f, &face)) {
                Some(index) => index,
                None => {
                    fonts.faces.push(face);
                    fonts.faces.len() - 1
                }
            };
            fonts.aliases.push((family.clone(), index));
        }
        fonts
    }

    /// Index of the first face whose family matches, else the first face
    fn resolve(&self, families: &[String]) -> usize {
        families
            .iter()
            .find_map(|wanted| self.find(wanted))
            .unwrap_or(0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paragraph
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LineMetrics {
    ascent: f32,
    descent: f32,
    gap: f32,
}

impl LineMetrics {
    fn max(self, other: LineMetrics) -> LineMetrics {
        LineMetrics {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            gap: self.gap.max(other.gap),
        }
    }
}

#[derive(Clone, Debug)]
struct PlacedGlyph {
    face: usize,
    glyph: u16,
    /// Offset from the start of the word
    x: f32,
    size: f32,
    color: Color,
}

/// An unbreakable run of glyphs plus the whitespace after it
#[derive(Clone, Debug, Default)]
struct Word {
    glyphs: Vec<PlacedGlyph>,
    width: f32,
    space: f32,
    metrics: LineMetrics,
    height_multiplier: f32,
    hard_break: bool,
}

impl Word {
    fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.space == 0.0 && !self.hard_break
    }

    fn line_height(&self) -> f32 {
        let m = self.metrics;
        (m.ascent + m.descent + m.gap) * self.height_multiplier
    }
}

#[derive(Clone, Debug)]
struct Line {
    start: usize,
    end: usize,
    width: f32,
    ascent: f32,
    height: f32,
    ellipsized: bool,
}

/// A paragraph built from styled runs
#[derive(Clone, Debug)]
pub struct SkiaParagraph {
    fonts: SkiaFonts,
    words: Vec<Word>,
    ellipsis: Option<Word>,
    align: TextAlign,
    direction: TextDirection,
    max_lines: Option<usize>,
    lines: Vec<Line>,
    layout_width: f64,
    height: f64,
    max_intrinsic_width: f64,
    min_intrinsic_width: f64,
}

/// Per-run values resolved against the paragraph defaults
struct RunStyle {
    face: usize,
    size: f32,
    color: Color,
    letter_spacing: f32,
    word_spacing: f32,
    height_multiplier: f32,
}

impl RunStyle {
    fn resolve(fonts: &SkiaFonts, paragraph: &ParagraphStyle, style: &TextStyle) -> Self {
        Self {
            face: fonts.resolve(&style.font_families),
            size: style.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            color: style
                .color
                .or(style.foreground_color)
                .unwrap_or(Color::BLACK),
            letter_spacing: style.letter_spacing.unwrap_or(0.0),
            word_spacing: style.word_spacing.unwrap_or(0.0),
            height_multiplier: style
                .height_multiplier
                .or(paragraph.height_multiplier)
                .unwrap_or(1.0),
        }
    }
}

impl SkiaParagraph {
    pub(crate) fn build(fonts: &SkiaFonts, style: &ParagraphStyle, runs: &[TextRun]) -> Result<Self> {
        let default_style = style.text_style.clone().unwrap_or_default();
        let requested = runs
            .iter()
            .map(|run| &run.style)
            .chain(std::iter::once(&default_style))
            .flat_map(|text_style| text_style.font_families.iter());
        let fonts = fonts.with_families(requested);

        let words = break_words(&fonts, style, runs)?;
        let ellipsis = match &style.ellipsis {
            Some(text) if !text.is_empty() => {
                let run = TextRun {
                    text: text.clone(),
                    style: default_style,
                };
                Some(merge_words(break_words(&fonts, style, &[run])?))
            }
            _ => None,
        };

        let mut paragraph = Self {
            fonts,
            words,
            ellipsis,
            align: style.text_align.unwrap_or(TextAlign::Start),
            direction: style.text_direction.unwrap_or(TextDirection::Ltr),
            max_lines: style.max_lines,
            lines: Vec::new(),
            layout_width: 0.0,
            height: 0.0,
            max_intrinsic_width: 0.0,
            min_intrinsic_width: 0.0,
        };
        paragraph.measure_intrinsic();
        Ok(paragraph)
    }

    fn measure_intrinsic(&mut self) {
        let mut widest_line = 0.0f32;
        let mut line = 0.0f32;
        let mut pending_space = 0.0f32;
        let mut widest_word = 0.0f32;
        let mut has_words = false;
        for word in &self.words {
            if has_words {
                line += pending_space;
            }
            line += word.width;
            has_words = true;
            pending_space = word.space;
            widest_word = widest_word.max(word.width);
            widest_line = widest_line.max(line);
            if word.hard_break {
                line = 0.0;
                has_words = false;
            }
        }
        self.max_intrinsic_width = widest_line as f64;
        self.min_intrinsic_width = widest_word as f64;
    }

    /// Greedy line breaking at word boundaries
    pub(crate) fn layout(&mut self, width: f64) {
        let limit = width as f32;
        let mut lines = Vec::new();
        let mut line: Option<Line> = None;
        let mut pending_space = 0.0f32;

        for (index, word) in self.words.iter().enumerate() {
            let overflow = line.as_ref().is_some_and(|open| {
                open.end > open.start && open.width + pending_space + word.width > limit
            });
            if overflow {
                lines.extend(line.take());
            }

            let open = line.get_or_insert_with(|| {
                pending_space = 0.0;
                Line {
                    start: index,
                    end: index,
                    width: 0.0,
                    ascent: 0.0,
                    height: 0.0,
                    ellipsized: false,
                }
            });
            if open.end > open.start {
                open.width += pending_space;
            }
            open.width += word.width;
            open.ascent = open.ascent.max(word.metrics.ascent * word.height_multiplier);
            open.height = open.height.max(word.line_height());
            open.end = index + 1;
            pending_space = word.space;

            if word.hard_break {
                lines.extend(line.take());
            }
        }
        lines.extend(line);

        if let Some(max_lines) = self.max_lines {
            if lines.len() > max_lines {
                lines.truncate(max_lines);
                if let (Some(last), Some(ellipsis)) = (lines.last_mut(), &self.ellipsis) {
                    last.ellipsized = true;
                    last.width += ellipsis.width;
                }
            }
        }

        self.height = lines.iter().map(|l| l.height as f64).sum();
        self.lines = lines;
        self.layout_width = width;
    }

    pub(crate) fn metrics(&self) -> ParagraphMetrics {
        ParagraphMetrics {
            max_width: self.layout_width,
            height: self.height,
            max_intrinsic_width: self.max_intrinsic_width,
            min_intrinsic_width: self.min_intrinsic_width,
            line_count: self.lines.len(),
        }
    }

    fn line_offset(&self, line: &Line) -> f32 {
        let free = (self.layout_width as f32 - line.width).max(0.0);
        let rtl = self.direction == TextDirection::Rtl;
        match self.align {
            TextAlign::Left | TextAlign::Justify => 0.0,
            TextAlign::Right => free,
            TextAlign::Center => free / 2.0,
            TextAlign::Start => {
                if rtl {
                    free
                } else {
                    0.0
                }
            }
            TextAlign::End => {
                if rtl {
                    0.0
                } else {
                    free
                }
            }
        }
    }

    /// Draw every laid-out line with its top-left corner at `(x, y)`
    pub(crate) fn paint(&self, pixmap: &mut PixmapMut<'_>, transform: Transform, x: f32, y: f32) {
        let faces: Vec<Option<ttf_parser::Face<'_>>> =
            self.fonts.faces.iter().map(|face| face.as_ttf_face()).collect();

        let mut top = y;
        for line in &self.lines {
            let baseline = top + line.ascent;
            let mut pen = x + self.line_offset(line);
            for word in &self.words[line.start..line.end] {
                self.paint_word(pixmap, transform, &faces, word, pen, baseline);
                pen += word.width + word.space;
            }
            if line.ellipsized {
                if let Some(ellipsis) = &self.ellipsis {
                    let last = &self.words[line.end.saturating_sub(1)];
                    self.paint_word(pixmap, transform, &faces, ellipsis, pen - last.space, baseline);
                }
            }
            top += line.height;
        }
    }

    fn paint_word(
        &self,
        pixmap: &mut PixmapMut<'_>,
        transform: Transform,
        faces: &[Option<ttf_parser::Face<'_>>],
        word: &Word,
        x: f32,
        baseline: f32,
    ) {
        for glyph in &word.glyphs {
            let (Some(Some(face)), Some(font)) = (faces.get(glyph.face), self.fonts.faces.get(glyph.face))
            else {
                continue;
            };
            let mut builder = GlyphPathBuilder::new(x + glyph.x, baseline, font.scale(glyph.size));
            if face.outline_glyph(GlyphId(glyph.glyph), &mut builder).is_none() {
                continue;
            }
            let Some(path) = builder.finish() else {
                continue;
            };
            let mut paint = Paint::default();
            paint.anti_alias = true;
            paint.set_color(glyph.color.to_skia());
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }
}

/// Split styled runs into words at Unicode line break opportunities
///
/// Opportunities are found over the text of all runs joined, so a word may
/// span runs. Whitespace before an opportunity becomes the word's trailing
/// space; a mandatory break other than the end of text ends the line.
fn break_words(fonts: &SkiaFonts, paragraph: &ParagraphStyle, runs: &[TextRun]) -> Result<Vec<Word>> {
    let text: String = runs.iter().map(|run| run.text.as_str()).collect();
    let mut breaks = unicode_linebreak::linebreaks(&text).peekable();
    let mut words = Vec::new();
    let mut current = Word::default();
    let mut base = 0;

    for run in runs {
        let style = RunStyle::resolve(fonts, paragraph, &run.style);
        let font = &fonts.faces[style.face];
        let face = font.as_ttf_face().ok_or_else(|| {
            KilnError::ResourceCreationFailed(format!("font `{}` could not be parsed", font.family))
        })?;
        let scale = font.scale(style.size);
        let metrics = font.metrics(style.size);
        let advance = |c: char| -> (u16, f32) {
            let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
            let width = face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
            (glyph.0, width)
        };

        for (offset, c) in run.text.char_indices() {
            let position = base + offset;
            while let Some(&(at, opportunity)) = breaks.peek() {
                if at > position {
                    break;
                }
                breaks.next();
                let mandatory = opportunity == BreakOpportunity::Mandatory;
                // an empty word at a mandatory break is a blank line
                if at == position && (mandatory || !current.is_empty()) {
                    current.hard_break = mandatory;
                    words.push(std::mem::take(&mut current));
                }
            }

            current.metrics = current.metrics.max(metrics);
            current.height_multiplier = current.height_multiplier.max(style.height_multiplier);
            if c.is_control() && c != '\t' {
                continue;
            }
            if c.is_whitespace() {
                let (_, width) = advance(' ');
                current.space += width + style.letter_spacing + style.word_spacing;
                continue;
            }

            // whitespace with no break after it, such as a no-break space
            current.width += current.space;
            current.space = 0.0;

            let (glyph, width) = advance(c);
            current.glyphs.push(PlacedGlyph {
                face: style.face,
                glyph,
                x: current.width,
                size: style.size,
                color: style.color,
            });
            current.width += width + style.letter_spacing;
        }
        base += run.text.len();
    }

    if !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

/// Join words into one unbreakable unit, keeping their spacing
fn merge_words(parts: Vec<Word>) -> Word {
    let mut merged = Word::default();
    let mut pen = 0.0;
    for part in parts {
        merged.metrics = merged.metrics.max(part.metrics);
        merged.height_multiplier = merged.height_multiplier.max(part.height_multiplier);
        merged.glyphs.extend(part.glyphs.into_iter().map(|mut glyph| {
            glyph.x += pen;
            glyph
        }));
        merged.width = pen + part.width;
        pen += part.width + part.space;
    }
    merged
}

/// Converts glyph outlines to tiny-skia paths at a pen position
struct GlyphPathBuilder {
    path_builder: PathBuilder,
    x: f32,
    y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            path_builder: PathBuilder::new(),
            x,
            y,
            scale,
        }
    }

    fn tx(&self, gx: f32) -> f32 {
        self.x + gx * self.scale
    }

    // font units point up
    fn ty(&self, gy: f32) -> f32 {
        self.y - gy * self.scale
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.path_builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path_builder.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path_builder.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path_builder
            .quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path_builder.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.path_builder.close();
    }
}
