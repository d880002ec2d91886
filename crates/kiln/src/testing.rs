//! Recording engine for unit tests
//!
//! Handles are plain data, surfaces record every drawing call and count
//! how many of them are alive, and surface allocation can be made to fail.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kiln_core::{
    Canvas, Color, Engine, FillRule, KilnError, LinearGradientDesc, PaintOptions,
    ParagraphMetrics, ParagraphStyle, PathData, Rect, Result, Surface, TextRun,
};

pub const CHAR_WIDTH: f64 = 8.0;
pub const LINE_HEIGHT: f64 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Scale(f64, f64),
    Translate(f64, f64),
    Rect(Rect),
    Path { commands: usize, style: Option<kiln_core::PaintStyle> },
    Paragraph(f64, f64),
}

#[derive(Debug)]
pub struct MockPaint {
    pub options: PaintOptions,
    pub shader: Option<MockShader>,
}

#[derive(Clone, Debug)]
pub struct MockShader {
    pub desc: LinearGradientDesc,
}

#[derive(Debug)]
pub struct MockPath {
    pub data: PathData,
    pub fill_rule: FillRule,
}

#[derive(Debug)]
pub struct MockParagraph {
    pub runs: Vec<TextRun>,
    pub width: f64,
}

impl MockParagraph {
    fn text_lines(&self) -> Vec<usize> {
        let text: String = self.runs.iter().map(|run| run.text.as_str()).collect();
        text.split('\n').map(|line| line.chars().count()).collect()
    }
}

#[derive(Debug)]
pub struct MockFonts {
    pub count: usize,
}

/// A host canvas is just a shared size
#[derive(Clone, Debug, Default)]
pub struct MockHostCanvas(Rc<Cell<(u32, u32)>>);

impl MockHostCanvas {
    pub fn size(&self) -> (u32, u32) {
        self.0.get()
    }
}

pub struct MockSurface {
    width: u32,
    height: u32,
    live: Rc<Cell<usize>>,
    draws: Rc<RefCell<Vec<DrawCall>>>,
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Default)]
pub struct MockEngine {
    pub paints_created: Cell<usize>,
    pub shaders_created: Cell<usize>,
    pub paths_created: Cell<usize>,
    pub paragraphs_built: Cell<usize>,
    pub surfaces_allocated: Cell<usize>,
    pub layouts: RefCell<Vec<f64>>,
    pub fail_surfaces: Cell<bool>,
    live: Rc<Cell<usize>>,
    draws: Rc<RefCell<Vec<DrawCall>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_surfaces(&self) -> usize {
        self.live.get()
    }

    /// Drain the recorded drawing calls
    pub fn take_draws(&self) -> Vec<DrawCall> {
        self.draws.borrow_mut().drain(..).collect()
    }

    fn surface(&self, width: u32, height: u32) -> Result<MockSurface> {
        if self.fail_surfaces.get() {
            return Err(KilnError::ResourceCreationFailed(format!(
                "mock refused a {}x{} surface",
                width, height
            )));
        }
        self.surfaces_allocated.set(self.surfaces_allocated.get() + 1);
        self.live.set(self.live.get() + 1);
        Ok(MockSurface {
            width,
            height,
            live: Rc::clone(&self.live),
            draws: Rc::clone(&self.draws),
        })
    }
}

impl Engine for MockEngine {
    type Paint = MockPaint;
    type Shader = MockShader;
    type Path = MockPath;
    type Paragraph = MockParagraph;
    type FontCollection = MockFonts;
    type HostCanvas = MockHostCanvas;
    type Surface = MockSurface;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn create_paint(&self, options: &PaintOptions, shader: Option<&MockShader>) -> Result<MockPaint> {
        self.paints_created.set(self.paints_created.get() + 1);
        Ok(MockPaint {
            options: options.clone(),
            shader: shader.cloned(),
        })
    }

    fn create_linear_gradient(&self, desc: &LinearGradientDesc) -> Result<MockShader> {
        self.shaders_created.set(self.shaders_created.get() + 1);
        Ok(MockShader { desc: desc.clone() })
    }

    fn create_path(&self, data: &PathData, fill_rule: FillRule) -> Result<MockPath> {
        self.paths_created.set(self.paths_created.get() + 1);
        Ok(MockPath {
            data: data.clone(),
            fill_rule,
        })
    }

    fn tight_bounds(&self, path: &MockPath) -> Option<Rect> {
        path.data.control_bounds()
    }

    fn create_raster_surface(&self, width: u32, height: u32) -> Result<MockSurface> {
        self.surface(width, height)
    }

    fn create_host_surface(
        &self,
        canvas: &MockHostCanvas,
        width: u32,
        height: u32,
    ) -> Result<MockSurface> {
        let surface = self.surface(width, height)?;
        canvas.0.set((width, height));
        Ok(surface)
    }

    fn load_fonts(&self, fonts: &[Vec<u8>]) -> Result<MockFonts> {
        if fonts.is_empty() {
            return Err(KilnError::MissingDependency("no fonts".into()));
        }
        Ok(MockFonts { count: fonts.len() })
    }

    fn build_paragraph(
        &self,
        _fonts: &MockFonts,
        _style: &ParagraphStyle,
        runs: &[TextRun],
    ) -> Result<MockParagraph> {
        self.paragraphs_built.set(self.paragraphs_built.get() + 1);
        Ok(MockParagraph {
            runs: runs.to_vec(),
            width: 0.0,
        })
    }

    fn layout_paragraph(&self, paragraph: &mut MockParagraph, width: f64) {
        self.layouts.borrow_mut().push(width);
        paragraph.width = width;
    }

    fn paragraph_metrics(&self, paragraph: &MockParagraph) -> ParagraphMetrics {
        let lines = paragraph.text_lines();
        let per_line = (paragraph.width / CHAR_WIDTH).floor().max(1.0) as usize;
        let line_count: usize = lines
            .iter()
            .map(|&chars| chars.div_ceil(per_line).max(1))
            .sum();
        let longest = lines.iter().copied().max().unwrap_or(0);
        ParagraphMetrics {
            max_width: paragraph.width,
            height: line_count as f64 * LINE_HEIGHT,
            max_intrinsic_width: longest as f64 * CHAR_WIDTH,
            min_intrinsic_width: CHAR_WIDTH,
            line_count,
        }
    }
}

impl Surface<MockEngine> for MockSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn canvas(&mut self) -> &mut dyn Canvas<MockEngine> {
        self
    }

    fn read_pixels(&mut self) -> Result<Vec<u8>> {
        Ok(vec![0; self.width as usize * self.height as usize * 4])
    }
}

impl Canvas<MockEngine> for MockSurface {
    fn clear(&mut self, color: Color) {
        self.draws.borrow_mut().push(DrawCall::Clear(color));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.draws.borrow_mut().push(DrawCall::Scale(sx, sy));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.draws.borrow_mut().push(DrawCall::Translate(dx, dy));
    }

    fn draw_rect(&mut self, rect: Rect, _paint: &MockPaint) {
        self.draws.borrow_mut().push(DrawCall::Rect(rect));
    }

    fn draw_path(&mut self, path: &MockPath, paint: &MockPaint) {
        self.draws.borrow_mut().push(DrawCall::Path {
            commands: path.data.commands().len(),
            style: paint.options.style,
        });
    }

    fn draw_paragraph(&mut self, _paragraph: &MockParagraph, x: f64, y: f64) {
        self.draws.borrow_mut().push(DrawCall::Paragraph(x, y));
    }
}
