//! Drawing surfaces
//!
//! A raster surface owns its [`Pixmap`] and frees it when dropped. A host
//! surface draws into a [`HostCanvas`] the caller keeps, resizing it first.

use std::cell::RefCell;
use std::rc::Rc;

use kiln_core::{Canvas, Color, KilnError, PaintStyle, Rect, Result, Surface};
use tiny_skia::{Pixmap, PixmapMut, Transform};

use crate::convert::ToSkia;
use crate::engine::SkiaEngine;
use crate::paint::SkiaPaint;
use crate::text::SkiaParagraph;

/// A caller-owned pixmap that surfaces can draw into
///
/// Clones share the same pixels.
#[derive(Clone, Debug)]
pub struct HostCanvas {
    pixmap: Rc<RefCell<Pixmap>>,
}

impl HostCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width.max(1), height.max(1)).ok_or_else(|| {
            KilnError::ResourceCreationFailed(format!("host canvas {}x{}", width, height))
        })?;
        Ok(Self {
            pixmap: Rc::new(RefCell::new(pixmap)),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.borrow().width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.borrow().height()
    }

    /// Copy of the current pixels, premultiplied RGBA8
    pub fn pixels(&self) -> Vec<u8> {
        self.pixmap.borrow().data().to_vec()
    }

    /// Encode the current pixels as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .borrow()
            .encode_png()
            .map_err(|e| KilnError::ResourceCreationFailed(format!("png encoding failed: {}", e)))
    }

    /// Whether two handles refer to the same canvas
    pub fn ptr_eq(&self, other: &HostCanvas) -> bool {
        Rc::ptr_eq(&self.pixmap, &other.pixmap)
    }

    fn resize(&self, width: u32, height: u32) -> Result<()> {
        let mut pixmap = self.pixmap.borrow_mut();
        if pixmap.width() != width || pixmap.height() != height {
            *pixmap = Pixmap::new(width, height).ok_or_else(|| {
                KilnError::ResourceCreationFailed(format!(
                    "cannot resize host canvas to {}x{}",
                    width, height
                ))
            })?;
        }
        Ok(())
    }
}

enum Backing {
    Raster(Pixmap),
    Host(HostCanvas),
}

/// A tiny-skia drawing surface
pub struct SkiaSurface {
    backing: Backing,
    transform: Transform,
}

impl SkiaSurface {
    pub(crate) fn raster(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            KilnError::ResourceCreationFailed(format!("raster surface {}x{}", width, height))
        })?;
        Ok(Self {
            backing: Backing::Raster(pixmap),
            transform: Transform::identity(),
        })
    }

    pub(crate) fn host(canvas: &HostCanvas, width: u32, height: u32) -> Result<Self> {
        canvas.resize(width, height)?;
        Ok(Self {
            backing: Backing::Host(canvas.clone()),
            transform: Transform::identity(),
        })
    }

    pub fn is_host_backed(&self) -> bool {
        matches!(self.backing, Backing::Host(_))
    }

    fn with_pixmap<R>(&mut self, draw: impl FnOnce(&mut PixmapMut<'_>, Transform) -> R) -> R {
        let transform = self.transform;
        match &mut self.backing {
            Backing::Raster(pixmap) => draw(&mut pixmap.as_mut(), transform),
            Backing::Host(canvas) => draw(&mut canvas.pixmap.borrow_mut().as_mut(), transform),
        }
    }
}

impl Surface<SkiaEngine> for SkiaSurface {
    fn width(&self) -> u32 {
        match &self.backing {
            Backing::Raster(pixmap) => pixmap.width(),
            Backing::Host(canvas) => canvas.width(),
        }
    }

    fn height(&self) -> u32 {
        match &self.backing {
            Backing::Raster(pixmap) => pixmap.height(),
            Backing::Host(canvas) => canvas.height(),
        }
    }

    fn canvas(&mut self) -> &mut dyn Canvas<SkiaEngine> {
        self
    }

    fn read_pixels(&mut self) -> Result<Vec<u8>> {
        Ok(match &self.backing {
            Backing::Raster(pixmap) => pixmap.data().to_vec(),
            Backing::Host(canvas) => canvas.pixels(),
        })
    }
}

impl Canvas<SkiaEngine> for SkiaSurface {
    fn clear(&mut self, color: Color) {
        self.with_pixmap(|pixmap, _| pixmap.fill(color.to_skia()));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.pre_scale(sx as f32, sy as f32);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx as f32, dy as f32);
    }

    fn draw_rect(&mut self, rect: Rect, paint: &SkiaPaint) {
        let Some(rect) = rect.to_skia() else {
            return;
        };
        match paint.style {
            PaintStyle::Fill => {
                self.with_pixmap(|pixmap, transform| {
                    pixmap.fill_rect(rect, &paint.paint, transform, None)
                });
            }
            PaintStyle::Stroke => {
                let path = tiny_skia::PathBuilder::from_rect(rect);
                self.with_pixmap(|pixmap, transform| {
                    pixmap.stroke_path(&path, &paint.paint, &paint.stroke, transform, None)
                });
            }
        }
    }

    fn draw_path(&mut self, path: &crate::SkiaPath, paint: &SkiaPaint) {
        match paint.style {
            PaintStyle::Fill => self.with_pixmap(|pixmap, transform| {
                pixmap.fill_path(&path.path, &paint.paint, path.fill_rule, transform, None)
            }),
            PaintStyle::Stroke => self.with_pixmap(|pixmap, transform| {
                pixmap.stroke_path(&path.path, &paint.paint, &paint.stroke, transform, None)
            }),
        }
    }

    fn draw_paragraph(&mut self, paragraph: &SkiaParagraph, x: f64, y: f64) {
        self.with_pixmap(|pixmap, transform| paragraph.paint(pixmap, transform, x as f32, y as f32));
    }
}
