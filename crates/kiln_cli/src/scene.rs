//! Scene files
//!
//! A scene is a TOML document listing what to render:
//!
//! ```toml
//! [config]
//! texture_cache = { lru = 64 }
//!
//! [[path]]
//! name = "square"
//! commands = [
//!     { move_to = { x = 0.0, y = 0.0 } },
//!     { line_to = { x = 10.0, y = 0.0 } },
//!     { line_to = { x = 10.0, y = 10.0 } },
//!     "close",
//! ]
//! stroke = { color = { r = 0.0, g = 0.0, b = 0.0, a = 1.0 }, stroke_width = 4.0 }
//!
//! [[gradient]]
//! name = "sky"
//! type = "linear"
//! width = 64.0
//! height = 32.0
//! rotation = 90.0
//! stops = [
//!     { offset = 0.0, color = { r = 0.2, g = 0.4, b = 1.0, a = 1.0 } },
//!     { offset = 1.0, color = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 } },
//! ]
//!
//! [[paragraph]]
//! name = "title"
//! text = "Hello"
//! style = { text_style = { font_size = 24.0 } }
//! ```

use anyhow::{Context, Result};
use kiln::{KilnConfig, PathOptions};
use kiln_core::{GradientOptions, ParagraphStyle, PathCommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: KilnConfig,
    #[serde(default, rename = "path")]
    pub paths: Vec<PathEntry>,
    #[serde(default, rename = "gradient")]
    pub gradients: Vec<GradientEntry>,
    #[serde(default, rename = "paragraph")]
    pub paragraphs: Vec<ParagraphEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PathEntry {
    pub name: String,
    pub commands: Vec<PathCommand>,
    #[serde(flatten)]
    pub options: PathOptions,
}

#[derive(Debug, Deserialize)]
pub struct GradientEntry {
    pub name: String,
    #[serde(flatten)]
    pub options: GradientOptions,
}

#[derive(Debug, Deserialize)]
pub struct ParagraphEntry {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub style: ParagraphStyle,
    #[serde(default)]
    pub max_width: Option<f64>,
    /// Font file; the host's default face when absent
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.gradients.is_empty() && self.paragraphs.is_empty()
    }
}
