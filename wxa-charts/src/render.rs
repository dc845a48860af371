//! Where figures end up.

use crate::{draw::draw_figure, figure::Figure};
use anyhow::Context;
use log::{debug, info};
use plotters::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Presents figures to the user.
pub trait Renderer {
    /// Render one figure and describe where it went
    fn render(&mut self, figure: &Figure) -> anyhow::Result<String>;
}

/// Writes each figure as a numbered SVG file into one directory.
#[derive(Debug)]
pub struct SvgRenderer {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    /// Create the renderer, creating `output_dir` if needed
    pub fn new(output_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
        Ok(SvgRenderer {
            output_dir,
            written: Vec::new(),
        })
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, figure: &Figure) -> PathBuf {
        self.output_dir
            .join(format!("{:02}-{}.svg", self.written.len() + 1, figure.slug))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, figure: &Figure) -> anyhow::Result<String> {
        let path = self.next_path(figure);
        debug!("Drawing {} '{}'", figure.kind_name(), figure.title);
        {
            let root = SVGBackend::new(&path, figure.size).into_drawing_area();
            draw_figure(&root, figure)
                .with_context(|| format!("Failed to draw '{}'", figure.title))?;
            root.present()
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        info!("Wrote {}", path.display());
        let location = path.display().to_string();
        self.written.push(path);
        Ok(location)
    }
}

/// Keeps figures in memory instead of drawing them
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    figures: Vec<Figure>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Titles of the kept figures, in render order
    pub fn titles(&self) -> Vec<&str> {
        self.figures.iter().map(|f| f.title.as_str()).collect()
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, figure: &Figure) -> anyhow::Result<String> {
        self.figures.push(figure.clone());
        Ok(format!("memory #{}", self.figures.len()))
    }
}
